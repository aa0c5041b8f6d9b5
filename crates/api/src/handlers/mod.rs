//! Request handlers, one submodule per resource.
//!
//! Handlers validate input with `folio_core`, delegate persistence to the
//! repositories in `folio_db`, and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod categories;
pub mod content;
pub mod images;
pub mod thoughts;
