//! Domain logic shared by the Folio database and API crates.
//!
//! Nothing in here performs database or network I/O. The only I/O is the
//! filesystem blob store, which lives here so it can be unit-tested without
//! a running server.

pub mod blob;
pub mod error;
pub mod gallery;
pub mod post;
pub mod slug;
pub mod thought;
pub mod types;
