//! Shared response envelope types for API handlers.
//!
//! Every response is a JSON object keyed by what it carries
//! (`{ "categories": [...] }`, `{ "thought": {...} }`). Mutations that return
//! nothing else answer `{ "success": true }`.

use serde::Serialize;

/// `{ "success": true }` acknowledgement for mutations.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const OK: Self = Self { success: true };
}
