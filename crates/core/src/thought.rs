//! Thought (blog post) validation and publish-state helpers.

use crate::error::CoreError;
use crate::slug::{derive_slug, validate_slug};

/// Maximum title length, matching the `thoughts.title` column.
pub const MAX_TITLE_LEN: usize = 500;

/// Draft/published lifecycle of a thought.
///
/// Deletion removes the row, so there is no `Deleted` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Draft,
    Published,
}

impl From<bool> for PublishState {
    fn from(published: bool) -> Self {
        if published {
            PublishState::Published
        } else {
            PublishState::Draft
        }
    }
}

impl PublishState {
    /// Whether anonymous visitors may read a thought in this state.
    pub fn is_public(self) -> bool {
        self == PublishState::Published
    }
}

/// Validate a thought title (non-empty, <= 500 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate Markdown content (non-empty).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()));
    }
    Ok(())
}

/// Pick the slug to store: the submitted one if present, otherwise one
/// derived from the title. Either way the result is validated, so an
/// explicitly empty slug is rejected.
pub fn resolve_slug(title: &str, submitted: Option<&str>) -> Result<String, CoreError> {
    let slug = match submitted {
        Some(s) => s.trim().to_string(),
        None => derive_slug(title),
    };
    validate_slug(&slug)?;
    Ok(slug)
}

/// Normalise optional text fields: blank strings are stored as `NULL`.
pub fn normalize_optional(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
