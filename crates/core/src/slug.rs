//! Slug derivation and validation for thoughts and Markdown content.
//!
//! Derivation is a convenience for the admin UI; uniqueness is enforced by
//! the `uq_thoughts_slug` constraint, never here.

use crate::error::CoreError;

/// Maximum slug length, matching the `thoughts.slug` column.
pub const MAX_SLUG_LEN: usize = 500;

/// Derive a URL-safe slug from a title.
///
/// Lowercases the title, replaces every run of characters outside
/// `[a-z0-9]` with a single hyphen, and trims leading/trailing hyphens.
///
/// ```
/// assert_eq!(folio_core::slug::derive_slug("Hello, World! "), "hello-world");
/// ```
pub fn derive_slug(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut prev_hyphen = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    result.trim_matches('-').to_string()
}

/// Validate a submitted slug (non-empty, only lowercase alphanumerics and hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}
