//! Thought (blog post) models.

use folio_core::thought::PublishState;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `thoughts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Thought {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Thought {
    pub fn state(&self) -> PublishState {
        PublishState::from(self.published)
    }
}

/// DTO for creating a thought.
///
/// `slug` is derived from `title` when omitted. `published` defaults to
/// `false` (draft).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateThought {
    #[serde(default)]
    pub title: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: Option<bool>,
}

/// DTO for a full-record update of a thought.
///
/// Omitted optional fields are cleared, not preserved. When
/// `expected_updated_at` is set the update only applies if the stored
/// `updated_at` still matches.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateThought {
    pub id: Option<DbId>,
    #[serde(default)]
    pub title: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: Option<bool>,
    pub expected_updated_at: Option<Timestamp>,
}

/// Column values written by create and update, after validation.
#[derive(Debug, Clone)]
pub struct ThoughtFields<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub content: &'a str,
    pub excerpt: Option<&'a str>,
    pub cover_image: Option<&'a str>,
    pub published: bool,
}
