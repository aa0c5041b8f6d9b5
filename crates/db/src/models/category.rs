//! Gallery category models.

use folio_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::image::Image;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// A category with its images, as rendered by the gallery.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithImages {
    #[serde(flatten)]
    pub category: Category,
    pub images: Vec<Image>,
}

/// DTO for creating a category. The id is chosen by the caller.
///
/// Fields default to empty so a missing field is reported as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for renaming/re-describing a category. Same shape as create; the id
/// selects the row and is never changed.
pub type UpdateCategory = CreateCategory;

/// DTO for deleting a category.
#[derive(Debug, Deserialize)]
pub struct DeleteCategory {
    #[serde(default)]
    pub id: String,
}
