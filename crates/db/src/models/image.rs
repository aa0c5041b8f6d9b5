//! Gallery image models.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `images` table.
///
/// `src` is either an external path/URL or an embedded data URL; see
/// [`folio_core::gallery::ImageSource`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub category_id: String,
    pub src: String,
    pub alt: String,
    pub title: String,
    pub date: String,
    pub created_at: Timestamp,
}

/// DTO for inserting an image whose `src` is already known.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImage {
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
}

/// DTO for deleting an image.
#[derive(Debug, Deserialize)]
pub struct DeleteImage {
    pub id: Option<DbId>,
}
