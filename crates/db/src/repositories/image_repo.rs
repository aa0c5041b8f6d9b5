//! Repository for the `images` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::{CreateImage, Image};

/// Column list for images queries.
const COLUMNS: &str = "id, category_id, src, alt, title, date, created_at";

/// Provides CRUD operations for gallery images.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert an image. An unknown `category_id` fails with a foreign key
    /// violation.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (category_id, src, alt, title, date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(&input.category_id)
            .bind(&input.src)
            .bind(&input.alt)
            .bind(&input.title)
            .bind(&input.date)
            .fetch_one(pool)
            .await
    }

    /// Find an image by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every image, oldest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Image>(&query).fetch_all(pool).await
    }

    /// List the images of one category, oldest first.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: &str,
    ) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM images
             WHERE category_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an image. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
