//! Repository for the `thoughts` table.

use folio_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::thought::{Thought, ThoughtFields};

/// Column list for thoughts queries.
const COLUMNS: &str = "id, title, slug, content, excerpt, cover_image, \
    published, created_at, updated_at";

/// Provides CRUD operations for thoughts.
pub struct ThoughtRepo;

impl ThoughtRepo {
    /// Insert a thought. A duplicate slug fails on `uq_thoughts_slug`.
    pub async fn create(pool: &PgPool, fields: &ThoughtFields<'_>) -> Result<Thought, sqlx::Error> {
        let query = format!(
            "INSERT INTO thoughts (title, slug, content, excerpt, cover_image, published)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Thought>(&query)
            .bind(fields.title)
            .bind(fields.slug)
            .bind(fields.content)
            .bind(fields.excerpt)
            .bind(fields.cover_image)
            .bind(fields.published)
            .fetch_one(pool)
            .await
    }

    /// Find a thought by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Thought>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM thoughts WHERE id = $1");
        sqlx::query_as::<_, Thought>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a thought by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Thought>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM thoughts WHERE slug = $1");
        sqlx::query_as::<_, Thought>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List thoughts newest first, optionally only the published ones.
    pub async fn list(pool: &PgPool, published_only: bool) -> Result<Vec<Thought>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM thoughts
             WHERE ($1 = false OR published = true)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Thought>(&query)
            .bind(published_only)
            .fetch_all(pool)
            .await
    }

    /// Replace every mutable field and bump `updated_at`.
    ///
    /// With `expected_updated_at` set, the row is only touched if its
    /// `updated_at` still equals that value. Returns `None` when no row was
    /// updated (unknown id or stale `expected_updated_at`).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &ThoughtFields<'_>,
        expected_updated_at: Option<Timestamp>,
    ) -> Result<Option<Thought>, sqlx::Error> {
        let query = format!(
            "UPDATE thoughts SET
                title = $2,
                slug = $3,
                content = $4,
                excerpt = $5,
                cover_image = $6,
                published = $7,
                updated_at = NOW()
             WHERE id = $1
               AND ($8::TIMESTAMPTZ IS NULL OR updated_at = $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Thought>(&query)
            .bind(id)
            .bind(fields.title)
            .bind(fields.slug)
            .bind(fields.content)
            .bind(fields.excerpt)
            .bind(fields.cover_image)
            .bind(fields.published)
            .bind(expected_updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a thought. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM thoughts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
