//! Repository for the `categories` table.
//!
//! Deleting a category also deletes its images inside one transaction.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};

use crate::models::category::{Category, CategoryWithImages, CreateCategory};
use crate::models::image::Image;
use crate::repositories::image_repo::ImageRepo;

/// Column list for categories queries.
const COLUMNS: &str = "id, name, description, created_at";

/// Provides CRUD operations for gallery categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category. A duplicate id fails with a unique violation.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a category by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a category with this id exists.
    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List all categories, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// List all categories with their images nested, both oldest first.
    ///
    /// Two queries regardless of the number of categories; images are
    /// grouped in memory.
    pub async fn list_with_images(pool: &PgPool) -> Result<Vec<CategoryWithImages>, sqlx::Error> {
        let categories = Self::list(pool).await?;
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_category: HashMap<String, Vec<Image>> = HashMap::new();
        for image in ImageRepo::list_all(pool).await? {
            by_category
                .entry(image.category_id.clone())
                .or_default()
                .push(image);
        }

        Ok(categories
            .into_iter()
            .map(|category| {
                let images = by_category.remove(&category.id).unwrap_or_default();
                CategoryWithImages { category, images }
            })
            .collect())
    }

    /// Overwrite name and description. Returns `None` if the id is unknown.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET name = $2, description = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(name)
            .bind(description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category and all of its images atomically.
    ///
    /// Returns `None` if the category does not exist (nothing is changed),
    /// otherwise the number of images removed alongside it.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let removed = Self::delete_with_images(&mut *tx, id).await?;
        if removed.is_some() {
            tx.commit().await?;
        }
        // An uncommitted transaction rolls back on drop.
        Ok(removed)
    }

    /// The statements behind [`CategoryRepo::delete`], run on a caller-owned
    /// connection or transaction.
    pub async fn delete_with_images(
        conn: &mut PgConnection,
        id: &str,
    ) -> Result<Option<u64>, sqlx::Error> {
        let images = sqlx::query("DELETE FROM images WHERE category_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        let categories = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok((categories > 0).then_some(images))
    }
}
