//! Handlers for the `/categories` resource.
//!
//! Listing is public; every mutation requires [`AdminUser`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::gallery::{validate_category_id, validate_category_name};
use folio_db::models::category::{CategoryWithImages, CreateCategory, DeleteCategory, UpdateCategory};
use folio_db::repositories::{CategoryRepo, ImageRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AdminUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Response for `GET /categories`.
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub categories: Vec<CategoryWithImages>,
}

/// GET /api/categories
///
/// Every category with its images nested, both in creation order.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<GalleryResponse>> {
    let categories = CategoryRepo::list_with_images(&state.pool).await?;
    Ok(Json(GalleryResponse { categories }))
}

/// Response for `GET /categories/{id}`.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: CategoryWithImages,
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<CategoryResponse>> {
    let category = CategoryRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", &id)))?;
    let images = ImageRepo::list_by_category(&state.pool, &category.id).await?;

    Ok(Json(CategoryResponse {
        category: CategoryWithImages { category, images },
    }))
}

/// POST /api/categories
pub async fn create_category(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<SuccessResponse>)> {
    input.id = input.id.trim().to_string();
    validate_category_id(&input.id)?;
    validate_category_name(&input.name)?;

    // A duplicate id surfaces as a 23505 on `categories_pkey` -> 409.
    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category_id = %category.id, admin = %admin.username, "Category created");

    Ok((StatusCode::CREATED, Json(SuccessResponse::OK)))
}

/// PATCH /api/categories
///
/// Overwrite name and description. The id is never changed.
pub async fn update_category(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<SuccessResponse>> {
    let id = input.id.trim();
    validate_category_id(id)?;
    validate_category_name(&input.name)?;

    CategoryRepo::update(&state.pool, id, &input.name, &input.description)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))?;

    tracing::info!(category_id = %id, admin = %admin.username, "Category updated");

    Ok(Json(SuccessResponse::OK))
}

/// DELETE /api/categories
///
/// Delete a category and all of its images in one transaction.
pub async fn delete_category(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<DeleteCategory>,
) -> AppResult<Json<SuccessResponse>> {
    let id = input.id.trim();
    validate_category_id(id)?;

    let images_removed = CategoryRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))?;

    tracing::info!(
        category_id = %id,
        images_removed,
        admin = %admin.username,
        "Category deleted",
    );

    Ok(Json(SuccessResponse::OK))
}
