//! Handlers for the `/images` resource: multipart upload, insert by URL,
//! lookup, and delete. Every mutation requires [`AdminUser`].

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::gallery::{
    non_blank, resolve_content_type, resolve_upload_labels, validate_category_id,
    validate_image_labels,
};
use folio_core::types::DbId;
use folio_db::models::image::{CreateImage, DeleteImage, Image};
use folio_db::repositories::{CategoryRepo, ImageRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppMultipart, AppPath};
use crate::middleware::auth::AdminUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Response for image creation (upload or URL).
#[derive(Debug, Serialize)]
pub struct ImageCreatedResponse {
    pub success: bool,
    pub image: Image,
}

/// Response for `GET /images/{id}`.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image: Image,
}

/// The fields of an upload form, collected before any of them is acted on
/// (multipart parts may arrive in any order).
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    category_id: Option<String>,
    title: Option<String>,
    alt: Option<String>,
    date: Option<String>,
}

#[derive(Debug)]
struct UploadedFile {
    filename: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?.to_vec();
                form.file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            "category_id" | "title" | "alt" | "date" => {
                let value = field.text().await?;
                let slot = match name.as_str() {
                    "category_id" => &mut form.category_id,
                    "title" => &mut form.title,
                    "alt" => &mut form.alt,
                    _ => &mut form.date,
                };
                *slot = Some(value);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown upload field");
            }
        }
    }

    Ok(form)
}

/// POST /api/images/upload
///
/// Accept a multipart form (`file`, `category_id`, optional `title`, `alt`,
/// `date`), hand the bytes to the configured blob store, and insert the row.
pub async fn upload_image(
    admin: AdminUser,
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<ImageCreatedResponse>)> {
    let form = read_upload_form(multipart).await?;

    let category_id = non_blank(form.category_id)
        .map(|id| id.trim().to_string())
        .ok_or_else(|| CoreError::Validation("category_id is required".into()))?;
    validate_category_id(&category_id)?;

    let file = form
        .file
        .filter(|f| !f.bytes.is_empty())
        .ok_or_else(|| CoreError::Validation("An image file is required".into()))?;

    let limit = state.config.upload_max_bytes;
    if file.bytes.len() > limit {
        return Err(AppError::PayloadTooLarge(format!(
            "Upload of {} bytes exceeds the {limit} byte limit",
            file.bytes.len()
        )));
    }

    if !CategoryRepo::exists(&state.pool, &category_id).await? {
        return Err(CoreError::not_found("Category", &category_id).into());
    }

    let labels = resolve_upload_labels(file.filename.as_deref(), form.title, form.alt, form.date);
    validate_image_labels(&labels.alt, &labels.title, &labels.date)?;

    let content_type = resolve_content_type(file.content_type.as_deref(), file.filename.as_deref());
    let src = state.blob_store.store(&content_type, &file.bytes).await?;

    let image = ImageRepo::create(
        &state.pool,
        &CreateImage {
            category_id,
            src,
            alt: labels.alt,
            title: labels.title,
            date: labels.date,
        },
    )
    .await?;

    tracing::info!(
        image_id = image.id,
        category_id = %image.category_id,
        bytes = file.bytes.len(),
        content_type = %content_type,
        store = ?state.blob_store.kind(),
        admin = %admin.username,
        "Image uploaded",
    );

    Ok((
        StatusCode::CREATED,
        Json(ImageCreatedResponse {
            success: true,
            image,
        }),
    ))
}

/// POST /api/images
///
/// Insert an image whose `src` is already a URL or path.
pub async fn create_image(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateImage>,
) -> AppResult<(StatusCode, Json<ImageCreatedResponse>)> {
    input.category_id = input.category_id.trim().to_string();
    validate_category_id(&input.category_id)?;
    if input.src.trim().is_empty() {
        return Err(CoreError::Validation("Image src is required".into()).into());
    }
    validate_image_labels(&input.alt, &input.title, &input.date)?;

    if !CategoryRepo::exists(&state.pool, &input.category_id).await? {
        return Err(CoreError::not_found("Category", &input.category_id).into());
    }

    let image = ImageRepo::create(&state.pool, &input).await?;

    tracing::info!(
        image_id = image.id,
        category_id = %image.category_id,
        admin = %admin.username,
        "Image created from URL",
    );

    Ok((
        StatusCode::CREATED,
        Json(ImageCreatedResponse {
            success: true,
            image,
        }),
    ))
}

/// GET /api/images/{id}
pub async fn get_image(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ImageResponse>> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Image", id)))?;

    Ok(Json(ImageResponse { image }))
}

/// DELETE /api/images
pub async fn delete_image(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<DeleteImage>,
) -> AppResult<Json<SuccessResponse>> {
    let id = input
        .id
        .ok_or_else(|| CoreError::Validation("Image id is required".into()))?;

    if !ImageRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Image", id).into());
    }

    tracing::info!(image_id = id, admin = %admin.username, "Image deleted");

    Ok(Json(SuccessResponse::OK))
}
