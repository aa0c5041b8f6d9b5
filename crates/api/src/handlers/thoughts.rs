//! Handlers for the `/thoughts` resource and slug derivation.
//!
//! Anonymous callers see published thoughts only. The unfiltered list,
//! drafts, and every mutation need the admin token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::slug::derive_slug;
use folio_core::thought::{normalize_optional, resolve_slug, validate_content, validate_title};
use folio_core::types::DbId;
use folio_db::models::thought::{CreateThought, Thought, ThoughtFields, UpdateThought};
use folio_db::repositories::ThoughtRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::{AdminUser, MaybeAdmin};
use crate::response::SuccessResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /thoughts`.
#[derive(Debug, Deserialize)]
pub struct ListThoughtsParams {
    pub published: Option<bool>,
}

/// Query parameters for `GET /slugs/derive`.
#[derive(Debug, Deserialize)]
pub struct DeriveSlugParams {
    #[serde(default)]
    pub title: String,
}

/// Query parameters for `DELETE /thoughts`.
#[derive(Debug, Deserialize)]
pub struct DeleteThoughtParams {
    pub id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct ThoughtListResponse {
    pub thoughts: Vec<Thought>,
}

#[derive(Debug, Serialize)]
pub struct ThoughtResponse {
    pub thought: Thought,
}

#[derive(Debug, Serialize)]
pub struct SlugResponse {
    pub slug: String,
}

/// Validate the shared create/update fields and borrow them as column values.
fn thought_fields<'a>(
    title: &'a str,
    slug: &'a str,
    content: &'a str,
    excerpt: Option<&'a str>,
    cover_image: Option<&'a str>,
    published: bool,
) -> Result<ThoughtFields<'a>, CoreError> {
    validate_title(title)?;
    validate_content(content)?;
    Ok(ThoughtFields {
        title: title.trim(),
        slug,
        content,
        excerpt: normalize_optional(excerpt),
        cover_image: normalize_optional(cover_image),
        published,
    })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/thoughts?published=true
///
/// Published thoughts, newest first. Without `published=true` the list
/// includes drafts and requires the admin token.
pub async fn list_thoughts(
    viewer: MaybeAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListThoughtsParams>,
) -> AppResult<Json<ThoughtListResponse>> {
    let published_only = params.published == Some(true);
    if !published_only && !viewer.is_admin() {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Listing drafts requires admin access".into(),
        )));
    }

    let thoughts = ThoughtRepo::list(&state.pool, published_only).await?;
    Ok(Json(ThoughtListResponse { thoughts }))
}

/// GET /api/thoughts/{slug}
///
/// Drafts answer 404 unless the caller is the admin.
pub async fn get_thought(
    viewer: MaybeAdmin,
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> AppResult<Json<ThoughtResponse>> {
    let thought = ThoughtRepo::find_by_slug(&state.pool, &slug)
        .await?
        .filter(|t| t.state().is_public() || viewer.is_admin())
        .ok_or_else(|| AppError::Core(CoreError::not_found("Thought", &slug)))?;

    Ok(Json(ThoughtResponse { thought }))
}

/// GET /api/slugs/derive?title=...
pub async fn derive_slug_for_title(
    AppQuery(params): AppQuery<DeriveSlugParams>,
) -> Json<SlugResponse> {
    Json(SlugResponse {
        slug: derive_slug(&params.title),
    })
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/thoughts
///
/// Create a thought. The slug is derived from the title when omitted;
/// `published` defaults to `false`.
pub async fn create_thought(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateThought>,
) -> AppResult<(StatusCode, Json<ThoughtResponse>)> {
    let slug = resolve_slug(&input.title, input.slug.as_deref())?;
    let fields = thought_fields(
        &input.title,
        &slug,
        &input.content,
        input.excerpt.as_deref(),
        input.cover_image.as_deref(),
        input.published.unwrap_or(false),
    )?;

    // A duplicate slug surfaces as a 23505 on `uq_thoughts_slug` -> 409.
    let thought = ThoughtRepo::create(&state.pool, &fields).await?;

    tracing::info!(
        thought_id = thought.id,
        slug = %thought.slug,
        published = thought.published,
        admin = %admin.username,
        "Thought created",
    );

    Ok((StatusCode::CREATED, Json(ThoughtResponse { thought })))
}

/// PUT /api/thoughts
///
/// Full-record replace. Omitted optional fields are cleared. With
/// `expected_updated_at`, a thought edited since it was loaded is rejected
/// with 409.
pub async fn update_thought(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateThought>,
) -> AppResult<Json<ThoughtResponse>> {
    let id = input
        .id
        .ok_or_else(|| CoreError::Validation("Thought id is required".into()))?;

    let slug = resolve_slug(&input.title, input.slug.as_deref())?;
    let fields = thought_fields(
        &input.title,
        &slug,
        &input.content,
        input.excerpt.as_deref(),
        input.cover_image.as_deref(),
        input.published.unwrap_or(false),
    )?;

    let updated = ThoughtRepo::update(&state.pool, id, &fields, input.expected_updated_at).await?;

    let Some(thought) = updated else {
        // No row matched: either the id is unknown or the row moved on.
        let exists = ThoughtRepo::find_by_id(&state.pool, id).await?.is_some();
        return Err(if exists && input.expected_updated_at.is_some() {
            AppError::Core(CoreError::Conflict(
                "Thought was modified since it was loaded".into(),
            ))
        } else {
            AppError::Core(CoreError::not_found("Thought", id))
        });
    };

    tracing::info!(
        thought_id = thought.id,
        slug = %thought.slug,
        published = thought.published,
        admin = %admin.username,
        "Thought updated",
    );

    Ok(Json(ThoughtResponse { thought }))
}

/// DELETE /api/thoughts?id=...
pub async fn delete_thought(
    admin: AdminUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DeleteThoughtParams>,
) -> AppResult<Json<SuccessResponse>> {
    let id = params
        .id
        .ok_or_else(|| CoreError::Validation("Thought id is required".into()))?;

    if !ThoughtRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Thought", id)));
    }

    tracing::info!(thought_id = id, admin = %admin.username, "Thought deleted");

    Ok(Json(SuccessResponse::OK))
}
