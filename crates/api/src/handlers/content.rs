//! Markdown posts and documents served from `CONTENT_DIR`.
//!
//! Files with YAML front matter form the post catalog; files without it are
//! plain documents reachable only by slug.

use std::path::Path;

use axum::extract::State;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::post::{parse_document, sort_catalog, PostDocument, PostMeta};
use folio_core::slug::validate_slug;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::middleware::auth::MaybeAdmin;
use crate::state::AppState;

const MARKDOWN_EXTENSION: &str = "md";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One catalog entry: the slug plus its front matter fields.
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub slug: String,
    #[serde(flatten)]
    pub meta: PostMeta,
}

/// Response for `GET /content`.
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostSummary>,
}

/// Response for `GET /content/{slug}`.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub slug: String,
    /// Front matter, or `null` for a plain document.
    pub post: Option<PostMeta>,
    /// Markdown body with the front matter removed.
    pub content: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/content
///
/// Posts with front matter, newest first. Drafts are listed for the admin
/// only. A missing content directory is an empty catalog.
pub async fn list_posts(
    viewer: MaybeAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<PostListResponse>> {
    let dir = &state.config.content_dir;
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Json(PostListResponse { posts: Vec::new() }));
        }
        Err(e) => return Err(read_error(dir, e)),
    };

    let mut catalog = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| read_error(dir, e))? {
        let path = entry.path();
        let Some(slug) = markdown_slug(&path) else {
            continue;
        };
        if !entry.file_type().await.map_err(|e| read_error(&path, e))?.is_file() {
            continue;
        }

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| read_error(&path, e))?;
        match parse_document(&raw) {
            Ok(PostDocument {
                meta: Some(meta), ..
            }) if meta.is_published() || viewer.is_admin() => catalog.push((slug, meta)),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping post with bad front matter");
            }
        }
    }

    sort_catalog(&mut catalog);

    let posts = catalog
        .into_iter()
        .map(|(slug, meta)| PostSummary { slug, meta })
        .collect();
    Ok(Json(PostListResponse { posts }))
}

/// GET /api/content/{slug}
///
/// Returns `<CONTENT_DIR>/<slug>.md` with its front matter split off. The
/// slug is validated first, so only plain file names inside the content
/// directory are read. Drafts answer 404 unless the caller is the admin.
pub async fn get_content(
    viewer: MaybeAdmin,
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> AppResult<Json<ContentResponse>> {
    validate_slug(&slug).map_err(|_| CoreError::not_found("Content", &slug))?;

    let path = state
        .config
        .content_dir
        .join(format!("{slug}.{MARKDOWN_EXTENSION}"));
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CoreError::not_found("Content", &slug).into());
        }
        Err(e) => return Err(read_error(&path, e)),
    };

    let document = parse_document(&raw).map_err(|e| {
        AppError::InternalError(format!("Post {} is malformed: {e}", path.display()))
    })?;

    if let Some(meta) = &document.meta {
        if !meta.is_published() && !viewer.is_admin() {
            return Err(CoreError::not_found("Content", &slug).into());
        }
    }

    Ok(Json(ContentResponse {
        slug,
        post: document.meta,
        content: document.body,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The slug of a `<slug>.md` file, if its stem is a valid slug.
fn markdown_slug(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != MARKDOWN_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    validate_slug(stem).ok()?;
    Some(stem.to_string())
}

fn read_error(path: &Path, err: std::io::Error) -> AppError {
    AppError::InternalError(format!("Failed to read {}: {err}", path.display()))
}
