pub mod auth;
pub mod categories;
pub mod content;
pub mod health;
pub mod images;
pub mod slugs;
pub mod thoughts;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth
///     POST   /login                    login
///     GET    /session                  session (admin)
///
/// /categories
///     GET    /                         gallery (categories with images)
///     POST   /                         create (admin)
///     PATCH  /                         update (admin)
///     DELETE /                         delete with images (admin)
///     GET    /{id}                     one category with its images
///
/// /images
///     POST   /                         create from URL (admin)
///     DELETE /                         delete (admin)
///     POST   /upload                   multipart upload (admin)
///     GET    /{id}                     one image
///
/// /thoughts
///     GET    /?published=true          list (omit filter: admin)
///     POST   /                         create (admin)
///     PUT    /                         full update (admin)
///     DELETE /?id=                     delete (admin)
///     GET    /{slug}                   get by slug (drafts: admin)
///
/// /slugs
///     GET    /derive?title=            derive slug from title
///
/// /content
///     GET    /                         post catalog (drafts: admin)
///     GET    /{slug}                   post or document (drafts: admin)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/images", images::router(config.upload_max_bytes))
        .nest("/thoughts", thoughts::router())
        .nest("/slugs", slugs::router())
        .nest("/content", content::router())
}
