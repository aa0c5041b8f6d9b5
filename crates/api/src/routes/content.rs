use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// GET /         -> list_posts
/// GET /{slug}   -> get_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_posts))
        .route("/{slug}", get(content::get_content))
}
