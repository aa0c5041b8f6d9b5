use axum::routing::get;
use axum::Router;

use crate::handlers::thoughts;
use crate::state::AppState;

/// Routes mounted at `/slugs`.
///
/// ```text
/// GET /derive?title=   -> derive_slug_for_title
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/derive", get(thoughts::derive_slug_for_title))
}
