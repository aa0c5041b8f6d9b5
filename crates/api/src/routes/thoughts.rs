use axum::routing::get;
use axum::Router;

use crate::handlers::thoughts;
use crate::state::AppState;

/// Routes mounted at `/thoughts`.
///
/// ```text
/// GET    /?published=true   -> list_thoughts
/// POST   /                  -> create_thought
/// PUT    /                  -> update_thought
/// DELETE /?id=              -> delete_thought
/// GET    /{slug}            -> get_thought
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(thoughts::list_thoughts)
                .post(thoughts::create_thought)
                .put(thoughts::update_thought)
                .delete(thoughts::delete_thought),
        )
        .route("/{slug}", get(thoughts::get_thought))
}
