use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`. Mutations carry the id in the JSON body.
///
/// ```text
/// GET    /       -> list_categories
/// POST   /       -> create_category
/// PATCH  /       -> update_category
/// DELETE /       -> delete_category
/// GET    /{id}   -> get_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories)
                .post(categories::create_category)
                .patch(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/{id}", get(categories::get_category))
}
