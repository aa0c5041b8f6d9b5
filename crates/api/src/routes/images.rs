use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Room for multipart boundaries and the text fields around the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/images`.
///
/// ```text
/// POST   /         -> create_image
/// DELETE /         -> delete_image
/// POST   /upload   -> upload_image (body limit: upload_max_bytes)
/// GET    /{id}     -> get_image
/// ```
pub fn router(upload_max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(images::create_image).delete(images::delete_image))
        .route(
            "/upload",
            post(images::upload_image).layer(DefaultBodyLimit::max(
                upload_max_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
        .route("/{id}", get(images::get_image))
}
