//! Liveness and dependency report, mounted at the root (not under `/api`).

use axum::extract::State;
use axum::{routing::get, Json, Router};
use folio_core::blob::BlobStoreKind;
use serde::Serialize;

use crate::state::AppState;

/// Blob store half of the health report.
#[derive(Debug, Serialize)]
pub struct BlobStoreHealth {
    pub kind: BlobStoreKind,
    /// The store accepted a test write just now.
    pub healthy: bool,
}

/// Response for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database or blob store is failing.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub blob_store: BlobStoreHealth,
    /// Whether `CONTENT_DIR` exists. Posts and documents 404 without it.
    pub content_dir_present: bool,
}

/// GET /health
///
/// Always 200 so the report stays readable while dependencies are down.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match folio_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let blob_healthy = match state.blob_store.check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, store = ?state.blob_store.kind(), "Blob store health check failed");
            false
        }
    };

    let content_dir_present = tokio::fs::metadata(&state.config.content_dir)
        .await
        .is_ok_and(|m| m.is_dir());

    let status = if db_healthy && blob_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        blob_store: BlobStoreHealth {
            kind: state.blob_store.kind(),
            healthy: blob_healthy,
        },
        content_dir_present,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
