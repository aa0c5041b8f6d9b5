use std::sync::Arc;

use folio_core::blob::{BlobStore, BlobStoreKind, FilesystemBlobStore, InlineBlobStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where uploaded image bytes go.
    pub blob_store: Arc<dyn BlobStore>,
}

impl AppState {
    /// Build state with the blob store selected by `config.image_storage`.
    pub fn new(pool: folio_db::DbPool, config: ServerConfig) -> Self {
        let blob_store: Arc<dyn BlobStore> = match config.image_storage {
            BlobStoreKind::Inline => Arc::new(InlineBlobStore),
            BlobStoreKind::Filesystem => {
                Arc::new(FilesystemBlobStore::new(config.image_storage_dir.clone()))
            }
        };

        Self {
            pool,
            config: Arc::new(config),
            blob_store,
        }
    }
}
