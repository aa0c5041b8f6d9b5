//! Blob stores turn uploaded image bytes into the `src` stored on the row.
//!
//! - [`InlineBlobStore`] embeds the bytes as a base64 data URL.
//! - [`FilesystemBlobStore`] writes the bytes to disk under a
//!   content-addressed key and returns a `/blobs/<key>` reference.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::gallery::encode_data_url;

/// URL prefix under which the filesystem store's blobs are served.
pub const BLOB_URL_PREFIX: &str = "/blobs";

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Blob I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Which [`BlobStore`] implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobStoreKind {
    Inline,
    Filesystem,
}

impl FromStr for BlobStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(BlobStoreKind::Inline),
            "filesystem" | "fs" => Ok(BlobStoreKind::Filesystem),
            other => Err(format!(
                "Unknown image storage '{other}'. Must be one of: inline, filesystem"
            )),
        }
    }
}

/// Persists uploaded bytes and returns the `src` to store on the image row.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn store(&self, content_type: &str, bytes: &[u8]) -> Result<String, BlobError>;

    /// Confirm the store can currently accept writes.
    async fn check(&self) -> Result<(), BlobError>;

    fn kind(&self) -> BlobStoreKind;
}

/// Embeds bytes in the row as `data:<type>;base64,<payload>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineBlobStore;

#[async_trait]
impl BlobStore for InlineBlobStore {
    async fn store(&self, content_type: &str, bytes: &[u8]) -> Result<String, BlobError> {
        Ok(encode_data_url(content_type, bytes))
    }

    async fn check(&self) -> Result<(), BlobError> {
        Ok(())
    }

    fn kind(&self) -> BlobStoreKind {
        BlobStoreKind::Inline
    }
}

/// Writes bytes under `root` keyed by their SHA-256 digest.
///
/// Identical uploads share one file.
#[derive(Debug, Clone)]
pub struct FilesystemBlobStore {
    root: PathBuf,
}

impl FilesystemBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the storage key for some bytes: `<sha256-hex>[.<ext>]`.
    pub fn key_for(content_type: &str, bytes: &[u8]) -> String {
        let digest = format!("{:x}", Sha256::digest(bytes));
        match mime_guess::get_mime_extensions_str(content_type).and_then(|exts| exts.first()) {
            Some(ext) => format!("{digest}.{ext}"),
            None => digest,
        }
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn store(&self, content_type: &str, bytes: &[u8]) -> Result<String, BlobError> {
        let key = Self::key_for(content_type, bytes);
        let path = self.root.join(&key);

        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::create_dir_all(&self.root).await?;
            // Each writer stages its own file, so a rename only ever
            // publishes complete bytes.
            let tmp = self.root.join(format!(".{key}.{}.tmp", Uuid::new_v4()));
            tokio::fs::write(&tmp, bytes).await?;
            if let Err(e) = tokio::fs::rename(&tmp, &path).await {
                let _ = tokio::fs::remove_file(&tmp).await;
                // Another writer already published the same content.
                if !tokio::fs::try_exists(&path).await? {
                    return Err(e.into());
                }
            }
        }

        Ok(format!("{BLOB_URL_PREFIX}/{key}"))
    }

    async fn check(&self) -> Result<(), BlobError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let marker = self.root.join(format!(".health.{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&marker, b"ok").await?;
        tokio::fs::remove_file(&marker).await?;
        Ok(())
    }

    fn kind(&self) -> BlobStoreKind {
        BlobStoreKind::Filesystem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::ImageSource;

    #[test]
    fn parses_store_kind() {
        assert_eq!("inline".parse::<BlobStoreKind>(), Ok(BlobStoreKind::Inline));
        assert_eq!(" Filesystem ".parse::<BlobStoreKind>(), Ok(BlobStoreKind::Filesystem));
        assert!("s3".parse::<BlobStoreKind>().is_err());
    }

    #[tokio::test]
    async fn inline_store_round_trips() {
        let bytes = b"\x89PNG\r\n\x1a\nrest-of-image".to_vec();
        let src = InlineBlobStore.store("image/png", &bytes).await.unwrap();

        let decoded = ImageSource::classify(&src).decode().unwrap().unwrap();
        assert_eq!(decoded, bytes);
    }

    #[tokio::test]
    async fn filesystem_store_writes_content_addressed_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemBlobStore::new(dir.path().join("blobs"));
        let bytes = b"jpeg-bytes".to_vec();

        let src = store.store("image/jpeg", &bytes).await.unwrap();
        let key = src.strip_prefix("/blobs/").expect("blob url prefix");
        assert_eq!(key, FilesystemBlobStore::key_for("image/jpeg", &bytes));
        assert_eq!(ImageSource::classify(&src), ImageSource::External(&src));

        let on_disk = tokio::fs::read(store.root().join(key)).await.unwrap();
        assert_eq!(on_disk, bytes);
    }

    #[tokio::test]
    async fn identical_uploads_share_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemBlobStore::new(dir.path());

        let a = store.store("image/png", b"same").await.unwrap();
        let b = store.store("image/png", b"same").await.unwrap();
        let c = store.store("image/png", b"different").await.unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_identical_uploads_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemBlobStore::new(dir.path());
        let bytes: Vec<u8> = (0..512 * 1024).map(|i| (i % 251) as u8).collect();

        for _round in 0..5 {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = store.clone();
                    let bytes = bytes.clone();
                    tokio::spawn(async move { store.store("image/png", &bytes).await })
                })
                .collect();

            let mut srcs = Vec::new();
            for handle in handles {
                srcs.push(handle.await.unwrap().expect("store should succeed"));
            }
            srcs.dedup();
            assert_eq!(srcs.len(), 1);

            let key = srcs[0].strip_prefix("/blobs/").unwrap();
            assert_eq!(tokio::fs::read(dir.path().join(key)).await.unwrap(), bytes);
            tokio::fs::remove_file(dir.path().join(key)).await.unwrap();
        }

        // No staging files are left behind.
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            panic!("unexpected leftover file: {:?}", entry.file_name());
        }
    }

    #[tokio::test]
    async fn filesystem_check_creates_root_and_leaves_it_clean() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemBlobStore::new(dir.path().join("nested/blobs"));

        store.check().await.unwrap();
        assert!(store.root().is_dir());
        assert_eq!(std::fs::read_dir(store.root()).unwrap().count(), 0);
        assert!(InlineBlobStore.check().await.is_ok());
    }

    #[tokio::test]
    async fn filesystem_check_fails_when_root_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        assert!(FilesystemBlobStore::new(&file).check().await.is_err());
    }

    #[test]
    fn unknown_content_type_has_no_extension() {
        let key = FilesystemBlobStore::key_for("application/x-unknown-thing", b"x");
        assert_eq!(key.len(), 64);
        assert!(!key.contains('.'));
    }
}
