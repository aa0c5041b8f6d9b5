use std::path::PathBuf;

use folio_core::blob::BlobStoreKind;

use crate::auth::jwt::JwtConfig;

/// Default maximum upload size: 10 MiB.
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

/// The single operator allowed to perform write operations.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Argon2id PHC string. Produce one with `folio-api hash-password`.
    pub password_hash: String,
}

impl AdminCredentials {
    /// Load admin credentials from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `ADMIN_USERNAME`      | no       | `admin` |
    /// | `ADMIN_PASSWORD_HASH` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `ADMIN_PASSWORD_HASH` is missing or is not a PHC string.
    pub fn from_env() -> Self {
        let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
        let password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .expect("ADMIN_PASSWORD_HASH must be set (run `folio-api hash-password`)");
        assert!(
            password_hash.starts_with('$'),
            "ADMIN_PASSWORD_HASH must be a PHC-formatted hash, not a plaintext password"
        );

        Self {
            username,
            password_hash,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Operator credentials checked at login.
    pub admin: AdminCredentials,
    /// Largest accepted image upload in bytes.
    pub upload_max_bytes: usize,
    /// Which blob store turns uploads into `src` values.
    pub image_storage: BlobStoreKind,
    /// Root directory of the filesystem blob store.
    pub image_storage_dir: PathBuf,
    /// Directory holding static Markdown documents (`<slug>.md`).
    pub content_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_MAX_BYTES`     | `10485760`                 |
    /// | `IMAGE_STORAGE`        | `inline`                   |
    /// | `IMAGE_STORAGE_DIR`    | `./blobs`                  |
    /// | `CONTENT_DIR`          | `./content`                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3001".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_max_bytes: usize = std::env::var("UPLOAD_MAX_BYTES")
            .unwrap_or_else(|_| DEFAULT_UPLOAD_MAX_BYTES.to_string())
            .parse()
            .expect("UPLOAD_MAX_BYTES must be a valid usize");

        let image_storage: BlobStoreKind = std::env::var("IMAGE_STORAGE")
            .unwrap_or_else(|_| "inline".into())
            .parse()
            .unwrap_or_else(|e: String| panic!("{e}"));

        let image_storage_dir = std::env::var("IMAGE_STORAGE_DIR")
            .unwrap_or_else(|_| "./blobs".into())
            .into();

        let content_dir = std::env::var("CONTENT_DIR")
            .unwrap_or_else(|_| "./content".into())
            .into();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            admin: AdminCredentials::from_env(),
            upload_max_bytes,
            image_storage,
            image_storage_dir,
            content_dir,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
