//! JWT-based admin extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated operator, extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Every write endpoint takes this as a parameter; a missing, malformed, or
/// expired token rejects the request with 401 before the handler runs.
///
/// ```ignore
/// async fn my_handler(admin: AdminUser) -> AppResult<Json<()>> {
///     tracing::info!(admin = %admin.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// The admin username (from `claims.sub`).
    pub username: String,
    /// Token expiry as a UTC Unix timestamp.
    pub expires_at: i64,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // A token minted for a previous admin username no longer grants access.
        if claims.sub != state.config.admin.username {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired token".into(),
            )));
        }

        Ok(AdminUser {
            username: claims.sub,
            expires_at: claims.exp,
        })
    }
}

/// Optional admin: `Some` for a valid token, `None` otherwise.
///
/// Used by read endpoints whose results widen for the operator (drafts,
/// the unfiltered thought list). A missing or invalid token never fails
/// the request here; endpoints that need the admin check `is_admin`.
#[derive(Debug, Clone)]
pub struct MaybeAdmin(pub Option<AdminUser>);

impl MaybeAdmin {
    pub fn is_admin(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequestParts<AppState> for MaybeAdmin {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AdminUser::from_request_parts(parts, state).await {
            Ok(admin) => Ok(MaybeAdmin(Some(admin))),
            Err(err) => {
                if parts.headers.contains_key("authorization") {
                    tracing::debug!(error = %err, "Ignoring invalid admin token on public read");
                }
                Ok(MaybeAdmin(None))
            }
        }
    }
}
