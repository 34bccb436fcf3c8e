//! JWT-based identity extractors for Axum handlers.

use aristotle_core::authorization::Actor;
use aristotle_core::error::CoreError;
use aristotle_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying an anonymous visitor's session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

impl AuthUser {
    /// The identity handed to lifecycle operations.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id)
    }
}

impl FromRequestParts<AppState> for AuthUser {
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

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// Who is looking at a page, for view counting.
///
/// Signed-in users count once per account; anonymous visitors once per
/// `x-session-id`. A request with neither is not counted. An invalid token
/// is treated as anonymous rather than rejected.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub user_id: Option<DbId>,
    pub key: Option<String>,
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Ok(user) = AuthUser::from_request_parts(parts, state).await {
            return Ok(Viewer {
                user_id: Some(user.user_id),
                key: Some(format!("user:{}", user.user_id)),
            });
        }

        let key = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("session:{s}"));

        Ok(Viewer { user_id: None, key })
    }
}
