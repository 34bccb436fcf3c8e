//! Handlers for the `/auth` resource: sign-up, activation, sign-in and
//! password reset.

use aristotle_core::account::{
    activation_expires_at, check_activation, check_password_reset, generate_unique_code,
    password_reset_expires_at, DEFAULT_GENDER,
};
use aristotle_core::commands::{
    RequestPasswordResetCommand, ResetPasswordCommand, SignInCommand, SignUpCommand,
};
use aristotle_core::error::CoreError;
use aristotle_core::validation::Valid;
use aristotle_db::models::user::{CreateUser, UserResponse};
use aristotle_db::repositories::{ActivationRepo, MemberRepo, PasswordResetRepo, UserRepo};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Successful sign-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an inactive account and email its activation link.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(input): Json<SignUpCommand>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let cmd = Valid::new(input)?;

    if UserRepo::find_by_username(&state.pool, &cmd.username)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("A user with that username already exists".into()).into());
    }
    if UserRepo::find_by_email(&state.pool, &cmd.email).await?.is_some() {
        return Err(CoreError::Conflict("A user with that email already exists".into()).into());
    }

    let password_hash = hash_password(&cmd.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let mut tx = state.pool.begin().await?;
    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            username: cmd.username.clone(),
            email: cmd.email.clone(),
            password_hash,
        },
    )
    .await?;
    MemberRepo::create_default(&mut *tx, user.id, DEFAULT_GENDER).await?;
    let activation = ActivationRepo::create(
        &mut *tx,
        user.id,
        &generate_unique_code(),
        activation_expires_at(Utc::now()),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, username = %user.username, "User signed up");
    state
        .notifier
        .send_activation_email(&user, &activation.code);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/activate/{code}
pub async fn activate(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let invalid =
        || CoreError::Validation("The activation code is not valid or has expired".into());

    let mut tx = state.pool.begin().await?;
    let activation = ActivationRepo::find_by_code_for_update(&mut *tx, &code)
        .await?
        .ok_or_else(invalid)?;
    check_activation(activation.is_active, activation.expires_at, Utc::now())?;

    ActivationRepo::mark_used(&mut *tx, activation.id).await?;
    UserRepo::activate(&mut *tx, activation.user_id).await?;
    let user = UserRepo::find_by_id(&mut *tx, activation.user_id)
        .await?
        .ok_or_else(invalid)?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "Account activated");
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// POST /api/v1/auth/signin
///
/// Authenticate with username + password. Returns an access token.
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<SignInCommand>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let cmd = Valid::new(input)?;
    let bad_credentials =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, &cmd.username)
        .await?
        .ok_or_else(bad_credentials)?;

    let password_valid = verify_password(&cmd.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Sign-in rejected: wrong password");
        return Err(bad_credentials());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is not activated".into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    MemberRepo::record_login_ip(&state.pool, user.id, &client_ip(&headers)).await?;

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User signed in");
    Ok(Json(DataResponse {
        data: AuthResponse {
            access_token,
            expires_in: state.config.jwt.access_token_expiry_mins * 60,
            user: UserResponse::from(&user),
        },
    }))
}

/// POST /api/v1/auth/password-reset
///
/// Issue a fresh reset code for the account with this email, replacing any
/// earlier one, and email the link.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<RequestPasswordResetCommand>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    let cmd = Valid::new(input)?;

    let user = UserRepo::find_by_email(&state.pool, &cmd.email)
        .await?
        .ok_or_else(|| AppError::NotFound("No account uses that email address".into()))?;

    let reset = PasswordResetRepo::replace_for_user(
        &state.pool,
        user.id,
        &generate_unique_code(),
        password_reset_expires_at(Utc::now()),
    )
    .await?;

    tracing::info!(user_id = user.id, "Password reset requested");
    state
        .notifier
        .send_password_reset_email(&user, &reset.code);

    Ok(Json(DataResponse {
        data: MessageResponse {
            message: "A password reset link has been sent",
        },
    }))
}

/// POST /api/v1/auth/password-reset/{code}
pub async fn reset_password(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<ResetPasswordCommand>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    let cmd = Valid::new(input)?;

    let mut tx = state.pool.begin().await?;
    let reset = PasswordResetRepo::find_by_code_for_update(&mut *tx, &code)
        .await?
        .ok_or_else(|| CoreError::Validation("The code has expired".into()))?;
    check_password_reset(reset.expires_at, Utc::now())?;

    let password_hash = hash_password(&cmd.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&mut *tx, reset.user_id, &password_hash).await?;
    PasswordResetRepo::delete(&mut *tx, reset.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = reset.user_id, "Password reset");
    Ok(Json(DataResponse {
        data: MessageResponse {
            message: "Your password has been reset",
        },
    }))
}

/// Best-effort client address from proxy headers.
pub(crate) fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.1"));
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip_then_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), "");
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_ip(&headers), "198.51.100.2");
    }
}
