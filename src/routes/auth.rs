//! Authentication routes
//!
//! Endpoints:
//! - POST /api/v1/auth/register - Create a new user
//! - POST /api/v1/auth/login - Log in and open a session
//! - POST /api/v1/auth/logout - Destroy the current session

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{self, AuthError};
use crate::db::UserRepository;
use crate::session::SessionError;
use crate::state::AppState;

use super::ErrorBody;

// ============================================================================
// Error Response
// ============================================================================

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let code = match &self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::UsernameTaken => "USERNAME_TAKEN",
            AuthError::PasswordMismatch => "PASSWORD_MISMATCH",
            AuthError::PasswordTooShort => "PASSWORD_TOO_SHORT",
            AuthError::Database(_) => "DATABASE_ERROR",
        };

        let body = Json(ErrorBody {
            error: self.to_string(),
            code: code.to_string(),
        });

        (self.status_code(), body).into_response()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Create the auth router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    username: String,
    password: String,
    confirm_password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    username: String,
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let repo = UserRepository::new(state.db());
    auth::register(
        &repo,
        &request.username,
        &request.password,
        &request.confirm_password,
    )
    .await?;

    tracing::info!(username = %request.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: request.username,
        }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    username: String,
    expires_at: DateTime<Utc>,
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let repo = UserRepository::new(state.db());
    auth::login(&repo, &request.username, &request.password).await?;

    let session = state.sessions().create_session(&request.username).await;

    tracing::info!(username = %request.username, token = %session.token, "Login successful");

    Ok(Json(LoginResponse {
        token: session.token.to_string(),
        username: request.username,
        expires_at: session.expires_at,
    }))
}

/// POST /api/v1/auth/logout
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, SessionError> {
    let token = super::session_token(&headers)?;
    state.sessions().end_session(token).await?;

    Ok(StatusCode::NO_CONTENT)
}
