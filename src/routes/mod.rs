//! Route modules

pub mod auth;
pub mod health;
pub mod uploads;

use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::session::SessionError;

/// Header carrying the session token on authenticated requests
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Error response body shared by the route error types
#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    pub code: String,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> axum::response::Response {
        let code = match &self {
            SessionError::MissingToken => "MISSING_SESSION_TOKEN",
            SessionError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            SessionError::SessionExpired(_) => "SESSION_EXPIRED",
        };

        let body = Json(ErrorBody {
            error: self.to_string(),
            code: code.to_string(),
        });

        (self.status_code(), body).into_response()
    }
}

/// Pull the session token out of the request headers
pub(crate) fn session_token(headers: &HeaderMap) -> Result<Uuid, SessionError> {
    let value = headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(SessionError::MissingToken)?;

    Uuid::parse_str(value).map_err(|_| SessionError::SessionNotFound(value.to_string()))
}
