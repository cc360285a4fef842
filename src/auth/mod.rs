//! Registration and login
//!
//! Credentials are compared as plaintext strings. Registration enforces a
//! unique username, a matching confirmation, and a minimum password length,
//! checked in that order; the first failing check is reported and the store
//! is left unchanged.

use axum::http::StatusCode;

use crate::db::UserRepository;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

// ============================================================================
// Errors
// ============================================================================

/// Authentication and registration errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    #[error("Database error: {0}")]
    Database(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::PasswordMismatch => StatusCode::BAD_REQUEST,
            Self::PasswordTooShort => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<crate::error::AppError> for AuthError {
    fn from(e: crate::error::AppError) -> Self {
        AuthError::Database(e.to_string())
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Register a new user
pub async fn register(
    repo: &UserRepository<'_>,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), AuthError> {
    if repo.lookup(username).await?.is_some() {
        return Err(AuthError::UsernameTaken);
    }
    if password != confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort);
    }

    // The lookup above can race with a concurrent registration; the insert
    // conflict check catches that case.
    if !repo.insert(username, password).await? {
        return Err(AuthError::UsernameTaken);
    }

    Ok(())
}

/// Check a login attempt
pub async fn login(
    repo: &UserRepository<'_>,
    username: &str,
    password: &str,
) -> Result<(), AuthError> {
    match repo.lookup(username).await? {
        Some(stored) if stored == password => Ok(()),
        _ => Err(AuthError::InvalidCredentials),
    }
}

// ============================================================================
// Tests
// ============================================================================
