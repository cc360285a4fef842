//! Interactive session registry
//!
//! Each successful login creates a session that exclusively owns its upload
//! history and hash ledger. Sessions are in-memory, isolated from each other,
//! and swept after expiry; nothing in them survives the process.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dedup::{classify, compression_ratio, DuplicateStatus, Ledger, UploadRecord};

// ============================================================================
// Constants
// ============================================================================

/// Session expiry time: 12 hours
pub const SESSION_EXPIRY_HOURS: i64 = 12;

/// Interval between expired-session sweeps: 5 minutes
const CLEANUP_INTERVAL_SECS: u64 = 300;

// ============================================================================
// Errors
// ============================================================================

/// Session lookup and lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Missing session token")]
    MissingToken,

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),
}

impl SessionError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::SessionNotFound(_) => StatusCode::UNAUTHORIZED,
            Self::SessionExpired(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

// ============================================================================
// User Session
// ============================================================================

/// A logged-in user's interactive session
///
/// The history is append-only: classification of a new upload only ever
/// reads prior records and never mutates them.
#[derive(Debug, Clone)]
pub struct UserSession {
    /// Opaque session token
    pub token: Uuid,

    /// Username the session was created for
    pub username: String,

    /// Session creation time
    pub created_at: DateTime<Utc>,

    /// Session expiry time
    pub expires_at: DateTime<Utc>,

    history: Vec<UploadRecord>,
    ledger: Ledger,
}

impl UserSession {
    fn new(username: &str, expiry: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4(),
            username: username.to_string(),
            created_at: now,
            expires_at: now + expiry,
            history: Vec::new(),
            ledger: Ledger::new(),
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Upload history, earliest first
    pub fn history(&self) -> &[UploadRecord] {
        &self.history
    }

    /// Running ledger of original content hashes
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Upload count per classification, in stable display order
    pub fn status_counts(&self) -> Vec<(DuplicateStatus, usize)> {
        DuplicateStatus::ALL
            .iter()
            .map(|status| {
                let count = self.history.iter().filter(|r| r.status == *status).count();
                (*status, count)
            })
            .collect()
    }
}

/// Outcome of recording one upload in a session
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    /// The newly appended record
    pub record: UploadRecord,

    /// Whether the upload was original and its hash entered the ledger
    pub ledger_updated: bool,

    /// Snapshot of the ledger after this upload
    pub ledger: Vec<String>,
}

// ============================================================================
// Session Manager
// ============================================================================

/// Registry of active sessions
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionManagerInner>,
}

struct SessionManagerInner {
    /// Active sessions indexed by token
    sessions: RwLock<HashMap<Uuid, UserSession>>,

    /// How long a new session lives
    expiry: Duration,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_expiry(Duration::hours(SESSION_EXPIRY_HOURS))
    }

    /// Create a registry whose sessions expire after the given duration
    pub fn with_expiry(expiry: Duration) -> Self {
        Self {
            inner: Arc::new(SessionManagerInner {
                sessions: RwLock::new(HashMap::new()),
                expiry,
            }),
        }
    }

    // ========================================================================
    // Session Lifecycle
    // ========================================================================

    /// Create a session for a logged-in user
    pub async fn create_session(&self, username: &str) -> UserSession {
        let session = UserSession::new(username, self.inner.expiry);

        {
            let mut sessions = self.inner.sessions.write().await;
            sessions.insert(session.token, session.clone());
        }

        tracing::info!(
            token = %session.token,
            username = %session.username,
            expires_at = %session.expires_at,
            "Created session"
        );

        session
    }

    /// Get a session snapshot by token
    pub async fn get_session(&self, token: Uuid) -> Result<UserSession, SessionError> {
        let sessions = self.inner.sessions.read().await;
        let session = sessions
            .get(&token)
            .ok_or_else(|| SessionError::SessionNotFound(token.to_string()))?;

        if session.is_expired() {
            return Err(SessionError::SessionExpired(token.to_string()));
        }

        Ok(session.clone())
    }

    /// Destroy a session (logout)
    pub async fn end_session(&self, token: Uuid) -> Result<UserSession, SessionError> {
        let session = {
            let mut sessions = self.inner.sessions.write().await;
            sessions
                .remove(&token)
                .ok_or_else(|| SessionError::SessionNotFound(token.to_string()))?
        };

        tracing::info!(
            token = %token,
            username = %session.username,
            uploads = session.history.len(),
            "Ended session"
        );

        Ok(session)
    }

    // ========================================================================
    // Upload Recording
    // ========================================================================

    /// Classify one upload against the session history and append it
    ///
    /// Classification and the appends happen under a single write lock, so
    /// the history a candidate is judged against is exactly the history it
    /// is appended to.
    pub async fn record_upload(
        &self,
        token: Uuid,
        file_name: &str,
        file_size: u64,
        content_hash: String,
    ) -> Result<RecordedUpload, SessionError> {
        let mut sessions = self.inner.sessions.write().await;

        let session = sessions
            .get_mut(&token)
            .ok_or_else(|| SessionError::SessionNotFound(token.to_string()))?;

        if session.is_expired() {
            return Err(SessionError::SessionExpired(token.to_string()));
        }

        let status = classify(file_name, &content_hash, &session.history);
        let ratio = compression_ratio(&content_hash, file_size);

        let record = UploadRecord {
            file_name: file_name.to_string(),
            file_size,
            content_hash,
            status,
            compression_ratio: ratio,
            uploaded_at: Utc::now(),
        };

        let ledger_updated = status == DuplicateStatus::Original;
        if ledger_updated {
            session.ledger.append(record.content_hash.clone());
            tracing::info!(
                token = %token,
                content_hash = %record.content_hash,
                ledger_len = session.ledger.len(),
                "Recorded original hash in ledger"
            );
        }

        session.history.push(record.clone());

        tracing::info!(
            token = %token,
            file_name = %file_name,
            file_size = file_size,
            status = %status,
            "Upload classified"
        );

        Ok(RecordedUpload {
            record,
            ledger_updated,
            ledger: session.ledger.entries().to_vec(),
        })
    }

    // ========================================================================
    // Cleanup
    // ========================================================================

    /// Remove expired sessions
    ///
    /// Returns the number of sessions removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.inner.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at >= now);
        let removed = before - sessions.len();

        if removed > 0 {
            tracing::info!(count = removed, "Cleaned up expired sessions");
        }

        removed
    }

    /// Start the background expiry sweep
    pub fn start_cleanup_task(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(CLEANUP_INTERVAL_SECS));

            loop {
                interval.tick().await;
                self.cleanup_expired().await;
            }
        })
    }

    /// Get active session count
    pub async fn session_count(&self) -> usize {
        let sessions = self.inner.sessions.read().await;
        sessions.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
