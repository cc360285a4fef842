//! Upload routes
//!
//! Endpoints:
//! - POST /api/v1/uploads - Upload a document and classify it
//! - GET /api/v1/uploads - Session upload history
//! - GET /api/v1/uploads/ledger - Running ledger of original hashes
//! - GET /api/v1/uploads/stats - Classification frequency counts

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::HeaderMap,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::dedup::{self, DuplicateStatus, UploadRecord};
use crate::extract::{self, DocumentKind, ExtractError};
use crate::session::SessionError;
use crate::state::AppState;

use super::ErrorBody;

/// Framing allowance when checking Content-Length against the file cap
const MULTIPART_OVERHEAD: u64 = 1024;

// ============================================================================
// Error Response
// ============================================================================

/// Upload request errors
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Missing file field in multipart body")]
    MissingFile,

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl UploadError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::MissingFile => StatusCode::BAD_REQUEST,
            Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Extract(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Session(e) => e.status_code(),
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> axum::response::Response {
        match self {
            // Session errors carry their own response shape
            UploadError::Session(e) => e.into_response(),
            other => {
                let code = match &other {
                    UploadError::MissingFile => "MISSING_FILE",
                    UploadError::Multipart(_) => "MALFORMED_MULTIPART",
                    UploadError::FileTooLarge { .. } => "FILE_TOO_LARGE",
                    UploadError::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
                    UploadError::Extract(_) => "EXTRACTION_FAILED",
                    UploadError::Session(_) => "SESSION_ERROR",
                };

                let body = Json(ErrorBody {
                    error: other.to_string(),
                    code: code.to_string(),
                });

                (other.status_code(), body).into_response()
            }
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Create the uploads router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload).get(history))
        .route("/ledger", get(ledger))
        .route("/stats", get(stats))
}

// ============================================================================
// Handlers
// ============================================================================

/// Per-upload report returned to the client
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_name: String,
    file_size: u64,
    normalized_text: String,
    content_hash: String,
    status: DuplicateStatus,
    status_label: String,
    compression_ratio: f64,
    ledger_updated: bool,
    ledger: Vec<String>,
}

/// POST /api/v1/uploads
///
/// Accepts a multipart body with a single `file` field, extracts and
/// normalizes its text, fingerprints it, and classifies it against the
/// session's upload history.
async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    let token = super::session_token(&headers)?;

    // Reject unknown sessions before reading the body
    state.sessions().get_session(token).await?;

    let max = state.config().upload.max_file_size;

    // Requests far over the cap are caught on Content-Length before the body
    // is parsed, so they never trip the body limit mid-multipart. Requests
    // inside the framing allowance fall through to the exact size check.
    if let Some(length) = headers
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
    {
        if length > max.saturating_add(MULTIPART_OVERHEAD) {
            return Err(UploadError::FileTooLarge { size: length, max });
        }
    }

    let mut file: Option<(String, Option<String>, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_owned);
            let data = field
                .bytes()
                .await
                .map_err(|e| UploadError::Multipart(e.to_string()))?;
            file = Some((file_name, content_type, data));
        }
    }
    let (file_name, content_type, data) = file.ok_or(UploadError::MissingFile)?;

    if data.len() as u64 > max {
        return Err(UploadError::FileTooLarge {
            size: data.len() as u64,
            max,
        });
    }

    let kind = DocumentKind::detect(&file_name, content_type.as_deref()).ok_or_else(|| {
        UploadError::UnsupportedFileType(content_type.clone().unwrap_or_else(|| file_name.clone()))
    })?;

    let raw_text = extract::extract_text(kind, &data)?;
    let normalized = dedup::normalize_text(&raw_text);
    let content_hash = dedup::content_hash(&normalized);

    let recorded = state
        .sessions()
        .record_upload(token, &file_name, data.len() as u64, content_hash)
        .await?;

    Ok(Json(UploadResponse {
        file_name: recorded.record.file_name.clone(),
        file_size: recorded.record.file_size,
        normalized_text: normalized,
        content_hash: recorded.record.content_hash.clone(),
        status: recorded.record.status,
        status_label: recorded.record.status.label().to_string(),
        compression_ratio: recorded.record.compression_ratio,
        ledger_updated: recorded.ledger_updated,
        ledger: recorded.ledger,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryResponse {
    uploads: Vec<UploadRecord>,
}

/// GET /api/v1/uploads
async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<HistoryResponse>, SessionError> {
    let token = super::session_token(&headers)?;
    let session = state.sessions().get_session(token).await?;

    Ok(Json(HistoryResponse {
        uploads: session.history().to_vec(),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerResponse {
    entries: Vec<String>,
    length: usize,
}

/// GET /api/v1/uploads/ledger
async fn ledger(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LedgerResponse>, SessionError> {
    let token = super::session_token(&headers)?;
    let session = state.sessions().get_session(token).await?;

    Ok(Json(LedgerResponse {
        entries: session.ledger().entries().to_vec(),
        length: session.ledger().len(),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusCount {
    status: DuplicateStatus,
    label: String,
    count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    counts: Vec<StatusCount>,
    total_uploads: usize,
}

/// GET /api/v1/uploads/stats
///
/// Classification frequency per status, suitable for a bar chart.
async fn stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, SessionError> {
    let token = super::session_token(&headers)?;
    let session = state.sessions().get_session(token).await?;

    let counts = session
        .status_counts()
        .into_iter()
        .map(|(status, count)| StatusCount {
            status,
            label: status.label().to_string(),
            count,
        })
        .collect();

    Ok(Json(StatsResponse {
        counts,
        total_uploads: session.history().len(),
    }))
}
