//! Core types for upload classification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Duplicate Status
// ============================================================================

/// Classification of an upload against the session's prior uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateStatus {
    /// Neither the name nor the content hash was seen before
    Original,
    /// A prior upload had the same name and the same content hash
    Duplicate,
    /// A prior upload had the same name but different content
    SameNameDifferentContent,
    /// A prior upload had the same content under a different name
    SameContentDifferentName,
}

impl DuplicateStatus {
    /// All statuses, in stable display order
    pub const ALL: [DuplicateStatus; 4] = [
        DuplicateStatus::Original,
        DuplicateStatus::Duplicate,
        DuplicateStatus::SameNameDifferentContent,
        DuplicateStatus::SameContentDifferentName,
    ];

    /// Human-readable label used in upload reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Duplicate => "Duplicate",
            Self::SameNameDifferentContent => "Same Name, Different Content",
            Self::SameContentDifferentName => "Same Content, Different Name",
        }
    }
}

impl std::fmt::Display for DuplicateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Upload Record
// ============================================================================

/// A single classified upload
///
/// Created once per successful upload and never mutated afterwards. Owned
/// exclusively by the session's upload history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    /// File name as supplied by the client
    pub file_name: String,

    /// Original size in bytes
    pub file_size: u64,

    /// Lowercase hex SHA-256 of the normalized text
    pub content_hash: String,

    /// Classification against the session history at upload time
    pub status: DuplicateStatus,

    /// Cosmetic compression ratio in percent, clamped to [55, 65]
    pub compression_ratio: f64,

    /// When the upload was recorded
    pub uploaded_at: DateTime<Utc>,
}

// ============================================================================
// Ledger
// ============================================================================

/// Append-only list of original content hashes
///
/// Entries are never removed or rewritten. There is no linkage between
/// entries and no persistence across sessions; this is a plain audit list.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a content hash
    pub fn append(&mut self, content_hash: String) {
        self.entries.push(content_hash);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
