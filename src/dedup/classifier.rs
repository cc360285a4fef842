//! Upload classification
//!
//! Classifies a candidate upload against the session's prior uploads by
//! scanning the history oldest-first. The first history entry that matches
//! the candidate's name or hash decides the outcome, so scan position wins
//! over rule priority when several entries could match in different ways.

use super::types::{DuplicateStatus, UploadRecord};

/// Classify a candidate upload against the prior upload history
///
/// `history` must be ordered earliest-first. Never mutates history.
pub fn classify(file_name: &str, content_hash: &str, history: &[UploadRecord]) -> DuplicateStatus {
    for record in history {
        if record.file_name == file_name && record.content_hash == content_hash {
            return DuplicateStatus::Duplicate;
        } else if record.file_name == file_name {
            return DuplicateStatus::SameNameDifferentContent;
        } else if record.content_hash == content_hash {
            return DuplicateStatus::SameContentDifferentName;
        }
    }
    DuplicateStatus::Original
}

// ============================================================================
// Tests
// ============================================================================
