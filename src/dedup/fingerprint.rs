//! Content fingerprinting
//!
//! Uploads are fingerprinted by the SHA-256 of their whitespace-normalized
//! text, so two documents that differ only in formatting hash identically.

use sha2::{Digest, Sha256};

/// Collapse runs of whitespace to single spaces and strip the ends
///
/// Idempotent: normalizing already-normalized text yields the same text.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase hex SHA-256 digest of normalized text
pub fn content_hash(normalized: &str) -> String {
    hex::encode(Sha256::digest(normalized.as_bytes()))
}

/// Cosmetic compression ratio: hex digest length over original byte size,
/// as a percentage clamped to [55, 65]
///
/// Display-only; it has no effect on classification. An empty file clamps
/// to the upper bound.
pub fn compression_ratio(digest_hex: &str, file_size: u64) -> f64 {
    if file_size == 0 {
        return 65.0;
    }
    let ratio = (digest_hex.len() as f64 / file_size as f64) * 100.0;
    ratio.clamp(55.0, 65.0)
}

// ============================================================================
// Tests
// ============================================================================
