//! Duplicate detection core
//!
//! Fingerprints whitespace-normalized document text with SHA-256 and
//! classifies each upload against the session's prior uploads. Hashes of
//! original uploads are recorded in an append-only ledger.

mod classifier;
mod fingerprint;
mod types;

pub use classifier::*;
pub use fingerprint::*;
pub use types::*;
