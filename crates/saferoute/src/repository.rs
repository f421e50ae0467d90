//! Storage errors and identifier sequencing shared by the collaborator stores.

use std::sync::atomic::{AtomicU64, Ordering};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier such as `hist-000042`.
pub fn next_record_id(prefix: &str) -> String {
    let id = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}
