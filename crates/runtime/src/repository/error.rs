//! Error types raised by repository implementations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    /// A stored record exists but cannot be decoded. Callers treat it like a
    /// missing record and fall back.
    #[error("corrupted data in {path}: {reason}")]
    Corrupted { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
