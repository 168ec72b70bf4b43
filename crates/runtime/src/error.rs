//! Unified error types surfaced by the runtime.
//!
//! Wraps failures from content, configuration, repositories, and action
//! providers so clients can bubble them up with consistent context.
use thiserror::Error;

use game_core::{ConfigError, ErrorSeverity, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires game content to be configured before building")]
    MissingContent,

    #[error("invalid game configuration")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("level generated from seed {seed} has no rooms")]
    EmptyLevel { seed: u64 },

    #[error("no game in progress")]
    NoActiveGame,

    #[error("cannot {operation} while the game is {status}")]
    InvalidState {
        operation: &'static str,
        status: &'static str,
    },

    #[error("no save in slot '{0}'")]
    SaveNotFound(String),

    #[error("action provider failed: {0}")]
    Provider(String),
}

impl RuntimeError {
    /// Severity of the underlying failure, for hosts deciding whether to
    /// retry or shut down.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Config(err) => err.severity(),
            RuntimeError::MissingContent => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }
}
