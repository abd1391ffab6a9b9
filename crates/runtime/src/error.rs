//! Unified error types surfaced by the runtime API.

use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Game(#[from] game_core::GameError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no saved session `{0}`")]
    SessionNotFound(String),

    #[error("failed to load content: {0:#}")]
    Content(anyhow::Error),
}

impl From<game_core::OracleError> for RuntimeError {
    fn from(error: game_core::OracleError) -> Self {
        Self::Game(error.into())
    }
}
