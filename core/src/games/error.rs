//! Error types for the game registry

use thiserror::Error;

/// Errors raised while loading or querying the game registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameServiceError {
    /// The JSON source is unreadable, malformed, or describes an invalid set
    /// of game specifications.
    #[error("Invalid game configuration: {0}")]
    Configuration(String),

    /// No loaded specification matches the requested key.
    #[error("Game '{0}' not found!")]
    NotFound(String),

    /// The process-wide registry was already installed.
    #[error("Game service is already initialized")]
    AlreadyInitialized,

    /// The process-wide registry was queried before `GameService::init`.
    #[error("Game service is not initialized")]
    NotInitialized,
}
