use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("No game selected.")]
    NoGameSelected,

    #[error("Failed to list instances: {0}")]
    Source(String),

    #[error("Unknown choice '{0}'")]
    UnknownChoice(String),

    #[error("Invalid instance name: '{0}'")]
    InvalidLabel(String),
}
