use thiserror::Error;

/// Errors returned by alias registry operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AliasError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AliasError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Errors signalled by an external service constructor
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Service construction failed: {0}")]
    ConstructionFailed(String),

    #[error("Service not available")]
    Unavailable,
}

impl ServiceError {
    pub fn construction_failed(msg: impl Into<String>) -> Self {
        Self::ConstructionFailed(msg.into())
    }
}
