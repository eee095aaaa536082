use thiserror::Error;

/// Errors produced by model parsers and constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid user status: {0:?} (expected \"active\" or \"inactive\")")]
    InvalidStatus(String),

    #[error("invalid permission: {0:?}")]
    InvalidPermission(String),

    #[error("invalid editable field: {0:?} (expected \"role\" or \"status\")")]
    InvalidField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
