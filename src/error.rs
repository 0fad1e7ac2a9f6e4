//! Typed internal errors. Everything that crosses the HTTP boundary becomes a [`crate::Problem`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
    #[error("validation: {0}")]
    Validation(String),
}

/// Failures of a single store round trip or of the item codec around it.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("marshal: {0}")]
    Marshal(String),
    #[error("unmarshal: {0}")]
    Unmarshal(String),
    #[error("dynamodb {op} failed: {message}")]
    Backend { op: &'static str, message: String },
    #[error("operation cancelled")]
    Cancelled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl StoreError {
    pub fn backend(op: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            op,
            message: message.into(),
        }
    }

    pub fn marshal(message: impl Into<String>) -> Self {
        Self::Marshal(message.into())
    }

    pub fn unmarshal(message: impl Into<String>) -> Self {
        Self::Unmarshal(message.into())
    }
}
