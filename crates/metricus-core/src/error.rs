//! Shared error type across metricus crates.
//!
//! Only construction paths return these. Emission paths swallow their errors
//! at the instrument boundary (see `instruments`).

use std::io;

use thiserror::Error;

/// Stable error codes (used in logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Namespace prefix was empty.
    EmptyPrefix,
    /// Transport address was empty.
    EmptyAddress,
    /// Transport could not be initialized.
    Transport,
    /// Configuration failed to parse or validate.
    InvalidConfig,
    /// A single emission failed.
    Emit,
}

impl ErrorCode {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyPrefix => "EMPTY_PREFIX",
            ErrorCode::EmptyAddress => "EMPTY_ADDRESS",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Emit => "EMIT",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and http.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics prefix cannot be empty")]
    EmptyPrefix,
    #[error("statsd address cannot be empty")]
    EmptyAddress,
    #[error("failed to initialize statsd client for {addr}: {source}")]
    Transport {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("emit failed: {0}")]
    Emit(#[from] io::Error),
}

impl MetricsError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::EmptyPrefix => ErrorCode::EmptyPrefix,
            MetricsError::EmptyAddress => ErrorCode::EmptyAddress,
            MetricsError::Transport { .. } => ErrorCode::Transport,
            MetricsError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            MetricsError::Emit(_) => ErrorCode::Emit,
        }
    }
}
