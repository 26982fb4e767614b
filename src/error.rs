#![allow(missing_docs)]
//! Error types for the pdf4me plugin.

use std::time::Duration;

use thiserror::Error;

/// Result type for pdf4me operations.
pub type Result<T> = std::result::Result<T, Pdf4meError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pdf4meErrorCode {
    ValidationError,
    AuthenticationFailed,
    ApiError,
    Timeout,
    NetworkError,
    ParseError,
    InvalidResponse,
    ConfigurationError,
    UnknownOperation,
}

impl std::fmt::Display for Pdf4meErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationError => write!(f, "VALIDATION_ERROR"),
            Self::AuthenticationFailed => write!(f, "AUTHENTICATION_FAILED"),
            Self::ApiError => write!(f, "API_ERROR"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::NetworkError => write!(f, "NETWORK_ERROR"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            Self::ConfigurationError => write!(f, "CONFIGURATION_ERROR"),
            Self::UnknownOperation => write!(f, "UNKNOWN_OPERATION"),
        }
    }
}

/// Error types for the pdf4me plugin.
#[derive(Debug, Error)]
pub enum Pdf4meError {
    /// Input rejected before any request was sent.
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    /// Non-success status returned by the pdf4me API (submit, poll or download).
    #[error("pdf4me API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The remote job did not finish before the poll deadline.
    #[error("Timed out after {elapsed:?} waiting for pdf4me ({polls} polls)")]
    Timeout { elapsed: Duration, polls: u32 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Failure of a single input item inside a batch.
    #[error("Item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<Pdf4meError>,
    },
}

impl Pdf4meError {
    pub fn code(&self) -> Pdf4meErrorCode {
        match self {
            Self::Validation { .. } => Pdf4meErrorCode::ValidationError,
            Self::Api { status: 401, .. } | Self::Api { status: 403, .. } => {
                Pdf4meErrorCode::AuthenticationFailed
            }
            Self::Api { .. } => Pdf4meErrorCode::ApiError,
            Self::Timeout { .. } => Pdf4meErrorCode::Timeout,
            Self::Network(_) => Pdf4meErrorCode::NetworkError,
            Self::Parse(_) => Pdf4meErrorCode::ParseError,
            Self::InvalidResponse(_) => Pdf4meErrorCode::InvalidResponse,
            Self::Config(_) => Pdf4meErrorCode::ConfigurationError,
            Self::UnknownOperation(_) => Pdf4meErrorCode::UnknownOperation,
            Self::Item { source, .. } => source.code(),
        }
    }

    /// HTTP status carried by the error, if the remote side produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Item { source, .. } => source.status(),
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        self.code() == Pdf4meErrorCode::AuthenticationFailed
    }

    pub fn is_timeout(&self) -> bool {
        self.code() == Pdf4meErrorCode::Timeout
    }

    /// Whether resubmitting the whole request could succeed. Nothing in this crate
    /// retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Network(_) => true,
            Self::Api { status, .. } => (500..=599).contains(status),
            Self::Item { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    pub fn item(index: usize, source: Pdf4meError) -> Self {
        Self::Item {
            index,
            source: Box::new(source),
        }
    }
}
