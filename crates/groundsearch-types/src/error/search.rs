//! Errors raised while serving a search or follow-up request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request-path error taxonomy.
///
/// Validation and lookup failures are detected before any network call.
/// Everything that goes wrong talking to the model is one of the upstream
/// variants and surfaces as a 5xx. Malformed grounding metadata never
/// produces an error; unusable entries are skipped instead.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum SearchError {
    /// A required field is missing or empty
    #[error("{message}")]
    InvalidRequest { message: String },

    /// No conversation is stored under this identifier
    #[error("Chat session not found")]
    SessionNotFound { session_id: String },

    /// Transport or protocol failure talking to the model API
    #[error("{message}")]
    Upstream { message: String },

    /// Model API answered with a non-success status; `message` is already sanitized
    #[error("{message}")]
    UpstreamStatus { status: u16, message: String },

    /// Model replied without any answer text
    #[error("Model returned an empty answer")]
    EmptyAnswer,

    /// Model turn exceeded the configured timeout and was cancelled
    #[error("Model request timed out after {duration_secs}s")]
    Timeout { duration_secs: u64 },
}

impl SearchError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest { message: message.into() }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream { message: message.into() }
    }

    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. } | Self::SessionNotFound { .. })
    }

    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { .. } | Self::EmptyAnswer | Self::Timeout { .. } => true,
            Self::UpstreamStatus { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504 | 529),
            Self::InvalidRequest { .. } | Self::SessionNotFound { .. } => false,
        }
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } => 400,
            Self::SessionNotFound { .. } => 404,
            Self::Timeout { .. } => 504,
            Self::Upstream { .. } | Self::UpstreamStatus { .. } | Self::EmptyAnswer => 500,
        }
    }
}
