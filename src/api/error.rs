//! # API Errors
//!
//! The gateway collapses every failure into one of two causes: nothing usable
//! came back from the transport, or the server answered with a non-success
//! status. Both display the same message to the user.

use thiserror::Error;

/// Message shown to the user for any failed request
pub const GENERIC_FAILURE_MESSAGE: &str = "Something bad happened; please try again later.";

/// Normalized failure of a gateway operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No usable response: connection failure, or a body that could not be decoded
    #[error("Something bad happened; please try again later.")]
    Transport { reason: String },

    /// The server answered with a non-2xx status
    #[error("Something bad happened; please try again later.")]
    Status { status: u16, body: String },
}

impl ApiError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// HTTP status code when the server did answer
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => None,
            Self::Status { status, .. } => Some(*status),
        }
    }

    /// Diagnostic detail for logs; never shown to the user
    pub fn detail(&self) -> String {
        match self {
            Self::Transport { reason } => format!("Some error occurred: {reason}"),
            Self::Status { status, body } => {
                format!("Error Status code {status}, Error body is: {body}")
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::transport(format!("malformed response body: {e}"))
    }
}

/// Result of a gateway operation
pub type ApiResult<T> = Result<T, ApiError>;
