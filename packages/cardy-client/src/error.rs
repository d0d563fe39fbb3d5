//! Error types for the Cardy client.
//!
//! Every failure is normalized into one of a few shapes so callers can show
//! a single message and branch on [`ApiError::status`].

use serde_json::Value;
use thiserror::Error;

/// Result type for Cardy client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Unable to connect to server. Please check your connection.";
pub const INVALID_RESPONSE_MESSAGE: &str = "Received an invalid response from server.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Normalized gateway failure.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Server responded with a non-2xx status
    #[error("{message}")]
    Server {
        message: String,
        status: u16,
        data: Value,
    },

    /// Request was sent but no response arrived (connect failure, timeout)
    #[error("Unable to connect to server. Please check your connection.")]
    Connection { detail: String },

    /// A 2xx response arrived but its body could not be decoded
    #[error("Received an invalid response from server.")]
    InvalidResponse { detail: String },

    /// Request could not be constructed or sent
    #[error("{message}")]
    Request { message: String },
}

impl ApiError {
    /// Build a server error from the status and raw body, preferring the
    /// body's `error` field for the message.
    pub fn from_server(status: u16, data: Value) -> Self {
        let message = data
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(SERVER_ERROR_MESSAGE)
            .to_string();
        ApiError::Server {
            message,
            status,
            data,
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            ApiError::Request {
                message: UNEXPECTED_ERROR_MESSAGE.to_string(),
            }
        } else {
            ApiError::Request { message }
        }
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for server errors, `0` when no usable response arrived,
    /// `-1` when the request never left.
    pub fn status(&self) -> i32 {
        match self {
            ApiError::Server { status, .. } => i32::from(*status),
            ApiError::Connection { .. } | ApiError::InvalidResponse { .. } => 0,
            ApiError::Request { .. } => -1,
        }
    }

    /// Raw response body, when the server sent one.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ApiError::Server { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Whether this failure means the backend was unreachable.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Connection { .. } | ApiError::InvalidResponse { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::request(err.to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse {
                detail: err.to_string(),
            }
        } else {
            ApiError::Connection {
                detail: err.to_string(),
            }
        }
    }
}
