//! Error types for the assistant core.

use cardy_client::ApiError;
use thiserror::Error;

/// Local input rejection. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Mobile number is required")]
    MobileRequired,

    #[error("Mobile number must be exactly 10 digits")]
    MobileLength,

    #[error("Mobile number must contain only digits")]
    MobileDigits,

    #[error("Please enter a message")]
    QueryEmpty,

    #[error("Message is too long. Maximum {max} characters allowed")]
    QueryTooLong { max: usize },
}

/// Failure half of a flow result.
#[derive(Debug, Clone, Error)]
pub enum FlowError {
    /// Input rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend answered but reported `success: false` (or sent no payload)
    #[error("{0}")]
    Domain(String),

    /// No usable response (server status, connection, timeout, malformed body)
    #[error(transparent)]
    Transport(#[from] ApiError),

    /// The session changed while the request was in flight; the result was dropped
    #[error("Session changed before the response arrived")]
    Stale,
}

impl FlowError {
    /// Message shown to the user for this failure.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}
