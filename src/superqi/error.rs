//! Error definitions for provider calls.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to the SuperQi provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Credentials are missing or the private key cannot be parsed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Network failure, timeout or non-2xx status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Provider answered with a body we could not decode.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Provider accepted the call but declined the payment (`resultStatus == "F"`).
    #[error("Payment rejected: {message}")]
    PaymentRejected {
        /// Provider result code, when present.
        code: Option<String>,
        /// Human readable provider message.
        message: String,
    },

    /// Caller input rejected before any network call.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// True when the failure happened upstream (network or provider body).
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Errors raised by a [`Transport`](crate::superqi::transport::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the configured deadline.
    #[error("Provider request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Connection, TLS or body read failure.
    #[error("Provider network error: {0}")]
    Network(String),

    /// Provider answered with a non-2xx status.
    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
