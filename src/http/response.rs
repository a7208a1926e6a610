//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Upstream failures (network, timeout, bad provider body) are reported
//!   generically; details stay in the logs
//! - A declined payment keeps the provider message so callers can tell it
//!   apart from a failed call
//! - Payment status inquiry is an explicit not-implemented response

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::superqi::{ProviderError, TransportError};

pub const SERVICE_NAME: &str = "superqi-proxy";

/// Standard error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// Body of `GET /api/v1/payment/{paymentId}/status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub payment_id: String,
    pub status: &'static str,
    pub message: &'static str,
}

/// Body of `GET /api/v1/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Errors returned by gateway handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Inbound request failed validation.
    BadRequest(String),
    /// Provider call failed or was declined.
    Provider(ProviderError),
    /// Operation exists at the interface but has no provider counterpart yet.
    NotImplemented { payment_id: String },
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::BadRequest("Invalid request body".into())
    }
}

impl ApiError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            Self::NotImplemented { .. } => (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED"),
            Self::Provider(e) => match e {
                ProviderError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
                ProviderError::PaymentRejected { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "PAYMENT_REJECTED")
                }
                ProviderError::Transport(TransportError::Timeout(_)) => {
                    (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT")
                }
                ProviderError::Transport(_) | ProviderError::Decode(_) => {
                    (StatusCode::BAD_GATEWAY, "UPSTREAM_FAILURE")
                }
                ProviderError::Signing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SIGNING_FAILURE"),
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest(message) => message.clone(),
            Self::NotImplemented { .. } => "Payment status inquiry not yet implemented".into(),
            Self::Provider(e) => match e {
                ProviderError::InvalidRequest(message) => message.clone(),
                ProviderError::PaymentRejected { message, .. } => {
                    format!("failed to make payment: {}", message)
                }
                ProviderError::Transport(TransportError::Timeout(_)) => {
                    "upstream provider timed out".into()
                }
                ProviderError::Transport(_) | ProviderError::Decode(_) => {
                    "upstream provider request failed".into()
                }
                ProviderError::Signing(_) => "server error, check logs".into(),
            },
        }
    }
}

/// JSON 500 for a handler that panicked. The panic text is logged only.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = %detail, "Handler panicked");

    let body = ErrorResponse {
        error: "server error, check logs".into(),
        code: "INTERNAL_ERROR",
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let err = match self {
            Self::NotImplemented { payment_id } => {
                let body = PaymentStatusResponse {
                    payment_id,
                    status: "not_implemented",
                    message: "Payment status inquiry not yet implemented",
                };
                return (status, Json(body)).into_response();
            }
            other => other,
        };

        match &err {
            Self::Provider(e) if status.is_server_error() => {
                tracing::warn!(error = %e, code, "Provider call failed");
            }
            _ => tracing::debug!(code, "Request rejected"),
        }

        let body = ErrorResponse {
            error: err.message(),
            code,
        };
        (status, Json(body)).into_response()
    }
}
