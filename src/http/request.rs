//! Inbound request handling.
//!
//! # Responsibilities
//! - Generate and propagate a request ID (UUID v4, `x-request-id`)
//! - Define the inbound JSON bodies
//! - Validate required fields before anything reaches the provider
//!
//! # Design Decisions
//! - Missing fields deserialize to empty values so the error names the field
//! - Request ID added as early as possible for tracing

use axum::http::{HeaderMap, HeaderName};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use url::Url;

use crate::http::response::ApiError;
use crate::superqi::PaymentRequest;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer assigning a fresh request ID when the client sent none.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Request ID from headers, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

fn require(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

/// Body of `POST /api/v1/apply-token`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplyTokenRequest {
    pub auth_code: String,
}

impl ApplyTokenRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&self.auth_code, "authCode")
    }
}

/// Body of `POST /api/v1/user-info` and `POST /api/v1/user-cards`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessTokenRequest {
    pub access_token: String,
}

impl AccessTokenRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&self.access_token, "accessToken")
    }
}

/// Body of `POST /api/v1/pay`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayRequest {
    pub amount: i64,
    pub request_id: String,
    pub access_token: String,
    pub customer_id: String,
    pub order_desc: String,
    pub notify_url: String,
}

impl PayRequest {
    /// Validate and convert into the provider-level payment.
    pub fn into_payment(self) -> Result<PaymentRequest, ApiError> {
        if self.amount <= 0 {
            return Err(ApiError::BadRequest("amount must be greater than 0".into()));
        }
        require(&self.request_id, "requestId")?;
        require(&self.access_token, "accessToken")?;
        require(&self.customer_id, "customerId")?;
        require(&self.order_desc, "orderDesc")?;
        require(&self.notify_url, "notifyUrl")?;

        match Url::parse(&self.notify_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ApiError::BadRequest("notifyUrl must be a valid URL".into())),
        }

        Ok(PaymentRequest {
            amount: self.amount,
            request_id: self.request_id,
            access_token: self.access_token,
            customer_id: self.customer_id,
            order_desc: self.order_desc,
            notify_url: self.notify_url,
        })
    }
}
