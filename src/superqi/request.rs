//! Outbound request assembly.
//!
//! # Responsibilities
//! - Render the canonical body once
//! - Stamp a fresh request time and nonce
//! - Attach the signature and the fixed provider headers
//!
//! Nothing is retained between builds; concurrent calls share only the
//! immutable [`Signer`].

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::superqi::error::ProviderResult;
use crate::superqi::signer::{CanonicalBody, Signer};

pub const HEADER_CLIENT_ID: &str = "Client-Id";
pub const HEADER_REQUEST_TIME: &str = "Request-Time";
pub const HEADER_NONCE: &str = "Nonce";
pub const HEADER_SIGNATURE: &str = "Signature";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

/// A fully signed request, ready for the transport.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: String,
    pub path: String,
    pub body: CanonicalBody,
    pub headers: Vec<(&'static str, String)>,
}

impl SignedRequest {
    /// Look up a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn nonce(&self) -> Option<&str> {
        self.header(HEADER_NONCE)
    }
}

/// Builds signed requests for a given signer.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    signer: &'a Signer,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(signer: &'a Signer) -> Self {
        Self { signer }
    }

    /// Build the provider header set for `method`/`path`/`params`.
    pub fn build(&self, method: &str, path: &str, params: &Value) -> ProviderResult<SignedRequest> {
        let request_time = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let nonce = Uuid::new_v4().to_string();
        self.build_at(method, path, params, request_time, nonce)
    }

    /// Same as [`build`](Self::build) with an explicit time and nonce.
    pub fn build_at(
        &self,
        method: &str,
        path: &str,
        params: &Value,
        request_time: String,
        nonce: String,
    ) -> ProviderResult<SignedRequest> {
        let body = CanonicalBody::from_params(params)?;
        let signature = self.signer.sign(method, path, &request_time, &body)?;

        let headers = vec![
            (HEADER_CLIENT_ID, self.signer.client_id().to_string()),
            (HEADER_REQUEST_TIME, request_time),
            (HEADER_NONCE, nonce),
            (HEADER_SIGNATURE, signature),
            (HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON.to_string()),
        ];

        Ok(SignedRequest {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
            body,
            headers,
        })
    }
}
