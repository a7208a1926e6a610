//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require provider credentials (missing credentials are fatal at startup)
//! - Validate value ranges (timeouts > 0, addresses parse, provider
//!   deadline shorter than the inbound one)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let provider = &config.provider;

    if provider.base_url.trim().is_empty() {
        errors.push(ValidationError::new("provider.base_url", "is required"));
    } else {
        match Url::parse(&provider.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "provider.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "provider.base_url",
                format!("invalid URL: {}", e),
            )),
        }
    }

    if provider.client_id.trim().is_empty() {
        errors.push(ValidationError::new("provider.client_id", "is required"));
    }

    if !provider.has_private_key() {
        errors.push(ValidationError::new(
            "provider.private_key",
            "either private_key or private_key_path is required",
        ));
    }

    if provider.connect_timeout_ms == 0 {
        errors.push(ValidationError::new("provider.connect_timeout_ms", "must be > 0"));
    }
    if provider.request_timeout_ms == 0 {
        errors.push(ValidationError::new("provider.request_timeout_ms", "must be > 0"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    // Provider deadline fires before the inbound TimeoutLayer.
    let inbound_ms = config.timeouts.request_secs.saturating_mul(1000);
    if inbound_ms > 0 && provider.request_timeout_ms >= inbound_ms {
        errors.push(ValidationError::new(
            "provider.request_timeout_ms",
            format!("must be below timeouts.request_secs ({} ms)", inbound_ms),
        ));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be > 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
