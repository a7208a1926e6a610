//! HTTP transport to the provider.
//!
//! # Design Decisions
//! - One attempt per call; retry policy belongs to the caller
//! - Every call is bounded by `tokio::time::timeout`, dropping the future
//!   cancels the in-flight request
//! - Non-2xx is a transport failure; business failures arrive as 200

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::superqi::error::TransportError;
use crate::superqi::request::SignedRequest;

/// Sends a signed request and returns the raw response body.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &SignedRequest,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// `reqwest`-backed transport against the provider base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout_duration: Duration,
}

impl HttpTransport {
    /// Create a transport for `base_url` with a per-call deadline.
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_duration: request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_duration
    }

    async fn send_once(&self, request: &SignedRequest) -> Result<Vec<u8>, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::Network(format!("invalid method: {}", e)))?;

        let mut builder = self
            .client
            .request(method, &url)
            .body(request.body.as_str().to_owned());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(format!("failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &SignedRequest) -> Result<Vec<u8>, TransportError> {
        match timeout(self.timeout_duration, self.send_once(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    path = %request.path,
                    timeout_ms = self.timeout_duration.as_millis() as u64,
                    "Provider request timed out"
                );
                Err(TransportError::Timeout(self.timeout_duration))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = HttpTransport::new(
            "https://provider.example/gateway/",
            Duration::from_secs(1),
            Duration::from_secs(2),
        )
        .unwrap();
        assert_eq!(transport.base_url(), "https://provider.example/gateway");
        assert_eq!(transport.timeout(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_network_error() {
        use crate::superqi::request::RequestBuilder;
        use crate::superqi::signer::tests::test_signer;

        // Port 9 (discard) on localhost is closed in test environments.
        let transport = HttpTransport::new(
            "http://127.0.0.1:9",
            Duration::from_millis(500),
            Duration::from_secs(2),
        )
        .unwrap();
        let signer = test_signer();
        let request = RequestBuilder::new(&signer)
            .build("POST", "/v1/users/inquiryUserInfo", &serde_json::json!({"accessToken": "t"}))
            .unwrap();

        let err = transport.send(&request).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)), "got {:?}", err);
    }
}
