//! Shared utilities for integration tests: a signature-checking mock
//! provider, a provider that never answers, and an in-process gateway.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use rsa::RsaPublicKey;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use superqi_proxy::lifecycle::shutdown::Shutdown;
use superqi_proxy::superqi::signer::{content_to_sign, verify_signature_header, CanonicalBody};
use superqi_proxy::superqi::Signer;
use superqi_proxy::{GatewayConfig, HttpServer, ProviderClient};

pub const TEST_KEY_PEM: &str = include_str!("../fixtures/signing_key.pem");
pub const TEST_CLIENT_ID: &str = "2020000000000000";

/// One request as seen by the mock provider.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub body: String,
    pub params: Value,
    pub client_id: String,
    pub request_time: String,
    pub nonce: String,
    pub content_type: String,
    /// Body bytes equal the canonical rendering of the parsed body.
    pub body_canonical: bool,
    /// `Signature` header verifies against the body that arrived.
    pub signature_valid: bool,
}

type Responder = Arc<dyn Fn(&str, &Value) -> (u16, String) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    public_key: RsaPublicKey,
    responder: Responder,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Handle to a running mock provider.
pub struct MockProvider {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("provider received no calls")
    }
}

/// Start a mock provider that verifies signatures and answers through `f`.
pub async fn start_mock_provider<F>(f: F) -> MockProvider
where
    F: Fn(&str, &Value) -> (u16, String) + Send + Sync + 'static,
{
    let signer = Signer::from_private_key(TEST_CLIENT_ID, 1, TEST_KEY_PEM).unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        public_key: signer.public_key().clone(),
        responder: Arc::new(f),
        calls: calls.clone(),
    };

    let app = Router::new().fallback(provider_handler).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockProvider { addr, calls }
}

/// Mock provider answering every operation successfully.
pub async fn start_happy_provider() -> MockProvider {
    start_mock_provider(|path, params| (200, success_body(path, params).to_string())).await
}

async fn provider_handler(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    let path = uri.path().to_string();
    let client_id = header("client-id");
    let request_time = header("request-time");

    let params: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let canonical = CanonicalBody::from_params(&params).ok();
    let body_canonical = canonical.as_ref().is_some_and(|c| c.as_str() == body);
    let signature_valid = canonical.is_some_and(|c| {
        let content = content_to_sign("POST", &path, &client_id, &request_time, &c);
        verify_signature_header(&state.public_key, &content, &header("signature")).is_ok()
    });

    state.calls.lock().unwrap().push(RecordedCall {
        path: path.clone(),
        body,
        params: params.clone(),
        client_id,
        request_time,
        nonce: header("nonce"),
        content_type: header("content-type"),
        body_canonical,
        signature_valid,
    });

    let (status, reply) = (state.responder)(&path, &params);
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(CONTENT_TYPE, "application/json")],
        reply,
    )
        .into_response()
}

/// Successful provider body for each operation path.
pub fn success_body(path: &str, params: &Value) -> Value {
    let result = json!({
        "resultCode": "SUCCESS",
        "resultStatus": "S",
        "resultMessage": "success",
    });
    match path {
        "/v1/authorizations/applyToken" => json!({
            "result": result,
            "accessToken": format!("tok-{}", params["authCode"].as_str().unwrap_or_default()),
            "accessTokenExpiryTime": "2026-12-31T00:00:00+03:00",
            "refreshToken": "refresh-1",
            "customerId": "cus-1",
        }),
        "/v1/users/inquiryUserInfo" => json!({
            "result": result,
            "userInfo": {"userId": "u-1", "nickName": "Ali"},
        }),
        "/v1/users/inquiryUserCardList" => json!({
            "result": result,
            "cardList": [{"cardNo": "6221****1234", "cardType": "DEBIT"}],
        }),
        "/v1/payments/pay" => json!({
            "result": result,
            "paymentId": "pay-1",
            "paymentTime": "2026-10-19T12:00:00+03:00",
            "paymentAmount": params["paymentAmount"].clone(),
        }),
        _ => json!({"result": {"resultCode": "UNKNOWN_PATH", "resultStatus": "F"}}),
    }
}

/// Provider body declining a payment.
pub fn rejected_pay_body(message: &str) -> Value {
    json!({
        "result": {
            "resultCode": "USER_BALANCE_NOT_ENOUGH",
            "resultStatus": "F",
            "resultMessage": message,
        }
    })
}

/// Start a provider that accepts connections and never answers.
pub async fn start_stalled_provider() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Gateway configuration pointed at `provider_url` with the fixture key.
pub fn test_config(provider_url: &str, request_timeout_ms: u64) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.provider.base_url = provider_url.to_string();
    config.provider.client_id = TEST_CLIENT_ID.into();
    config.provider.private_key = Some(TEST_KEY_PEM.into());
    config.provider.connect_timeout_ms = 1_000;
    config.provider.request_timeout_ms = request_timeout_ms;
    config
}

/// Handle to an in-process gateway.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(provider_url: &str, request_timeout_ms: u64) -> TestGateway {
    let config = test_config(provider_url, request_timeout_ms);
    let client = ProviderClient::from_config(&config.provider).unwrap();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(HttpServer::new(config, Arc::new(client)).run(listener, rx));

    TestGateway { addr, shutdown }
}
