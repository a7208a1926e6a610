use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /api/v1/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    pub amount: i64,
    pub request_id: String,
    pub access_token: String,
    pub customer_id: String,
    pub order_desc: String,
    pub notify_url: String,
}

/// Status and JSON body returned by the gateway.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub status: u16,
    pub body: Value,
    pub request_id: Option<String>,
}

impl GatewayReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of an error body.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self {
            client: Client::new(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchange an auth code for tokens.
    pub async fn apply_token(&self, auth_code: &str) -> Result<GatewayReply, reqwest::Error> {
        self.post("/api/v1/apply-token", &json!({ "authCode": auth_code }))
            .await
    }

    pub async fn user_info(&self, access_token: &str) -> Result<GatewayReply, reqwest::Error> {
        self.post("/api/v1/user-info", &json!({ "accessToken": access_token }))
            .await
    }

    pub async fn user_cards(&self, access_token: &str) -> Result<GatewayReply, reqwest::Error> {
        self.post("/api/v1/user-cards", &json!({ "accessToken": access_token }))
            .await
    }

    pub async fn pay(&self, req: &PayRequest) -> Result<GatewayReply, reqwest::Error> {
        self.post("/api/v1/pay", req).await
    }

    pub async fn payment_status(&self, payment_id: &str) -> Result<GatewayReply, reqwest::Error> {
        self.get(&format!("/api/v1/payment/{}/status", payment_id))
            .await
    }

    pub async fn health(&self) -> Result<GatewayReply, reqwest::Error> {
        self.get("/api/v1/health").await
    }

    /// POST an arbitrary JSON body, for callers exercising validation.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<GatewayReply, reqwest::Error> {
        let resp = self
            .client
            .post(format!("{}{}", self.gateway_url, path))
            .json(body)
            .send()
            .await?;
        Self::into_reply(resp).await
    }

    /// POST a raw string body with a JSON content type.
    pub async fn post_raw(&self, path: &str, body: &str) -> Result<GatewayReply, reqwest::Error> {
        let resp = self
            .client
            .post(format!("{}{}", self.gateway_url, path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await?;
        Self::into_reply(resp).await
    }

    async fn get(&self, path: &str) -> Result<GatewayReply, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}{}", self.gateway_url, path))
            .send()
            .await?;
        Self::into_reply(resp).await
    }

    async fn into_reply(resp: reqwest::Response) -> Result<GatewayReply, reqwest::Error> {
        let status = resp.status().as_u16();
        let request_id = resp
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = resp.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Ok(GatewayReply {
            status,
            body,
            request_id,
        })
    }
}
