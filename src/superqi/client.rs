//! SuperQi provider client.
//!
//! # Responsibilities
//! - Build the parameter map for each operation
//! - Sign it, send it once, decode the typed response
//! - Surface `resultStatus == "F"` on pay as a distinct failure
//!
//! The client holds only immutable credentials and a transport, so a single
//! instance is shared across tasks behind an `Arc` without locking.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::schema::ProviderConfig;
use crate::observability::metrics;
use crate::superqi::error::{ProviderError, ProviderResult, TransportError};
use crate::superqi::request::RequestBuilder;
use crate::superqi::signer::Signer;
use crate::superqi::transport::{HttpTransport, Transport};
use crate::superqi::types::{
    CardListResponse, PayOutcome, PaymentRequest, PaymentResponse, ProductCode, TokenResponse,
    UserInfoResponse, AMOUNT_SCALE, CURRENCY_IQD, GRANT_TYPE_AUTHORIZATION_CODE,
};

pub const PATH_APPLY_TOKEN: &str = "/v1/authorizations/applyToken";
pub const PATH_INQUIRY_USER_INFO: &str = "/v1/users/inquiryUserInfo";
pub const PATH_INQUIRY_USER_CARD_LIST: &str = "/v1/users/inquiryUserCardList";
pub const PATH_PAY: &str = "/v1/payments/pay";

const METHOD_POST: &str = "POST";

/// Client for the four SuperQi operations.
pub struct ProviderClient<T = HttpTransport> {
    signer: Signer,
    transport: T,
}

impl ProviderClient<HttpTransport> {
    /// Build a client from configuration.
    ///
    /// Fails when credentials are missing or the key is malformed; callers
    /// treat this as fatal at startup.
    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        let private_key = config.load_private_key()?;
        let signer = Signer::from_private_key(&config.client_id, config.key_version, &private_key)?;
        let transport = HttpTransport::new(
            &config.base_url,
            Duration::from_millis(config.connect_timeout_ms),
            Duration::from_millis(config.request_timeout_ms),
        )?;

        tracing::info!(
            base_url = %config.base_url,
            client_id = %config.client_id,
            timeout_ms = config.request_timeout_ms,
            "SuperQi client initialized"
        );

        Ok(Self::new(signer, transport))
    }
}

impl<T: Transport> ProviderClient<T> {
    pub fn new(signer: Signer, transport: T) -> Self {
        Self { signer, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exchange an authorization code for an access token.
    pub async fn apply_token(&self, auth_code: &str) -> ProviderResult<TokenResponse> {
        let params = json!({
            "grantType": GRANT_TYPE_AUTHORIZATION_CODE,
            "authCode": auth_code,
        });
        self.call("apply_token", PATH_APPLY_TOKEN, &params).await
    }

    /// Fetch the user profile for an access token.
    pub async fn inquiry_user_info(&self, access_token: &str) -> ProviderResult<UserInfoResponse> {
        let params = json!({ "accessToken": access_token });
        self.call("inquiry_user_info", PATH_INQUIRY_USER_INFO, &params)
            .await
    }

    /// Fetch the user's cards for an access token.
    pub async fn inquiry_user_card_list(
        &self,
        access_token: &str,
    ) -> ProviderResult<CardListResponse> {
        let params = json!({ "accessToken": access_token });
        self.call("inquiry_user_card_list", PATH_INQUIRY_USER_CARD_LIST, &params)
            .await
    }

    /// Initiate a payment, returning the business outcome as a value.
    ///
    /// The request id is forwarded as-is; no deduplication happens here.
    pub async fn pay_outcome(&self, payment: &PaymentRequest) -> ProviderResult<PayOutcome> {
        let params = match pay_params(payment) {
            Ok(params) => params,
            Err(e) => {
                metrics::record_provider_call("pay", "invalid", Instant::now());
                return Err(e);
            }
        };
        let response: PaymentResponse = self.call("pay", PATH_PAY, &params).await?;

        let outcome = PayOutcome::from(response);
        if let PayOutcome::Rejected { code, message } = &outcome {
            tracing::warn!(
                request_id = %payment.request_id,
                code = ?code,
                message = %message,
                "Payment rejected by provider"
            );
        }
        Ok(outcome)
    }

    /// Initiate a payment; a provider rejection is returned as
    /// [`ProviderError::PaymentRejected`].
    pub async fn pay(&self, payment: &PaymentRequest) -> ProviderResult<PaymentResponse> {
        match self.pay_outcome(payment).await? {
            PayOutcome::Success(response) => Ok(response),
            PayOutcome::Rejected { code, message } => {
                Err(ProviderError::PaymentRejected { code, message })
            }
        }
    }

    async fn call<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &'static str,
        params: &Value,
    ) -> ProviderResult<R> {
        let start = Instant::now();
        let result = self.call_inner(operation, path, params).await;
        metrics::record_provider_call(operation, outcome_label(&result), start);
        result
    }

    async fn call_inner<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &'static str,
        params: &Value,
    ) -> ProviderResult<R> {
        let request = RequestBuilder::new(&self.signer).build(METHOD_POST, path, params)?;

        tracing::debug!(
            operation,
            path,
            nonce = request.nonce().unwrap_or_default(),
            "Calling SuperQi"
        );

        let raw = self.transport.send(&request).await.map_err(|e| {
            tracing::error!(operation, path, error = %e, "SuperQi request failed");
            ProviderError::from(e)
        })?;

        serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!(operation, path, error = %e, "Failed to decode SuperQi response");
            ProviderError::Decode(format!("{} response: {}", operation, e))
        })
    }
}

impl<T> std::fmt::Debug for ProviderClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("signer", &self.signer)
            .finish()
    }
}

/// Build the `pay` parameter map, scaling the amount to provider units.
pub fn pay_params(payment: &PaymentRequest) -> ProviderResult<Value> {
    if payment.amount <= 0 {
        return Err(ProviderError::InvalidRequest(
            "amount must be greater than 0".into(),
        ));
    }
    let scaled = payment.amount.checked_mul(AMOUNT_SCALE).ok_or_else(|| {
        ProviderError::InvalidRequest(format!("amount {} is too large", payment.amount))
    })?;

    Ok(json!({
        "paymentAuthCode": payment.access_token,
        "paymentAmount": {
            "currency": CURRENCY_IQD,
            "value": scaled.to_string(),
        },
        "productCode": ProductCode::OnlinePurchase.as_str(),
        "paymentRequestId": payment.request_id,
        "paymentOrderTitle": payment.order_desc,
        "order": {
            "orderDescription": payment.order_desc,
            "buyer": {
                "referenceBuyerId": payment.customer_id,
            },
        },
        "paymentNotifyUrl": payment.notify_url,
    }))
}

fn outcome_label<R>(result: &ProviderResult<R>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(ProviderError::Transport(TransportError::Timeout(_))) => "timeout",
        Err(ProviderError::Transport(_)) => "transport_error",
        Err(ProviderError::Decode(_)) => "decode_error",
        Err(ProviderError::Signing(_)) => "signing_error",
        Err(ProviderError::PaymentRejected { .. }) => "rejected",
        Err(ProviderError::InvalidRequest(_)) => "invalid",
    }
}
