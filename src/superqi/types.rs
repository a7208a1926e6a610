//! Provider request and response models.
//!
//! Response types keep any field they do not name in `extra`, so the gateway
//! passes provider payloads through unmodified.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Currency the provider settles in.
pub const CURRENCY_IQD: &str = "IQD";

/// Scaling from caller amount to provider minor units.
pub const AMOUNT_SCALE: i64 = 1000;

/// Grant type for the authorization-code exchange.
pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "AUTHORIZATION_CODE";

/// Provider product codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCode {
    OnlinePurchase,
    AgreementPayment,
    OnlinePurchaseAuthCapture,
}

impl ProductCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OnlinePurchase => "51051000101000000011",
            Self::AgreementPayment => "51051000101000100031",
            Self::OnlinePurchaseAuthCapture => "51051000101000000012",
        }
    }
}

/// Provider `resultStatus` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Success,
    Failure,
    Unknown,
}

impl ResultStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "S" => Self::Success,
            "F" => Self::Failure,
            _ => Self::Unknown,
        }
    }
}

/// Common `result` block on every provider response.
///
/// Only the status is interpreted; everything else is carried as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultInfo {
    pub fn status(&self) -> ResultStatus {
        ResultStatus::parse(self.result_status.as_deref().unwrap_or_default())
    }
}

/// Response to `applyToken`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_expiry_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_expiry_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response to `inquiryUserInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response to `inquiryUserCardList`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_list: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response to `pay`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Kept untyped; providers send `value` as a string or a number.
    pub payment_amount: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Caller-supplied payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Positive amount in whole units; scaled by [`AMOUNT_SCALE`] on the wire.
    pub amount: i64,
    /// Idempotency key forwarded as `paymentRequestId`.
    pub request_id: String,
    pub access_token: String,
    pub customer_id: String,
    pub order_desc: String,
    pub notify_url: String,
}

/// Business outcome of a pay call.
#[derive(Debug, Clone, PartialEq)]
pub enum PayOutcome {
    Success(PaymentResponse),
    Rejected {
        code: Option<String>,
        message: String,
    },
}

impl PaymentResponse {
    /// Status of the `result` block; a missing block counts as unknown.
    pub fn status(&self) -> ResultStatus {
        self.result
            .as_ref()
            .map_or(ResultStatus::Unknown, ResultInfo::status)
    }
}

impl From<PaymentResponse> for PayOutcome {
    fn from(response: PaymentResponse) -> Self {
        match response.status() {
            ResultStatus::Failure => {
                let result = response.result.unwrap_or_default();
                Self::Rejected {
                    code: result.result_code.filter(|c| !c.is_empty()),
                    message: result.result_message.unwrap_or_default(),
                }
            }
            ResultStatus::Success | ResultStatus::Unknown => Self::Success(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_pass_through() {
        let raw = json!({
            "result": {"resultCode": "SUCCESS", "resultStatus": "S", "resultMessage": "Success"},
            "accessToken": "at",
            "customerId": "cus-1",
            "extendInfo": {"tier": "gold"},
        });
        let token: TokenResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(token.access_token.as_deref(), Some("at"));
        assert_eq!(token.extra.get("extendInfo"), Some(&json!({"tier": "gold"})));
        assert_eq!(serde_json::to_value(&token).unwrap(), raw);
    }

    #[test]
    fn test_pay_outcome_from_status() {
        let rejected: PaymentResponse = serde_json::from_value(json!({
            "result": {"resultCode": "USER_BALANCE_NOT_ENOUGH", "resultStatus": "F", "resultMessage": "insufficient funds"}
        }))
        .unwrap();
        assert_eq!(
            PayOutcome::from(rejected),
            PayOutcome::Rejected {
                code: Some("USER_BALANCE_NOT_ENOUGH".into()),
                message: "insufficient funds".into(),
            }
        );

        let pending: PaymentResponse = serde_json::from_value(json!({
            "result": {"resultStatus": "U", "resultMessage": "processing"}
        }))
        .unwrap();
        assert!(matches!(PayOutcome::from(pending), PayOutcome::Success(_)));
    }

    #[test]
    fn test_sparse_success_body_unchanged() {
        let raw = r#"{"paymentId":"p1","result":{"resultStatus":"S"}}"#;
        let response: PaymentResponse = serde_json::from_str(raw).unwrap();
        let out = serde_json::to_value(&response).unwrap();
        assert_eq!(out, serde_json::from_str::<Value>(raw).unwrap());
        assert!(out["result"].get("resultCode").is_none());
        assert!(out["result"].get("resultMessage").is_none());
    }

    #[test]
    fn test_result_block_keeps_unknown_fields() {
        let raw = json!({
            "result": {"resultStatus": "S", "resultCode": "SUCCESS", "traceId": "0b1c"},
        });
        let response: PaymentResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            response.result.as_ref().unwrap().extra.get("traceId"),
            Some(&json!("0b1c"))
        );
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);
    }

    #[test]
    fn test_numeric_amount_value_accepted() {
        let raw = json!({
            "result": {"resultStatus": "S"},
            "paymentId": "p1",
            "paymentAmount": {"currency": "IQD", "value": 5000},
        });
        let response: PaymentResponse = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(PayOutcome::from(response.clone()), PayOutcome::Success(_)));
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);
    }

    #[test]
    fn test_missing_result_block_is_not_a_rejection() {
        let response: PaymentResponse = serde_json::from_value(json!({"paymentId": "p1"})).unwrap();
        assert_eq!(response.status(), ResultStatus::Unknown);
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({"paymentId": "p1"}));
    }

    #[test]
    fn test_product_codes() {
        assert_eq!(ProductCode::OnlinePurchase.as_str(), "51051000101000000011");
        assert_ne!(
            ProductCode::AgreementPayment.as_str(),
            ProductCode::OnlinePurchaseAuthCapture.as_str()
        );
    }
}
