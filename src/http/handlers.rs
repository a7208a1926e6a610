//! Gateway endpoint handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::http::request::{AccessTokenRequest, ApplyTokenRequest, PayRequest};
use crate::http::response::{ApiError, HealthResponse, SERVICE_NAME};
use crate::http::server::AppState;
use crate::superqi::{CardListResponse, PaymentResponse, TokenResponse, UserInfoResponse};

pub async fn apply_token(
    State(state): State<AppState>,
    payload: Result<Json<ApplyTokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let response = state.client.apply_token(&request.auth_code).await?;
    Ok(Json(response))
}

pub async fn user_info(
    State(state): State<AppState>,
    payload: Result<Json<AccessTokenRequest>, JsonRejection>,
) -> Result<Json<UserInfoResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let response = state.client.inquiry_user_info(&request.access_token).await?;
    Ok(Json(response))
}

pub async fn user_cards(
    State(state): State<AppState>,
    payload: Result<Json<AccessTokenRequest>, JsonRejection>,
) -> Result<Json<CardListResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let response = state
        .client
        .inquiry_user_card_list(&request.access_token)
        .await?;
    Ok(Json(response))
}

pub async fn pay(
    State(state): State<AppState>,
    payload: Result<Json<PayRequest>, JsonRejection>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let Json(request) = payload?;
    let payment = request.into_payment()?;

    tracing::info!(
        request_id = %payment.request_id,
        amount = payment.amount,
        "Initiating payment"
    );

    let response = state.client.pay(&payment).await?;
    Ok(Json(response))
}

/// Payment status has no provider operation behind it yet.
pub async fn payment_status(Path(payment_id): Path<String>) -> ApiError {
    ApiError::NotImplemented { payment_id }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}
