//! Payment endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::Deserialize;

use super::{ApiError, AppState};
use super::payloads::{PaymentResponse, PostPaymentRequest};
use crate::domain::transaction::TransactionKind;
use crate::error::PaymentError;

#[derive(Debug, Deserialize)]
pub struct PaymentTypeParam {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// `POST /third-party/payments?type=debit|credit`
pub async fn post_payment(
    State(state): State<AppState>,
    Query(params): Query<PaymentTypeParam>,
    payload: Result<Json<PostPaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentResponse>, ApiError> {
    // malformed bodies are rejected before any store access
    let Json(payload) =
        payload.map_err(|rejection| PaymentError::Validation(rejection.body_text()))?;

    let kind = params
        .kind
        .as_deref()
        .and_then(TransactionKind::from_param)
        .ok_or_else(|| {
            PaymentError::Validation(format!(
                "unknown payment type {:?}, expected \"debit\" or \"credit\"",
                params.kind.as_deref().unwrap_or("")
            ))
        })?;

    let receipt = state
        .engine
        .post_payment(&payload.account_id, &payload.reference, payload.amount, kind)
        .await?;

    Ok(Json(PaymentResponse::from(receipt)))
}

/// `GET /third-party/payments/{reference}`
pub async fn get_payment(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let receipt = state.resolver.get_payment(&reference).await?;
    Ok(Json(PaymentResponse::from(receipt)))
}
