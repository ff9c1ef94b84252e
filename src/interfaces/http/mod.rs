//! HTTP boundary: routing, request decoding, and the error-to-status
//! translation. All engine and resolver errors are handled here; none are
//! fatal to the process.

pub mod payloads;
mod payments;

use crate::application::{PaymentEngine, QueryResolver};
use crate::error::PaymentError;
use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use payloads::ErrorResponse;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PaymentEngine>,
    pub resolver: Arc<QueryResolver>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/third-party/payments", post(payments::post_payment))
        .route("/third-party/payments/{reference}", get(payments::get_payment))
        .with_state(state)
}

pub async fn serve(state: AppState, listener: tokio::net::TcpListener) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, router(state)).await
}

async fn welcome() -> &'static str {
    "welcome to the payment posting service"
}

pub struct ApiError(PaymentError);

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

fn status_for(err: &PaymentError) -> StatusCode {
    match err {
        PaymentError::Validation(_) => StatusCode::BAD_REQUEST,
        PaymentError::AccountNotFound(_) | PaymentError::ReferenceNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        // a rejected debit is the client's problem, not the server's
        PaymentError::InsufficientFunds(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PaymentError::TransactionPersist(_)
        | PaymentError::BalanceUpdate(_)
        | PaymentError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self.0 {
            PaymentError::TransactionPersist(detail)
            | PaymentError::BalanceUpdate(detail)
            | PaymentError::Store(detail) => {
                tracing::error!(%detail, "store failure: {}", self.0);
            }
            _ => {}
        }

        let status = status_for(&self.0);
        let body = ErrorResponse {
            error_message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
