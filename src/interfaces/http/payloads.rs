//! Wire shapes. Field names are the contract; amounts travel as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::PaymentReceipt;

#[derive(Debug, Serialize, Deserialize)]
pub struct PostPaymentRequest {
    pub account_id: String,
    pub reference: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub account_id: String,
    pub reference: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<PaymentReceipt> for PaymentResponse {
    fn from(receipt: PaymentReceipt) -> Self {
        Self {
            account_id: receipt.account_id,
            reference: receipt.reference,
            amount: receipt.amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}
