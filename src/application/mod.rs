//! Application layer orchestrating payments against the ledger store.
//!
//! The `PaymentEngine` owns the money-movement logic; the `QueryResolver`
//! serves the read path. Neither depends on the other — they only share the
//! `LedgerStore` handle.

pub mod engine;
pub mod query;

pub use engine::PaymentEngine;
pub use query::QueryResolver;

use crate::domain::transaction::Transaction;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::future::Future;
use std::time::Duration;

/// Bounds a store call; a timed-out call is a `Store` error, never silently
/// retried. Both the engine and the resolver go through here so the
/// translation cannot drift between the two paths.
pub(crate) async fn bounded<T>(
    store_timeout: Duration,
    op: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(store_timeout, op).await {
        Ok(result) => result,
        Err(_) => Err(PaymentError::Store(
            "store operation timed out".to_string(),
        )),
    }
}

/// What both operations hand back to the caller: the projection of a
/// transaction that the wire contract exposes. `kind`, `status` and
/// `created_at` deliberately stay internal.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub account_id: String,
    pub reference: String,
    pub amount: Decimal,
}

impl From<&Transaction> for PaymentReceipt {
    fn from(tx: &Transaction) -> Self {
        Self {
            account_id: tx.account_id.clone(),
            reference: tx.reference.clone(),
            amount: tx.amount,
        }
    }
}
