use crate::domain::account::Account;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Durable ledger persistence as the core consumes it.
///
/// Each operation is a single atomic unit against its own record; the store
/// gives no cross-record atomicity between a transaction insert and a balance
/// update. Absence is reported as `Ok(None)` so callers can map it to a 404,
/// while every other failure is a `PaymentError::Store`.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get_account(&self, account_id: &str) -> Result<Option<Account>>;
    async fn update_balance(&self, account_id: &str, new_balance: Decimal) -> Result<()>;
    /// Inserting a reference that already exists is a store error; references
    /// are unique per logical payment.
    async fn insert_transaction(&self, tx: Transaction) -> Result<()>;
    async fn get_transaction_by_reference(&self, reference: &str) -> Result<Option<Transaction>>;
}

/// Shared handle passed explicitly into the engine and resolver constructors.
pub type SharedLedgerStore = Arc<dyn LedgerStore>;
