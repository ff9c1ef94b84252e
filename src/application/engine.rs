use crate::application::{PaymentReceipt, bounded};
use crate::domain::account::Amount;
use crate::domain::ports::SharedLedgerStore;
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Orchestrates a single payment: validates the request, loads the account,
/// computes the new balance, persists the transaction, then persists the
/// balance.
///
/// Mutations for one account are serialized through a per-account mutex so
/// two concurrent posts cannot both read the same starting balance and lose
/// a movement. The two writes remain separate store operations: if the
/// balance write fails after the transaction insert succeeded, the engine
/// surfaces `BalanceUpdate` distinctly and leaves the durable transaction in
/// place for reconciliation.
pub struct PaymentEngine {
    store: SharedLedgerStore,
    store_timeout: Duration,
    account_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PaymentEngine {
    pub fn new(store: SharedLedgerStore, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
            account_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Posts a debit or credit against `account_id`.
    ///
    /// Replaying a reference is a no-op: the receipt of the original
    /// transaction is returned and no second movement happens.
    pub async fn post_payment(
        &self,
        account_id: &str,
        reference: &str,
        amount: Decimal,
        kind: TransactionKind,
    ) -> Result<PaymentReceipt> {
        let amount = Amount::new(amount)?;

        let lock = self.account_lock(account_id).await;
        let guard = lock.lock().await;
        let result = self.post_under_lock(account_id, reference, amount, kind).await;
        drop(guard);
        self.release_account_lock(account_id, lock).await;

        result
    }

    async fn post_under_lock(
        &self,
        account_id: &str,
        reference: &str,
        amount: Amount,
        kind: TransactionKind,
    ) -> Result<PaymentReceipt> {
        if let Some(existing) = bounded(
            self.store_timeout,
            self.store.get_transaction_by_reference(reference),
        )
        .await?
        {
            tracing::info!(reference, "duplicate reference, returning original receipt");
            return Ok(PaymentReceipt::from(&existing));
        }

        let account = bounded(self.store_timeout, self.store.get_account(account_id))
            .await?
            .ok_or_else(|| PaymentError::AccountNotFound(account_id.to_string()))?;

        let new_balance = match kind {
            TransactionKind::Debit => account.debited(amount)?,
            TransactionKind::Credit => account.credited(amount),
        };

        let tx = Transaction::successful(account_id, reference, amount, kind);
        let receipt = PaymentReceipt::from(&tx);

        bounded(self.store_timeout, self.store.insert_transaction(tx))
            .await
            .map_err(|err| PaymentError::TransactionPersist(err.to_string()))?;

        // From here on a SUCCESS transaction is durable. A failed balance
        // write leaves the ledger and the balance disagreeing; the distinct
        // variant is what lets operators find and reconcile that window.
        bounded(
            self.store_timeout,
            self.store.update_balance(account_id, new_balance),
        )
        .await
        .map_err(|err| PaymentError::BalanceUpdate(err.to_string()))?;

        tracing::info!(account_id, reference, %new_balance, "payment posted");
        Ok(receipt)
    }

    async fn account_lock(&self, account_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.account_locks.lock().await;
        locks.entry(account_id.to_string()).or_default().clone()
    }

    /// Drops this call's handle and removes the registry entry once nothing
    /// else holds it, so posts naming unknown accounts cannot grow the map
    /// without bound. The registry mutex is held while checking the strong
    /// count, which keeps `account_lock` from handing out a new clone in
    /// between.
    async fn release_account_lock(&self, account_id: &str, lock: Arc<Mutex<()>>) {
        drop(lock);
        let mut locks = self.account_locks.lock().await;
        if let Some(entry) = locks.get(account_id)
            && Arc::strong_count(entry) == 1
        {
            locks.remove(account_id);
        }
    }
}
