use crate::domain::account::Account;
use crate::domain::ports::LedgerStore;
use crate::domain::transaction::Transaction;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<HashMap<..>>>` to allow shared concurrent access. Used by
/// tests and by runs without `--db-path`, where state is lost on shutdown.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or resets an account. Accounts are provisioned out of band;
    /// this is the seeding entry point, not part of the `LedgerStore` port.
    pub async fn put_account(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.account_id.clone(), account);
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn get_account(&self, account_id: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(account_id).cloned())
    }

    async fn update_balance(&self, account_id: &str, new_balance: Decimal) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(account_id).ok_or_else(|| {
            PaymentError::Store(format!("cannot update balance of unknown account {account_id}"))
        })?;
        account.balance = new_balance;
        Ok(())
    }

    async fn insert_transaction(&self, tx: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        if transactions.contains_key(&tx.reference) {
            return Err(PaymentError::Store(format!(
                "reference {} already recorded",
                tx.reference
            )));
        }
        transactions.insert(tx.reference.clone(), tx);
        Ok(())
    }

    async fn get_transaction_by_reference(&self, reference: &str) -> Result<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(reference).cloned())
    }
}
