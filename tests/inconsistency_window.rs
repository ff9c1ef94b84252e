//! When the transaction insert succeeds but the balance write fails, the
//! ledger and the balance disagree. The engine must surface that failure
//! distinctly and leave the stored transaction retrievable, so the window can
//! be reconciled instead of hidden.

use async_trait::async_trait;
use payment_ledger::application::engine::DEFAULT_STORE_TIMEOUT;
use payment_ledger::application::{PaymentEngine, QueryResolver};
use payment_ledger::domain::account::Account;
use payment_ledger::domain::ports::LedgerStore;
use payment_ledger::domain::transaction::{Transaction, TransactionKind, TransactionStatus};
use payment_ledger::error::{PaymentError, Result};
use payment_ledger::infrastructure::in_memory::InMemoryLedger;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Delegates everything to an in-memory ledger except balance writes, which
/// always fail.
struct BalanceWriteFails {
    inner: InMemoryLedger,
}

#[async_trait]
impl LedgerStore for BalanceWriteFails {
    async fn get_account(&self, account_id: &str) -> Result<Option<Account>> {
        self.inner.get_account(account_id).await
    }

    async fn update_balance(&self, _account_id: &str, _new_balance: Decimal) -> Result<()> {
        Err(PaymentError::Store("disk on fire".to_string()))
    }

    async fn insert_transaction(&self, tx: Transaction) -> Result<()> {
        self.inner.insert_transaction(tx).await
    }

    async fn get_transaction_by_reference(&self, reference: &str) -> Result<Option<Transaction>> {
        self.inner.get_transaction_by_reference(reference).await
    }
}

#[tokio::test]
async fn failed_balance_write_is_surfaced_distinctly() {
    let inner = InMemoryLedger::new();
    inner
        .put_account(Account::new("acc_001", dec!(10.0)))
        .await
        .unwrap();
    let store = Arc::new(BalanceWriteFails {
        inner: inner.clone(),
    });

    let engine = PaymentEngine::new(store.clone(), DEFAULT_STORE_TIMEOUT);
    let result = engine
        .post_payment("acc_001", "ref-001", dec!(1.50), TransactionKind::Debit)
        .await;

    // distinct variant, not collapsed into a generic failure
    assert!(matches!(result, Err(PaymentError::BalanceUpdate(_))));

    // the SUCCESS transaction is durable and independently retrievable
    let resolver = QueryResolver::new(store, DEFAULT_STORE_TIMEOUT);
    let receipt = resolver.get_payment("ref-001").await.unwrap();
    assert_eq!(receipt.amount, dec!(1.50));

    let tx = inner
        .get_transaction_by_reference("ref-001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tx.status, TransactionStatus::Success);

    // while the balance never moved
    let account = inner.get_account("acc_001").await.unwrap().unwrap();
    assert_eq!(account.balance, dec!(10.0));
}

/// Delegates everything except transaction inserts, which always fail.
struct InsertFails {
    inner: InMemoryLedger,
}

#[async_trait]
impl LedgerStore for InsertFails {
    async fn get_account(&self, account_id: &str) -> Result<Option<Account>> {
        self.inner.get_account(account_id).await
    }

    async fn update_balance(&self, account_id: &str, new_balance: Decimal) -> Result<()> {
        self.inner.update_balance(account_id, new_balance).await
    }

    async fn insert_transaction(&self, _tx: Transaction) -> Result<()> {
        Err(PaymentError::Store("disk on fire".to_string()))
    }

    async fn get_transaction_by_reference(&self, reference: &str) -> Result<Option<Transaction>> {
        self.inner.get_transaction_by_reference(reference).await
    }
}

#[tokio::test]
async fn failed_insert_leaves_balance_untouched() {
    let inner = InMemoryLedger::new();
    inner
        .put_account(Account::new("acc_001", dec!(10.0)))
        .await
        .unwrap();
    let store = Arc::new(InsertFails {
        inner: inner.clone(),
    });

    let engine = PaymentEngine::new(store, DEFAULT_STORE_TIMEOUT);
    let result = engine
        .post_payment("acc_001", "ref-001", dec!(1.50), TransactionKind::Debit)
        .await;

    assert!(matches!(result, Err(PaymentError::TransactionPersist(_))));

    // the system stays consistent at the cost of a rejected payment
    let account = inner.get_account("acc_001").await.unwrap().unwrap();
    assert_eq!(account.balance, dec!(10.0));
}
