use crate::application::{PaymentReceipt, bounded};
use crate::domain::ports::SharedLedgerStore;
use crate::error::{PaymentError, Result};
use std::time::Duration;

/// Read path: resolves a previously recorded transaction by its external
/// reference. No side effects.
pub struct QueryResolver {
    store: SharedLedgerStore,
    store_timeout: Duration,
}

impl QueryResolver {
    pub fn new(store: SharedLedgerStore, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    pub async fn get_payment(&self, reference: &str) -> Result<PaymentReceipt> {
        let tx = bounded(
            self.store_timeout,
            self.store.get_transaction_by_reference(reference),
        )
        .await?;

        tx.as_ref()
            .map(PaymentReceipt::from)
            .ok_or_else(|| PaymentError::ReferenceNotFound(reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::DEFAULT_STORE_TIMEOUT;
    use crate::domain::account::Amount;
    use crate::domain::ports::LedgerStore;
    use crate::domain::transaction::{Transaction, TransactionKind};
    use crate::infrastructure::in_memory::InMemoryLedger;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_resolves_posted_reference() {
        let ledger = InMemoryLedger::new();
        let tx = Transaction::successful(
            "acc_001",
            "ref-001",
            Amount::new(dec!(1.50)).unwrap(),
            TransactionKind::Debit,
        );
        ledger.insert_transaction(tx).await.unwrap();

        let resolver = QueryResolver::new(Arc::new(ledger), DEFAULT_STORE_TIMEOUT);
        let receipt = resolver.get_payment("ref-001").await.unwrap();
        assert_eq!(receipt.account_id, "acc_001");
        assert_eq!(receipt.reference, "ref-001");
        assert_eq!(receipt.amount, dec!(1.50));
    }

    #[tokio::test]
    async fn test_unknown_reference() {
        let resolver = QueryResolver::new(
            Arc::new(InMemoryLedger::new()),
            DEFAULT_STORE_TIMEOUT,
        );
        let result = resolver.get_payment("ref-missing").await;
        assert!(matches!(result, Err(PaymentError::ReferenceNotFound(_))));
    }
}
