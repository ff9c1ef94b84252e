use crate::domain::account::Account;
use crate::domain::ports::LedgerStore;
use crate::domain::transaction::Transaction;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::Arc;

/// Column Family for account records.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family for the transaction ledger.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent ledger backed by RocksDB.
///
/// Accounts and transactions live in separate Column Families, keyed by
/// `account_id` and `reference` respectively, with `serde_json` values.
/// `Clone` shares the underlying `Arc<DB>`, so one handle serves all
/// requests.
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
}

impl RocksDbLedger {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// both column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_transactions])
            .map_err(|err| PaymentError::Store(err.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Creates or resets an account. Seeding entry point, not part of the
    /// `LedgerStore` port.
    pub async fn put_account(&self, account: Account) -> Result<()> {
        let cf = self.cf(CF_ACCOUNTS)?;
        let value = serde_json::to_vec(&account)
            .map_err(|err| PaymentError::Store(format!("serialization error: {err}")))?;
        self.db
            .put_cf(cf, account.account_id.as_bytes(), value)
            .map_err(|err| PaymentError::Store(err.to_string()))
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| PaymentError::Store(format!("{name} column family not found")))
    }

    fn read_account(&self, account_id: &str) -> Result<Option<Account>> {
        let cf = self.cf(CF_ACCOUNTS)?;
        let bytes = self
            .db
            .get_cf(cf, account_id.as_bytes())
            .map_err(|err| PaymentError::Store(err.to_string()))?;

        match bytes {
            Some(bytes) => {
                let account = serde_json::from_slice(&bytes)
                    .map_err(|err| PaymentError::Store(format!("deserialization error: {err}")))?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl LedgerStore for RocksDbLedger {
    async fn get_account(&self, account_id: &str) -> Result<Option<Account>> {
        self.read_account(account_id)
    }

    async fn update_balance(&self, account_id: &str, new_balance: Decimal) -> Result<()> {
        let mut account = self.read_account(account_id)?.ok_or_else(|| {
            PaymentError::Store(format!("cannot update balance of unknown account {account_id}"))
        })?;
        account.balance = new_balance;

        let cf = self.cf(CF_ACCOUNTS)?;
        let value = serde_json::to_vec(&account)
            .map_err(|err| PaymentError::Store(format!("serialization error: {err}")))?;
        self.db
            .put_cf(cf, account_id.as_bytes(), value)
            .map_err(|err| PaymentError::Store(err.to_string()))
    }

    async fn insert_transaction(&self, tx: Transaction) -> Result<()> {
        let cf = self.cf(CF_TRANSACTIONS)?;

        // reference uniqueness is enforced here as well as in the engine
        let existing = self
            .db
            .get_pinned_cf(cf, tx.reference.as_bytes())
            .map_err(|err| PaymentError::Store(err.to_string()))?;
        if existing.is_some() {
            return Err(PaymentError::Store(format!(
                "reference {} already recorded",
                tx.reference
            )));
        }

        let value = serde_json::to_vec(&tx)
            .map_err(|err| PaymentError::Store(format!("serialization error: {err}")))?;
        self.db
            .put_cf(cf, tx.reference.as_bytes(), value)
            .map_err(|err| PaymentError::Store(err.to_string()))
    }

    async fn get_transaction_by_reference(&self, reference: &str) -> Result<Option<Transaction>> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        let bytes = self
            .db
            .get_cf(cf, reference.as_bytes())
            .map_err(|err| PaymentError::Store(err.to_string()))?;

        match bytes {
            Some(bytes) => {
                let tx = serde_json::from_slice(&bytes)
                    .map_err(|err| PaymentError::Store(format!("deserialization error: {err}")))?;
                Ok(Some(tx))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Amount;
    use crate::domain::transaction::TransactionKind;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_creates_column_families() {
        let dir = tempdir().unwrap();
        let ledger = RocksDbLedger::open(dir.path()).expect("failed to open RocksDB");

        assert!(ledger.db.cf_handle(CF_ACCOUNTS).is_some());
        assert!(ledger.db.cf_handle(CF_TRANSACTIONS).is_some());
    }

    #[tokio::test]
    async fn test_account_round_trip_and_balance_update() {
        let dir = tempdir().unwrap();
        let ledger = RocksDbLedger::open(dir.path()).unwrap();

        let account = Account::new("acc_001", dec!(10.0));
        ledger.put_account(account.clone()).await.unwrap();

        let retrieved = ledger.get_account("acc_001").await.unwrap().unwrap();
        assert_eq!(retrieved, account);

        ledger.update_balance("acc_001", dec!(8.50)).await.unwrap();
        let updated = ledger.get_account("acc_001").await.unwrap().unwrap();
        assert_eq!(updated.balance, dec!(8.50));

        assert!(ledger.get_account("acc_002").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transaction_round_trip_and_uniqueness() {
        let dir = tempdir().unwrap();
        let ledger = RocksDbLedger::open(dir.path()).unwrap();

        let tx = Transaction::successful(
            "acc_001",
            "ref-001",
            Amount::new(dec!(1.50)).unwrap(),
            TransactionKind::Debit,
        );
        ledger.insert_transaction(tx.clone()).await.unwrap();

        let retrieved = ledger
            .get_transaction_by_reference("ref-001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved, tx);

        let duplicate = ledger.insert_transaction(tx).await;
        assert!(matches!(duplicate, Err(PaymentError::Store(_))));
    }
}
