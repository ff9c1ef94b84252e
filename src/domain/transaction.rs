use crate::domain::account::Amount;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a balance movement. Stored upper-case (`DEBIT` / `CREDIT`);
/// selected on the wire by the lower-case `type` query parameter.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Debit,
    Credit,
}

impl TransactionKind {
    /// Parses the request qualifier. Case-sensitive by contract: only the
    /// exact strings `debit` and `credit` are accepted.
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Success,
    Failed,
}

/// An immutable ledger record. Once persisted with `SUCCESS` it represents a
/// movement that is (or is about to be) reflected in the owning account's
/// balance; it is never updated or deleted.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub reference: String,
    pub account_id: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn successful(
        account_id: impl Into<String>,
        reference: impl Into<String>,
        amount: Amount,
        kind: TransactionKind,
    ) -> Self {
        Self {
            reference: reference.into(),
            account_id: account_id.into(),
            amount: amount.value(),
            kind,
            status: TransactionStatus::Success,
            created_at: Utc::now(),
        }
    }
}
