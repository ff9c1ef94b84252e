use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a positive monetary amount for payments.
///
/// `Amount::new` (and `TryFrom<Decimal>`) is the only way to construct one,
/// so a non-positive amount cannot exist. Records store the plain `Decimal`
/// magnitude, so this type never crosses a serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

/// The state of an account as the ledger knows it.
///
/// `balance` is the authoritative current balance and is mutated only through
/// the payment engine's balance-update step. Accounts are created out of band
/// (store seeding) and never deleted here.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    pub account_id: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(account_id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            balance,
            created_at: Utc::now(),
        }
    }

    /// Balance after debiting `amount`, or `InsufficientFunds` if the debit
    /// exceeds the current balance.
    pub fn debited(&self, amount: Amount) -> Result<Decimal> {
        if amount.value() > self.balance {
            Err(PaymentError::InsufficientFunds(self.account_id.clone()))
        } else {
            Ok(self.balance - amount.value())
        }
    }

    /// Balance after crediting `amount`.
    pub fn credited(&self, amount: Amount) -> Decimal {
        self.balance + amount.value()
    }
}
