use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors produced while posting or resolving payments.
///
/// `TransactionPersist` and `BalanceUpdate` are kept apart on purpose: a
/// `BalanceUpdate` failure means a `SUCCESS` transaction is already durable
/// while the account balance still shows the old value, and operators need
/// the distinction to reconcile that window out of band. The inner strings
/// hold the store detail; the display strings are what goes on the wire.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("invalid payment request: {0}")]
    Validation(String),
    #[error("account not found")]
    AccountNotFound(String),
    #[error("reference not found")]
    ReferenceNotFound(String),
    #[error("insufficient funds")]
    InsufficientFunds(String),
    #[error("error creating transaction record")]
    TransactionPersist(String),
    #[error("error updating balance")]
    BalanceUpdate(String),
    #[error("store error: {0}")]
    Store(String),
}
