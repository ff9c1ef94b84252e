//! Domain types and the storage port the core depends on.

pub mod account;
pub mod ports;
pub mod transaction;
