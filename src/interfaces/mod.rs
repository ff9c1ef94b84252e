//! Inbound interfaces. HTTP is the only transport.

pub mod http;
