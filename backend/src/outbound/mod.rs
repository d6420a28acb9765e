//! Outbound adapters binding domain ports to infrastructure.

pub mod persistence;
