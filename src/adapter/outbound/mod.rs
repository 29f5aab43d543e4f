//! Outbound adapters: exchange-facing implementations of the outbound
//! ports.

#[cfg(feature = "polymarket")]
pub mod polymarket;
