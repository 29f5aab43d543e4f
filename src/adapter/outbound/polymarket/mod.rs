//! Polymarket CLOB adapter.

pub mod submitter;

pub use submitter::PolymarketSubmitter;
