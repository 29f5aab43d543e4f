//! Polyexec - Polymarket CLOB order execution with safety validation.
//!
//! This crate wraps the Polymarket CLOB client SDK with a validation and
//! retry layer for placing limit orders from the command line or from
//! other Rust code.
//!
//! # Architecture
//!
//! An order moves through two stages:
//!
//! - **`domain::validate`** - Pure validation against fixed price bounds
//!   and configured safety limits. Produces a [`domain::ValidatedOrder`],
//!   the only type the pipeline accepts.
//! - **`pipeline`** - Retry/backoff execution: dry-run short-circuit,
//!   per-attempt timeouts, exponential backoff between transient
//!   failures, and an optional overall deadline.
//!
//! Submission itself sits behind the [`port::outbound::exchange::OrderSubmitter`]
//! trait; the Polymarket adapter implements it on top of the SDK, and the
//! testkit provides a scripted double.
//!
//! # Modules
//!
//! - [`config`] - Settings from `POLYMARKET_*` environment variables
//! - [`domain`] - Order intents, safety limits, validation, outcomes
//! - [`error`] - Error types for the crate
//! - [`pipeline`] - Backoff policy and execution pipeline
//! - [`port`] - Trait definitions at the application boundary
//! - [`adapter`] - CLI frontend and the Polymarket submitter
//!
//! # Features
//!
//! - `polymarket` (default) - Enable real order submission via the SDK
//! - `testkit` - Scripted submitter for tests
//!
//! # Example
//!
//! ```no_run
//! use polyexec::domain::{validate, OrderRequest, SafetyLimits, Side, TokenId};
//! use rust_decimal_macros::dec;
//!
//! let limits = SafetyLimits::default();
//! let request = OrderRequest {
//!     token_id: TokenId::new("71321045679252212594626385532706912750332728571942532289631379312455583992563"),
//!     side: Side::Buy,
//!     price: dec!(0.60),
//!     size: dec!(10),
//!     dry_run: true,
//! };
//! let order = validate(request, &limits).unwrap();
//! assert!(order.dry_run());
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, Result};
