//! Exchange port for order submission.
//!
//! Defines the narrow capability the execution pipeline requires from an
//! exchange client. The adapter owns credentials, signing, and transport;
//! the pipeline treats it as an opaque, thread-safe function it may call
//! repeatedly.

use async_trait::async_trait;

use crate::domain::{OrderId, ValidatedOrder};
use crate::error::SubmissionError;

/// Acknowledgement returned by the exchange for an accepted order.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    /// The order ID assigned by the exchange.
    pub order_id: OrderId,
}

/// Capability for submitting a single validated order to an exchange.
///
/// Implementations classify their own failures as transient, permanent,
/// or timeout; the pipeline acts on that classification without
/// reinterpreting it.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit one order. May be called repeatedly for retries.
    async fn submit(&self, order: &ValidatedOrder)
        -> Result<SubmissionReceipt, SubmissionError>;

    /// Get the exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}
