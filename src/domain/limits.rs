//! Process-wide trading safety limits.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Minimum meaningful price for a probability-based token.
pub const MIN_PRICE: Decimal = dec!(0.01);

/// Maximum price for a probability-based token.
pub const MAX_PRICE: Decimal = dec!(1.0);

/// Read-only safety limits applied to every order.
///
/// Constructed from the environment at process start and shared by
/// reference across all validation and pipeline invocations.
#[derive(Debug, Clone)]
pub struct SafetyLimits {
    /// Upper bound on order size in tokens.
    pub max_order_size: Decimal,
    /// Upper bound on price x size in USDC. When `None` the total-cost
    /// check is skipped.
    pub max_total_cost: Option<Decimal>,
    /// Number of retries after the first submission attempt.
    pub max_retries: u32,
    /// Ceiling on client connection/authentication time.
    pub connection_timeout: Duration,
    /// Ceiling on each individual submission attempt.
    pub request_timeout: Duration,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_order_size: dec!(1000.0),
            max_total_cost: None,
            max_retries: 3,
            connection_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl SafetyLimits {
    /// Total submission attempt budget (initial attempt plus retries).
    #[must_use]
    pub const fn attempt_budget(&self) -> u32 {
        self.max_retries + 1
    }
}
