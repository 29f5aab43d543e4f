//! Exponential backoff policy for submission retries.

use std::time::Duration;

/// Delay schedule between retry attempts.
///
/// The delay after the n-th failed attempt (1-indexed) is
/// `base * 2^(n-1)`, capped at `max_delay`.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Delay after the first failed attempt.
    pub base: Duration,
    /// Ceiling on any single delay.
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl BackoffPolicy {
    /// Delay to wait after `failed_attempt` (1-indexed) has failed.
    #[must_use]
    pub fn delay_for(&self, failed_attempt: u32) -> Duration {
        debug_assert!(failed_attempt >= 1);
        let exponent = failed_attempt.saturating_sub(1).min(32);
        let delay = self
            .base
            .saturating_mul(2u32.saturating_pow(exponent));
        delay.min(self.max_delay)
    }
}
