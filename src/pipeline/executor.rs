//! Execution pipeline: validated order in, execution result out.
//!
//! Applies the dry-run short-circuit and bounded retry with exponential
//! backoff around an injected [`OrderSubmitter`]. Stateless across
//! invocations; safe to invoke from multiple concurrent callers.
//!
//! Per invocation the pipeline moves through: start, then either a dry-run
//! exit or a sequence of attempts. Each attempt ends in success, a
//! permanent/timeout failure (terminal), or a retry wait; the attempt
//! budget spending ends the sequence as well.

use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use crate::domain::{ErrorDetail, ExecutionResult, FailureKind, SafetyLimits, ValidatedOrder};
use crate::error::SubmissionError;
use crate::port::outbound::exchange::OrderSubmitter;

use super::backoff::BackoffPolicy;

/// Retry/backoff execution pipeline for a single order.
///
/// Holds only shared read-only configuration; every invocation of
/// [`execute`](Self::execute) is independent.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionPipeline<'a> {
    limits: &'a SafetyLimits,
    backoff: BackoffPolicy,
    deadline: Option<Duration>,
}

impl<'a> ExecutionPipeline<'a> {
    /// Create a pipeline over the given safety limits with the default
    /// backoff schedule and no overall deadline.
    #[must_use]
    pub fn new(limits: &'a SafetyLimits) -> Self {
        Self {
            limits,
            backoff: BackoffPolicy::default(),
            deadline: None,
        }
    }

    /// Replace the backoff schedule.
    #[must_use]
    pub const fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Bound the whole retry sequence, waits included. Exceeding the
    /// deadline surfaces as a timeout-kind failure.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Execute one validated order against the submission capability.
    ///
    /// Invokes the submitter up to `max_retries + 1` times, sleeping
    /// `base * 2^(n-1)` between transient failures. Permanent and timeout
    /// failures stop the sequence immediately. A dry-run order returns
    /// without any submission attempt.
    pub async fn execute(
        &self,
        order: &ValidatedOrder,
        submitter: &dyn OrderSubmitter,
    ) -> ExecutionResult {
        let started = Instant::now();

        if order.dry_run() {
            info!(
                token_id = %order.token_id(),
                side = %order.side(),
                price = %order.price(),
                size = %order.size(),
                "dry run, skipping submission"
            );
            return ExecutionResult::dry_run(started.elapsed());
        }

        let budget = self.limits.attempt_budget();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            debug!(
                attempt = attempts,
                budget,
                exchange = submitter.exchange_name(),
                "submitting order"
            );

            let error = match timeout(self.limits.request_timeout, submitter.submit(order)).await
            {
                Ok(Ok(receipt)) => {
                    info!(
                        order_id = %receipt.order_id,
                        attempts,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "order accepted"
                    );
                    return ExecutionResult::success(receipt.order_id, attempts, started.elapsed());
                }
                Ok(Err(error)) => error,
                Err(_) => SubmissionError::Timeout(format!(
                    "attempt {attempts} exceeded request timeout of {:?}",
                    self.limits.request_timeout
                )),
            };

            warn!(attempt = attempts, error = %error, "submission attempt failed");

            if !error.is_retryable() || attempts >= budget {
                return ExecutionResult::submission_failed(
                    attempts,
                    started.elapsed(),
                    ErrorDetail::from(&error),
                );
            }

            let delay = self.backoff.delay_for(attempts);

            if let Some(deadline) = self.deadline {
                if started.elapsed() + delay >= deadline {
                    return ExecutionResult::submission_failed(
                        attempts,
                        started.elapsed(),
                        ErrorDetail {
                            kind: FailureKind::Timeout,
                            message: format!(
                                "retry sequence exceeded overall deadline of {deadline:?}"
                            ),
                        },
                    );
                }
            }

            debug!(delay_ms = delay.as_millis() as u64, "backing off before retry");
            sleep(delay).await;
        }
    }
}
