//! Outcome of one execution pipeline invocation.

use std::time::Duration;

use serde::Serialize;

use crate::error::{SubmissionError, ValidationError};

use super::id::OrderId;

/// Terminal status of an order attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Order accepted by the exchange.
    Success,
    /// Dry-run requested; nothing was submitted.
    DryRun,
    /// Rejected by the validator before any submission.
    ValidationFailed,
    /// All submission attempts failed or a terminal failure occurred.
    SubmissionFailed,
}

/// Classification of a failure surfaced in an [`ExecutionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Rejected by the validator.
    Validation,
    /// Network/timeout-class failure reported by the exchange adapter.
    Transient,
    /// Terminal rejection reported by the exchange adapter.
    Permanent,
    /// An attempt or the whole retry sequence exceeded its deadline.
    Timeout,
}

/// Structured failure detail (kind + message).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    /// Failure classification.
    pub kind: FailureKind,
    /// Human-readable description.
    pub message: String,
}

impl From<&SubmissionError> for ErrorDetail {
    fn from(err: &SubmissionError) -> Self {
        let kind = match err {
            SubmissionError::Transient(_) => FailureKind::Transient,
            SubmissionError::Permanent(_) => FailureKind::Permanent,
            SubmissionError::Timeout(_) => FailureKind::Timeout,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<&ValidationError> for ErrorDetail {
    fn from(err: &ValidationError) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: err.to_string(),
        }
    }
}

/// Result of one order attempt.
///
/// Created fresh per pipeline invocation; immutable; not persisted.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Terminal status.
    pub status: ExecutionStatus,
    /// Exchange order ID, present only on success.
    pub order_id: Option<OrderId>,
    /// Number of submission attempts made.
    pub attempts: u32,
    /// Wall-clock time from pipeline entry to terminal result, inclusive
    /// of all waits.
    pub elapsed: Duration,
    /// Failure detail, present on failure statuses.
    pub error: Option<ErrorDetail>,
}

impl ExecutionResult {
    /// Build a success result.
    #[must_use]
    pub fn success(order_id: OrderId, attempts: u32, elapsed: Duration) -> Self {
        Self {
            status: ExecutionStatus::Success,
            order_id: Some(order_id),
            attempts,
            elapsed,
            error: None,
        }
    }

    /// Build a dry-run result. No submission attempt was made.
    #[must_use]
    pub fn dry_run(elapsed: Duration) -> Self {
        Self {
            status: ExecutionStatus::DryRun,
            order_id: None,
            attempts: 0,
            elapsed,
            error: None,
        }
    }

    /// Build a submission-failure result.
    #[must_use]
    pub fn submission_failed(attempts: u32, elapsed: Duration, error: ErrorDetail) -> Self {
        Self {
            status: ExecutionStatus::SubmissionFailed,
            order_id: None,
            attempts,
            elapsed,
            error: Some(error),
        }
    }

    /// Build a validation-failure result. The pipeline was never entered.
    #[must_use]
    pub fn validation_failed(err: &ValidationError) -> Self {
        Self {
            status: ExecutionStatus::ValidationFailed,
            order_id: None,
            attempts: 0,
            elapsed: Duration::ZERO,
            error: Some(ErrorDetail::from(err)),
        }
    }

    /// Check if the result is a success or dry-run.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(
            self.status,
            ExecutionStatus::Success | ExecutionStatus::DryRun
        )
    }
}
