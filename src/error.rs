use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required variable: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Rejections produced by the order request validator.
///
/// All variants are locally recoverable: they are reported to the caller
/// before any submission attempt, so no side effects have occurred.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("price {price} outside allowed range 0.01..=1.00")]
    InvalidPrice { price: Decimal },

    #[error("size must be positive, got {size}")]
    InvalidSize { size: Decimal },

    #[error("size {size} exceeds maximum order size {max}")]
    OrderTooLarge { size: Decimal, max: Decimal },

    #[error("total cost {cost} exceeds safety limit {limit}")]
    CostExceedsLimit { cost: Decimal, limit: Decimal },

    #[error("invalid token id: {reason}")]
    InvalidTokenId { reason: String },

    #[error("invalid side '{side}', expected 'buy' or 'sell'")]
    InvalidSide { side: String },
}

/// Failures reported by an order submission capability.
///
/// The classification is supplied by the adapter that owns the exchange
/// connection. The execution pipeline never reinterprets it; its only
/// judgment is whether to retry (`Transient`) or stop.
#[derive(Error, Debug, Clone)]
pub enum SubmissionError {
    #[error("transient submission failure: {0}")]
    Transient(String),

    #[error("order rejected: {0}")]
    Permanent(String),

    #[error("submission timed out: {0}")]
    Timeout(String),
}

impl SubmissionError {
    /// Whether the pipeline may retry after this failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

pub type Result<T> = std::result::Result<T, Error>;
