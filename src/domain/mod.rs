//! Exchange-agnostic domain types: identifiers, order intents, safety
//! limits, validation, and execution outcomes.

pub mod id;
pub mod limits;
pub mod order;
pub mod outcome;
pub mod validate;

pub use id::{OrderId, TokenId};
pub use limits::{SafetyLimits, MAX_PRICE, MIN_PRICE};
pub use order::{OrderRequest, Side, ValidatedOrder};
pub use outcome::{ErrorDetail, ExecutionResult, ExecutionStatus, FailureKind};
pub use validate::validate;
