//! Order execution pipeline: dry-run short-circuit, per-attempt timeouts,
//! and bounded retry with exponential backoff.

pub mod backoff;
pub mod executor;

pub use backoff::BackoffPolicy;
pub use executor::ExecutionPipeline;
