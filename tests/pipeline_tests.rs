//! Execution pipeline behavior under a paused tokio clock.

use std::time::Duration;

use polyexec::domain::{
    validate, ExecutionStatus, FailureKind, OrderId, OrderRequest, SafetyLimits, Side, TokenId,
    ValidatedOrder,
};
use polyexec::error::SubmissionError;
use polyexec::pipeline::{BackoffPolicy, ExecutionPipeline};
use polyexec::port::outbound::exchange::{OrderSubmitter, SubmissionReceipt};
use polyexec::testkit::ScriptedSubmitter;
use rust_decimal_macros::dec;

fn order(dry_run: bool) -> ValidatedOrder {
    let request = OrderRequest {
        token_id: TokenId::new("12345"),
        side: Side::Buy,
        price: dec!(0.60),
        size: dec!(10.0),
        dry_run,
    };
    validate(request, &SafetyLimits::default()).expect("valid order")
}

fn receipt(id: &str) -> SubmissionReceipt {
    SubmissionReceipt {
        order_id: OrderId::new(id),
    }
}

fn transient(msg: &str) -> SubmissionError {
    SubmissionError::Transient(msg.to_string())
}

/// Submitter whose requests never complete. Used to exercise the
/// per-attempt timeout.
struct HangingSubmitter;

#[async_trait::async_trait]
impl OrderSubmitter for HangingSubmitter {
    async fn submit(
        &self,
        _order: &ValidatedOrder,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        std::future::pending().await
    }

    fn exchange_name(&self) -> &'static str {
        "hanging"
    }
}

#[tokio::test(start_paused = true)]
async fn dry_run_never_invokes_submitter() {
    let limits = SafetyLimits::default();
    let submitter = ScriptedSubmitter::new();

    let result = ExecutionPipeline::new(&limits)
        .execute(&order(true), &submitter)
        .await;

    assert_eq!(result.status, ExecutionStatus::DryRun);
    assert_eq!(result.attempts, 0);
    assert!(result.order_id.is_none());
    assert!(result.error.is_none());
    assert_eq!(submitter.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn first_attempt_success_reports_one_attempt() {
    let limits = SafetyLimits::default();
    let submitter = ScriptedSubmitter::with_results([Ok(receipt("0xorder"))]);

    let result = ExecutionPipeline::new(&limits)
        .execute(&order(false), &submitter)
        .await;

    assert_eq!(result.status, ExecutionStatus::Success);
    assert_eq!(result.attempts, 1);
    assert_eq!(result.order_id.as_ref().map(ToString::to_string).as_deref(), Some("0xorder"));
    assert_eq!(submitter.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn transient_failure_then_success_takes_two_attempts() {
    let limits = SafetyLimits::default();
    let submitter = ScriptedSubmitter::with_results([
        Err(transient("connection reset")),
        Ok(receipt("0xsecond")),
    ]);

    let result = ExecutionPipeline::new(&limits)
        .execute(&order(false), &submitter)
        .await;

    assert_eq!(result.status, ExecutionStatus::Success);
    assert_eq!(result.attempts, 2);
    assert_eq!(submitter.call_count(), 2);
    // One backoff wait of the default base happened in between.
    assert!(result.elapsed >= BackoffPolicy::default().base);
}

#[tokio::test(start_paused = true)]
async fn permanent_failure_stops_after_one_attempt() {
    let limits = SafetyLimits::default();
    let submitter = ScriptedSubmitter::with_results([Err(SubmissionError::Permanent(
        "insufficient balance".to_string(),
    ))]);

    let result = ExecutionPipeline::new(&limits)
        .execute(&order(false), &submitter)
        .await;

    assert_eq!(result.status, ExecutionStatus::SubmissionFailed);
    assert_eq!(result.attempts, 1);
    assert_eq!(submitter.call_count(), 1);
    let error = result.error.expect("failure detail");
    assert_eq!(error.kind, FailureKind::Permanent);
    assert!(error.message.contains("insufficient balance"));
}

#[tokio::test(start_paused = true)]
async fn persistent_transient_failure_spends_full_budget() {
    let limits = SafetyLimits {
        max_retries: 3,
        ..SafetyLimits::default()
    };
    let submitter = ScriptedSubmitter::with_results([
        Err(transient("503")),
        Err(transient("503")),
        Err(transient("503")),
        Err(transient("503")),
    ]);

    let result = ExecutionPipeline::new(&limits)
        .execute(&order(false), &submitter)
        .await;

    assert_eq!(result.status, ExecutionStatus::SubmissionFailed);
    assert_eq!(result.attempts, 4);
    assert_eq!(submitter.call_count(), 4);
    assert_eq!(result.error.expect("failure detail").kind, FailureKind::Transient);
}

#[tokio::test(start_paused = true)]
async fn zero_retries_means_single_attempt() {
    let limits = SafetyLimits {
        max_retries: 0,
        ..SafetyLimits::default()
    };
    let submitter = ScriptedSubmitter::with_results([Err(transient("502"))]);

    let result = ExecutionPipeline::new(&limits)
        .execute(&order(false), &submitter)
        .await;

    assert_eq!(result.status, ExecutionStatus::SubmissionFailed);
    assert_eq!(result.attempts, 1);
    assert_eq!(submitter.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn backoff_delays_double_between_attempts() {
    let limits = SafetyLimits {
        max_retries: 3,
        ..SafetyLimits::default()
    };
    let backoff = BackoffPolicy {
        base: Duration::from_millis(10),
        max_delay: Duration::from_secs(1),
    };
    let submitter = ScriptedSubmitter::with_results([
        Err(transient("a")),
        Err(transient("b")),
        Err(transient("c")),
        Ok(receipt("0xlate")),
    ]);

    let result = ExecutionPipeline::new(&limits)
        .with_backoff(backoff)
        .execute(&order(false), &submitter)
        .await;

    assert_eq!(result.status, ExecutionStatus::Success);
    assert_eq!(result.attempts, 4);

    let instants = submitter.call_instants();
    assert_eq!(instants.len(), 4);
    let gaps: Vec<Duration> = instants.windows(2).map(|w| w[1] - w[0]).collect();
    assert!(gaps[0] >= Duration::from_millis(10) && gaps[0] < Duration::from_millis(20));
    assert!(gaps[1] >= Duration::from_millis(20) && gaps[1] < Duration::from_millis(40));
    assert!(gaps[2] >= Duration::from_millis(40) && gaps[2] < Duration::from_millis(80));
    // Non-decreasing spacing overall.
    assert!(gaps.windows(2).all(|w| w[1] >= w[0]));
}

#[tokio::test(start_paused = true)]
async fn hung_attempt_times_out_without_retry() {
    let limits = SafetyLimits {
        request_timeout: Duration::from_millis(50),
        ..SafetyLimits::default()
    };

    let result = ExecutionPipeline::new(&limits)
        .execute(&order(false), &HangingSubmitter)
        .await;

    assert_eq!(result.status, ExecutionStatus::SubmissionFailed);
    assert_eq!(result.attempts, 1);
    let error = result.error.expect("failure detail");
    assert_eq!(error.kind, FailureKind::Timeout);
    assert!(result.elapsed >= Duration::from_millis(50));
}

#[tokio::test(start_paused = true)]
async fn overall_deadline_surfaces_as_timeout() {
    let limits = SafetyLimits {
        max_retries: 10,
        ..SafetyLimits::default()
    };
    let backoff = BackoffPolicy {
        base: Duration::from_millis(10),
        max_delay: Duration::from_secs(1),
    };
    let submitter = ScriptedSubmitter::with_results(
        std::iter::repeat_with(|| Err(transient("flaky"))).take(12),
    );

    let result = ExecutionPipeline::new(&limits)
        .with_backoff(backoff)
        .with_deadline(Duration::from_millis(15))
        .execute(&order(false), &submitter)
        .await;

    assert_eq!(result.status, ExecutionStatus::SubmissionFailed);
    assert_eq!(result.error.expect("failure detail").kind, FailureKind::Timeout);
    // First retry wait fits inside the deadline, the second would not.
    assert_eq!(result.attempts, 2);
}

#[tokio::test(start_paused = true)]
async fn invalid_price_never_reaches_the_pipeline() {
    let request = OrderRequest {
        token_id: TokenId::new("12345"),
        side: Side::Buy,
        price: dec!(1.50),
        size: dec!(10.0),
        dry_run: false,
    };

    let submitter = ScriptedSubmitter::new();
    assert!(validate(request, &SafetyLimits::default()).is_err());
    assert_eq!(submitter.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn pipeline_is_reusable_across_orders() {
    let limits = SafetyLimits::default();
    let pipeline = ExecutionPipeline::new(&limits);
    let submitter = ScriptedSubmitter::new();

    let first = pipeline.execute(&order(false), &submitter).await;
    let second = pipeline.execute(&order(false), &submitter).await;

    assert_eq!(first.status, ExecutionStatus::Success);
    assert_eq!(second.status, ExecutionStatus::Success);
    assert_eq!(first.attempts, 1);
    assert_eq!(second.attempts, 1);
    assert_eq!(submitter.call_count(), 2);
}
