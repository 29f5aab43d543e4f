//! Handler for the `trade` command.

use std::str::FromStr;

use serde_json::json;
use tracing::info;

use crate::adapter::inbound::cli::{output, TradeArgs};
use crate::config::Settings;
use crate::domain::{
    validate, ExecutionResult, ExecutionStatus, OrderRequest, Side, TokenId, ValidatedOrder,
};
use crate::error::{SubmissionError, ValidationError};
use crate::pipeline::ExecutionPipeline;
use crate::port::outbound::exchange::{OrderSubmitter, SubmissionReceipt};

/// Process exit code for a configuration failure.
const EXIT_CONFIG: u8 = 1;
/// Process exit code for a validation failure.
const EXIT_VALIDATION: u8 = 2;
/// Process exit code for a submission failure.
const EXIT_SUBMISSION: u8 = 3;

/// Guard submitter used for dry runs. The pipeline never invokes the
/// submitter for a dry-run order, so any call here is a bug.
struct DryRunGuard;

#[async_trait::async_trait]
impl OrderSubmitter for DryRunGuard {
    async fn submit(
        &self,
        _order: &ValidatedOrder,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Permanent(
            "submission requested during dry run".to_string(),
        ))
    }

    fn exchange_name(&self) -> &'static str {
        "dry-run"
    }
}

/// Execute the trade command. Returns the process exit code.
pub async fn execute(args: &TradeArgs) -> u8 {
    output::header(env!("CARGO_PKG_VERSION"));

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&format!("configuration error: {e}"));
            output::hint("run `polyexec check config` to inspect the environment");
            return EXIT_CONFIG;
        }
    };

    let side = match Side::from_str(&args.side) {
        Ok(side) => side,
        Err(e) => return render_validation_failure(&e),
    };

    let request = OrderRequest {
        token_id: TokenId::new(args.token_id.clone()),
        side,
        price: args.price,
        size: args.size,
        dry_run: args.dry_run,
    };

    output::field("Token", request.token_id.as_str());
    output::field("Side", request.side);
    output::field("Price", request.price);
    output::field("Size", request.size);
    output::field("Cost", request.total_cost());

    let order = match validate(request, &settings.limits) {
        Ok(order) => order,
        Err(e) => return render_validation_failure(&e),
    };

    if order.dry_run() {
        let pipeline = ExecutionPipeline::new(&settings.limits);
        let result = pipeline.execute(&order, &DryRunGuard).await;
        return render(&result);
    }

    submit_live(&settings, &order).await
}

/// Authenticate with the exchange and run the order through the pipeline.
#[cfg(feature = "polymarket")]
async fn submit_live(settings: &Settings, order: &ValidatedOrder) -> u8 {
    use crate::adapter::outbound::polymarket::PolymarketSubmitter;

    let pb = output::spinner("Authenticating with the CLOB");
    let submitter = match PolymarketSubmitter::connect(settings).await {
        Ok(submitter) => {
            output::spinner_success(&pb, "Authenticated");
            submitter
        }
        Err(e) => {
            output::spinner_fail(&pb, "Authentication failed");
            output::error(&e.to_string());
            return EXIT_CONFIG;
        }
    };

    let pipeline = ExecutionPipeline::new(&settings.limits);
    let pb = output::spinner("Submitting order");
    let result = pipeline.execute(order, &submitter).await;
    if result.is_ok() {
        output::spinner_success(&pb, "Order submitted");
    } else {
        output::spinner_fail(&pb, "Submission failed");
    }

    render(&result)
}

#[cfg(not(feature = "polymarket"))]
async fn submit_live(_settings: &Settings, _order: &ValidatedOrder) -> u8 {
    output::error("built without exchange support, only --dry-run is available");
    EXIT_CONFIG
}

fn render_validation_failure(error: &ValidationError) -> u8 {
    info!(error = %error, "order rejected by validator");
    render(&ExecutionResult::validation_failed(error))
}

/// Render a pipeline result and map it to the process exit code.
fn render(result: &ExecutionResult) -> u8 {
    if output::is_json() {
        output::json_output(json!({
            "status": result.status,
            "order_id": result.order_id.as_ref().map(ToString::to_string),
            "attempts": result.attempts,
            "elapsed_ms": result.elapsed.as_millis() as u64,
            "error": result.error,
        }));
    } else {
        match result.status {
            ExecutionStatus::Success => {
                if let Some(ref order_id) = result.order_id {
                    output::field("Order ID", order_id);
                }
                output::field("Attempts", result.attempts);
                output::success(&format!(
                    "order placed in {:.2}s",
                    result.elapsed.as_secs_f64()
                ));
            }
            ExecutionStatus::DryRun => {
                output::success("dry run passed, order is valid");
                output::note("no order was placed");
            }
            ExecutionStatus::ValidationFailed | ExecutionStatus::SubmissionFailed => {
                if let Some(ref error) = result.error {
                    output::error(&error.message);
                }
                if result.attempts > 0 {
                    output::field("Attempts", result.attempts);
                }
            }
        }
    }

    match result.status {
        ExecutionStatus::Success | ExecutionStatus::DryRun => 0,
        ExecutionStatus::ValidationFailed => EXIT_VALIDATION,
        ExecutionStatus::SubmissionFailed => EXIT_SUBMISSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::{ErrorDetail, FailureKind, OrderId};

    #[test]
    fn test_exit_code_success() {
        let result =
            ExecutionResult::success(OrderId::new("0xabc"), 1, Duration::from_millis(10));
        assert_eq!(render(&result), 0);
    }

    #[test]
    fn test_exit_code_dry_run() {
        let result = ExecutionResult::dry_run(Duration::ZERO);
        assert_eq!(render(&result), 0);
    }

    #[test]
    fn test_exit_code_validation_failure() {
        let error = ValidationError::InvalidSize {
            size: rust_decimal::Decimal::ZERO,
        };
        assert_eq!(render(&ExecutionResult::validation_failed(&error)), 2);
    }

    #[test]
    fn test_exit_code_submission_failure() {
        let result = ExecutionResult::submission_failed(
            4,
            Duration::from_secs(7),
            ErrorDetail {
                kind: FailureKind::Transient,
                message: "connection reset".to_string(),
            },
        );
        assert_eq!(render(&result), 3);
    }
}
