//! Scripted order submitter for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::domain::{OrderId, ValidatedOrder};
use crate::error::SubmissionError;
use crate::port::outbound::exchange::{OrderSubmitter, SubmissionReceipt};

/// Submitter that replays a scripted sequence of results.
///
/// Each call to `submit` pops the next scripted result and records the
/// call instant, so tests can assert both the number of attempts and
/// the spacing between them. Once the script is exhausted every further
/// call succeeds with a fixed order ID.
pub struct ScriptedSubmitter {
    results: Mutex<VecDeque<Result<SubmissionReceipt, SubmissionError>>>,
    calls: AtomicU32,
    call_instants: Mutex<Vec<Instant>>,
}

impl ScriptedSubmitter {
    /// Create a submitter with no scripted results; every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: AtomicU32::new(0),
            call_instants: Mutex::new(Vec::new()),
        }
    }

    /// Create a submitter that replays the given results in order.
    #[must_use]
    pub fn with_results(
        results: impl IntoIterator<Item = Result<SubmissionReceipt, SubmissionError>>,
    ) -> Self {
        Self {
            results: Mutex::new(results.into_iter().collect()),
            calls: AtomicU32::new(0),
            call_instants: Mutex::new(Vec::new()),
        }
    }

    /// Number of times `submit` has been called.
    #[must_use]
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Instants at which `submit` was called, in order.
    #[must_use]
    pub fn call_instants(&self) -> Vec<Instant> {
        self.call_instants
            .lock()
            .expect("call instants lock")
            .clone()
    }
}

impl Default for ScriptedSubmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderSubmitter for ScriptedSubmitter {
    async fn submit(
        &self,
        _order: &ValidatedOrder,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_instants
            .lock()
            .expect("call instants lock")
            .push(Instant::now());

        self.results
            .lock()
            .expect("results lock")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(SubmissionReceipt {
                    order_id: OrderId::new("scripted-order"),
                })
            })
    }

    fn exchange_name(&self) -> &'static str {
        "scripted"
    }
}
