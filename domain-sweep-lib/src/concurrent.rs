//! Bounded parallel execution of batches.
//!
//! [`ParallelExecutor`] pulls batches lazily from the candidate stream and
//! keeps at most `max_workers` of them in flight on a `JoinSet`. Each worker
//! checks its batch sequentially and hands the results back when it is done.
//! Results are absorbed into the caller's [`ScanState`] on the driver task
//! only, so no counter is ever shared between tasks.
//!
//! A panic inside a lookup is caught and recorded as an `Internal` outcome
//! (registered), and the batch goes on with its next domain. If a worker
//! dies anyway, every domain of its batch is recorded the same way. Cancellation
//! stops new batches from being spawned and makes running workers stop
//! before their next lookup; lookups already in flight are abandoned.

use crate::batch::{Batch, Batches};
use crate::checker::AvailabilityChecker;
use crate::collector::ResultCollector;
use crate::progress::{ProgressSender, ProgressTracker};
use crate::types::{CheckResult, LookupOutcome, Strategy};
use futures_util::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::task::{self, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Mutable state of one scan, owned by whoever drives the executor.
#[derive(Debug)]
pub struct ScanState {
    pub collector: ResultCollector,
    pub tracker: ProgressTracker,
}

impl ScanState {
    pub fn new(total: usize, progress_interval: usize) -> Self {
        Self {
            collector: ResultCollector::new(),
            tracker: ProgressTracker::new(total, progress_interval),
        }
    }

    pub fn with_publisher(mut self, sender: ProgressSender) -> Self {
        self.tracker = self.tracker.with_publisher(sender);
        self
    }

    fn absorb(&mut self, results: &[CheckResult]) {
        for result in results.iter().filter(|r| r.available) {
            info!("Available: {}", result.domain);
        }
        self.collector.absorb(results);
        if let Some(snapshot) = self.tracker.record(results) {
            debug!(
                "Progress {}/{} ({:.1}%) at {:.1} domains/s",
                snapshot.completed, snapshot.total, snapshot.percent, snapshot.rate
            );
        }
    }
}

/// How an execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Every candidate was checked
    Completed,
    /// Cancellation stopped the run before every candidate was checked
    Cancelled,
}

/// What a worker hands back for one batch.
#[derive(Debug)]
struct BatchOutcome {
    results: Vec<CheckResult>,
    /// Domains left unchecked because of cancellation
    skipped: usize,
}

/// Runs batches through a checker with a fixed [`Strategy`].
pub struct ParallelExecutor<C> {
    checker: Arc<C>,
    strategy: Strategy,
}

impl<C> ParallelExecutor<C>
where
    C: AvailabilityChecker + 'static,
{
    pub fn new(checker: Arc<C>, strategy: Strategy) -> Self {
        Self { checker, strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Check every candidate, absorbing results into `state` as batches
    /// finish.
    ///
    /// Returns once all spawned workers have returned. On cancellation the
    /// results gathered so far stay in `state`.
    pub async fn execute<I>(
        &self,
        candidates: I,
        cancel: &CancellationToken,
        state: &mut ScanState,
    ) -> ExecutionStatus
    where
        I: IntoIterator<Item = String>,
    {
        let max_workers = self.strategy.max_workers.max(1);
        let mut batches = Batches::new(candidates, self.strategy.batch_size);
        let mut workers: JoinSet<BatchOutcome> = JoinSet::new();
        // Domains of every batch still in flight, by worker task
        let mut in_flight: HashMap<task::Id, Vec<String>> = HashMap::new();
        let mut exhausted = false;
        let mut skipped = 0usize;

        loop {
            while !exhausted && workers.len() < max_workers && !cancel.is_cancelled() {
                match batches.next() {
                    Some(batch) => {
                        let domains = batch.domains.clone();
                        let handle = workers.spawn(run_batch(
                            Arc::clone(&self.checker),
                            batch,
                            cancel.clone(),
                        ));
                        in_flight.insert(handle.id(), domains);
                    }
                    None => exhausted = true,
                }
            }

            match workers.join_next_with_id().await {
                Some(Ok((id, outcome))) => {
                    in_flight.remove(&id);
                    skipped += outcome.skipped;
                    state.absorb(&outcome.results);
                }
                Some(Err(e)) => {
                    warn!("Batch worker did not finish: {}", e);
                    let domains = in_flight.remove(&e.id()).unwrap_or_default();
                    state.absorb(&failed_batch(domains, &e.to_string()));
                }
                None => break,
            }
        }

        if cancel.is_cancelled() && (!exhausted || skipped > 0) {
            debug!(
                "Execution cancelled after {} domains",
                state.collector.checked()
            );
            ExecutionStatus::Cancelled
        } else {
            ExecutionStatus::Completed
        }
    }
}

/// Check one batch sequentially.
async fn run_batch<C>(checker: Arc<C>, batch: Batch, cancel: CancellationToken) -> BatchOutcome
where
    C: AvailabilityChecker + 'static,
{
    let total = batch.len();
    let mut results = Vec::with_capacity(total);

    for domain in &batch.domains {
        if cancel.is_cancelled() {
            break;
        }

        // Building the lookup future may itself panic
        let lookup = match panic::catch_unwind(AssertUnwindSafe(|| checker.check(domain))) {
            Ok(lookup) => AssertUnwindSafe(lookup).catch_unwind(),
            Err(payload) => {
                results.push(panicked(domain, payload.as_ref()));
                continue;
            }
        };
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            outcome = lookup => match outcome {
                Ok(result) => result,
                Err(payload) => panicked(domain, payload.as_ref()),
            },
        };
        results.push(result);
    }

    BatchOutcome {
        skipped: total - results.len(),
        results,
    }
}

/// Fail-closed results for a batch whose worker died.
fn failed_batch(domains: Vec<String>, reason: &str) -> Vec<CheckResult> {
    domains
        .into_iter()
        .map(|domain| {
            CheckResult::from_outcome(domain, LookupOutcome::Internal(reason.to_string()))
        })
        .collect()
}

fn panicked(domain: &str, payload: &(dyn Any + Send)) -> CheckResult {
    let message = panic_message(payload);
    warn!("Lookup for {} panicked: {}", domain, message);
    CheckResult::from_outcome(domain, LookupOutcome::Internal(message))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "lookup panicked".to_string()
    }
}
