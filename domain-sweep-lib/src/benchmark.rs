//! Empirical strategy selection.
//!
//! Every strategy on the menu runs the same sample through the
//! [`ParallelExecutor`]; the one with the lowest wall-clock time wins, and
//! ties go to the strategy with fewer workers. The sample is drawn by the
//! caller independently of the scan itself, and its results are thrown away
//! once a strategy is picked.

use crate::checker::AvailabilityChecker;
use crate::concurrent::{ExecutionStatus, ParallelExecutor, ScanState};
use crate::error::DomainSweepError;
use crate::types::{BenchmarkReport, BenchmarkRun, Strategy};
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct StrategySelector<C> {
    checker: Arc<C>,
    strategies: Vec<Strategy>,
}

impl<C> StrategySelector<C>
where
    C: AvailabilityChecker + 'static,
{
    /// Selector over the default benchmark menu.
    pub fn new(checker: Arc<C>) -> Self {
        Self::with_strategies(checker, Strategy::benchmark_menu())
    }

    pub fn with_strategies(checker: Arc<C>, strategies: Vec<Strategy>) -> Self {
        Self {
            checker,
            strategies,
        }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Benchmark every strategy on `sample` and pick the fastest.
    ///
    /// Returns `Ok(None)` when cancelled before every strategy was measured.
    pub async fn select(
        &self,
        sample: &[String],
        cancel: &CancellationToken,
    ) -> Result<Option<BenchmarkReport>, DomainSweepError> {
        if self.strategies.is_empty() {
            return Err(DomainSweepError::invalid_strategy(
                "benchmark needs at least one strategy",
            ));
        }
        if sample.is_empty() {
            return Err(DomainSweepError::config("benchmark sample is empty"));
        }

        let mut runs = Vec::with_capacity(self.strategies.len());
        for &strategy in &self.strategies {
            let Some(run) = self.measure(strategy, sample, cancel).await else {
                info!("Benchmark cancelled");
                return Ok(None);
            };
            info!(
                "Benchmark {}: {:.2}s, {:.1} domains/s, {} failed, {} available",
                strategy,
                run.elapsed.as_secs_f64(),
                run.rate,
                run.failed,
                run.available
            );
            runs.push(run);
        }

        let best = pick_best(&runs).ok_or_else(|| {
            DomainSweepError::internal("benchmark produced no measurements")
        })?;
        info!("Selected strategy: {}", best);

        Ok(Some(BenchmarkReport {
            runs,
            best,
            sample_size: sample.len(),
        }))
    }

    /// Run `sample` once with `strategy`. `None` if cancelled.
    pub async fn measure(
        &self,
        strategy: Strategy,
        sample: &[String],
        cancel: &CancellationToken,
    ) -> Option<BenchmarkRun> {
        let executor = ParallelExecutor::new(Arc::clone(&self.checker), strategy);
        let mut state = ScanState::new(sample.len(), usize::MAX);

        let started = Instant::now();
        let status = executor
            .execute(sample.iter().cloned(), cancel, &mut state)
            .await;
        let elapsed = started.elapsed();

        if status == ExecutionStatus::Cancelled {
            return None;
        }

        let collector = &state.collector;
        let secs = elapsed.as_secs_f64();
        Some(BenchmarkRun {
            strategy,
            elapsed,
            checked: collector.checked(),
            succeeded: collector.checked() - collector.failed_count(),
            failed: collector.failed_count(),
            available: collector.available_count(),
            rate: if secs > 0.0 {
                collector.checked() as f64 / secs
            } else {
                0.0
            },
        })
    }
}

/// Fastest run, ties broken by fewer workers.
pub fn pick_best(runs: &[BenchmarkRun]) -> Option<Strategy> {
    runs.iter()
        .min_by_key(|run| (run.elapsed, run.strategy.max_workers))
        .map(|run| run.strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckResult, LookupOutcome};
    use std::time::Duration;

    struct FixedLatency(Duration);

    impl AvailabilityChecker for FixedLatency {
        async fn check(&self, domain: &str) -> CheckResult {
            if !self.0.is_zero() {
                tokio::time::sleep(self.0).await;
            }
            CheckResult::from_outcome(domain, LookupOutcome::Found)
        }
    }

    fn sample(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("s{}.io", i)).collect()
    }

    fn run(batch_size: usize, max_workers: usize, millis: u64) -> BenchmarkRun {
        BenchmarkRun {
            strategy: Strategy {
                batch_size,
                max_workers,
            },
            elapsed: Duration::from_millis(millis),
            checked: 100,
            succeeded: 100,
            failed: 0,
            available: 0,
            rate: 0.0,
        }
    }

    #[test]
    fn test_pick_best_min_elapsed() {
        let runs = vec![run(1, 100, 300), run(10, 30, 200), run(50, 10, 400)];
        assert_eq!(
            pick_best(&runs),
            Some(Strategy {
                batch_size: 10,
                max_workers: 30
            })
        );
    }

    #[test]
    fn test_pick_best_tie_prefers_fewer_workers() {
        let runs = vec![run(1, 100, 200), run(5, 20, 200), run(2, 50, 200)];
        assert_eq!(pick_best(&runs).map(|s| s.max_workers), Some(20));
        assert_eq!(pick_best(&[]), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_higher_parallelism_wins_on_fixed_latency() {
        let checker = Arc::new(FixedLatency(Duration::from_millis(50)));
        let strategies = vec![Strategy::new(1, 50).unwrap(), Strategy::new(10, 10).unwrap()];
        let selector = StrategySelector::with_strategies(checker, strategies);

        let report = selector
            .select(&sample(100), &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.sample_size, 100);
        assert_eq!(report.runs.len(), 2);
        // Two waves of 50 lookups versus ten sequential lookups per worker
        assert!(report.runs[0].elapsed >= Duration::from_millis(100));
        assert!(report.runs[0].elapsed < Duration::from_millis(150));
        assert!(report.runs[1].elapsed >= Duration::from_millis(500));
        assert_eq!(report.best, Strategy::new(1, 50).unwrap());
        assert!(report.runs.iter().all(|r| r.checked == 100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_equal_time_prefers_fewer_workers() {
        // No latency and a paused clock: both runs measure zero
        let checker = Arc::new(FixedLatency(Duration::ZERO));
        let strategies = vec![Strategy::new(1, 40).unwrap(), Strategy::new(1, 20).unwrap()];
        let selector = StrategySelector::with_strategies(checker, strategies);

        let report = selector
            .select(&sample(20), &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.runs[0].elapsed, report.runs[1].elapsed);
        assert_eq!(report.best.max_workers, 20);
    }

    #[tokio::test]
    async fn test_rejects_empty_inputs() {
        let checker = Arc::new(FixedLatency(Duration::ZERO));
        let cancel = CancellationToken::new();

        let selector = StrategySelector::with_strategies(checker.clone(), Vec::new());
        assert!(selector.select(&sample(5), &cancel).await.is_err());

        let selector = StrategySelector::new(checker);
        assert_eq!(selector.strategies().len(), 6);
        assert!(selector.select(&[], &cancel).await.is_err());
    }

    #[tokio::test]
    async fn test_cancelled_benchmark_yields_none() {
        let selector = StrategySelector::new(Arc::new(FixedLatency(Duration::ZERO)));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = selector.select(&sample(10), &cancel).await.unwrap();
        assert!(report.is_none());
    }
}
