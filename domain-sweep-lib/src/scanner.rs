//! The scan lifecycle.
//!
//! A [`Scanner`] moves through `Idle -> Benchmarking -> Scanning ->
//! {Completed, Cancelled}`; with a fixed strategy it skips the benchmark.
//! Each transition is checked and published on a `watch` channel, progress
//! snapshots go out on another, and `run` consumes the scanner so a scan
//! cannot be started twice.

use crate::benchmark::StrategySelector;
use crate::checker::{AvailabilityChecker, RateLimited};
use crate::concurrent::{ExecutionStatus, ParallelExecutor, ScanState};
use crate::error::DomainSweepError;
use crate::generate::CandidateSet;
use crate::progress::{progress_channel, ProgressReceiver, ProgressSender};
use crate::protocols::RdapChecker;
use crate::types::{ScanConfig, ScanPhase, ScanReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Checker used by [`Scanner::from_config`]: RDAP behind the optional rate limit.
pub type DefaultChecker = RateLimited<RdapChecker>;

pub struct Scanner<C> {
    config: ScanConfig,
    candidates: CandidateSet,
    checker: Arc<C>,
    cancel: CancellationToken,
    progress: ProgressSender,
    phase: watch::Sender<ScanPhase>,
}

impl Scanner<DefaultChecker> {
    /// Build a scanner that queries the configured RDAP service.
    pub fn from_config(config: ScanConfig) -> Result<Self, DomainSweepError> {
        let config = config.validated()?;
        let rdap = RdapChecker::from_config(&config)?;
        let checker = RateLimited::new(rdap, config.max_requests_per_second);
        Self::with_checker(config, checker)
    }
}

impl<C> Scanner<C>
where
    C: AvailabilityChecker + 'static,
{
    /// Build a scanner around any checker. The configuration is validated
    /// here, before any lookup can be issued.
    pub fn with_checker(config: ScanConfig, checker: C) -> Result<Self, DomainSweepError> {
        let config = config.validated()?;
        let candidates = CandidateSet::from_config(&config)?;
        let (progress, _) = progress_channel();
        let (phase, _) = watch::channel(ScanPhase::Idle);

        Ok(Self {
            config,
            candidates,
            checker: Arc::new(checker),
            cancel: CancellationToken::new(),
            progress,
            phase,
        })
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Token that cancels this scan when triggered.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn subscribe_progress(&self) -> ProgressReceiver {
        self.progress.subscribe()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<ScanPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> ScanPhase {
        *self.phase.borrow()
    }

    /// Run the scan to completion or cancellation.
    ///
    /// Cancellation is not an error: the report carries whatever was
    /// checked before it, with phase `Cancelled`.
    pub async fn run(self) -> Result<ScanReport, DomainSweepError> {
        let total = self.candidates.len();
        info!(
            "Scanning {} candidates ({} letters over {})",
            total,
            self.config.length,
            self.candidates.tlds().join(", ")
        );

        let mut benchmark = None;
        let strategy = match self.config.strategy.fixed() {
            Some(strategy) => strategy,
            None => {
                self.transition(ScanPhase::Benchmarking)?;
                let sample = self
                    .candidates
                    .random_sample(self.config.benchmark_sample_size, &mut rand::rng());
                let selector = StrategySelector::new(Arc::clone(&self.checker));

                match selector.select(&sample, &self.cancel).await? {
                    Some(report) => {
                        let best = report.best;
                        benchmark = Some(report);
                        best
                    }
                    None => return self.finish_cancelled(total),
                }
            }
        };

        if self.cancel.is_cancelled() {
            return self.finish_cancelled(total);
        }

        self.transition(ScanPhase::Scanning)?;
        info!("Scanning with {}", strategy);

        let mut state = ScanState::new(total, self.config.progress_interval)
            .with_publisher(self.progress.clone());
        let started = Instant::now();
        let status = ParallelExecutor::new(Arc::clone(&self.checker), strategy)
            .execute(self.candidates.iter(), &self.cancel, &mut state)
            .await;
        let elapsed = started.elapsed();

        let phase = match status {
            ExecutionStatus::Completed => ScanPhase::Completed,
            ExecutionStatus::Cancelled => ScanPhase::Cancelled,
        };
        self.transition(phase)?;

        let mut report = state.collector.into_report(total, elapsed, phase);
        report.strategy = Some(strategy);
        report.benchmark = benchmark;

        info!(
            "Scan {}: {} of {} checked, {} available, {} uncertain, {:.1}s",
            phase,
            report.total_checked,
            total,
            report.available_count,
            report.failed_count,
            report.elapsed.as_secs_f64()
        );
        Ok(report)
    }

    fn finish_cancelled(&self, total: usize) -> Result<ScanReport, DomainSweepError> {
        self.transition(ScanPhase::Cancelled)?;
        Ok(ScanState::new(total, self.config.progress_interval)
            .collector
            .into_report(total, Duration::ZERO, ScanPhase::Cancelled))
    }

    fn transition(&self, next: ScanPhase) -> Result<(), DomainSweepError> {
        let current = self.phase();
        if !current.can_transition_to(next) {
            return Err(DomainSweepError::internal(format!(
                "illegal scan transition {} -> {}",
                current, next
            )));
        }
        info!("Scan phase: {} -> {}", current, next);
        self.phase.send_replace(next);
        Ok(())
    }
}
