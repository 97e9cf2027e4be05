//! Progress and throughput tracking.
//!
//! The tracker is owned by the scan driver and updated once per finished
//! batch. It keeps a few counters and a short window of recent samples, and
//! publishes snapshots through a `watch` channel, which never blocks the
//! sender. Display is somebody else's job.

use crate::types::{CheckResult, ProgressSnapshot};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Span of the sliding window used for the instantaneous rate.
const RATE_WINDOW: Duration = Duration::from_secs(30);

/// Sender half of the progress channel. `None` until the first snapshot.
pub type ProgressSender = watch::Sender<Option<ProgressSnapshot>>;
/// Receiver half of the progress channel.
pub type ProgressReceiver = watch::Receiver<Option<ProgressSnapshot>>;

/// Creates a fresh progress channel.
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    watch::channel(None)
}

#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    available_count: usize,
    interval: usize,
    next_report: usize,
    started: Instant,
    window: VecDeque<(Instant, usize)>,
    publisher: Option<ProgressSender>,
}

impl ProgressTracker {
    /// Track `total` domains, emitting a snapshot every `interval` completions.
    pub fn new(total: usize, interval: usize) -> Self {
        let interval = interval.max(1);
        let started = Instant::now();
        let mut window = VecDeque::new();
        window.push_back((started, 0));

        Self {
            total,
            completed: 0,
            available_count: 0,
            interval,
            next_report: interval,
            started,
            window,
            publisher: None,
        }
    }

    /// Publish every emitted snapshot on `sender`.
    pub fn with_publisher(mut self, sender: ProgressSender) -> Self {
        self.publisher = Some(sender);
        self
    }

    /// Account for one finished batch.
    ///
    /// Returns a snapshot when a reporting threshold was crossed or the scan
    /// just reached its total; otherwise `None`.
    pub fn record(&mut self, results: &[CheckResult]) -> Option<ProgressSnapshot> {
        if results.is_empty() {
            return None;
        }

        self.completed += results.len();
        self.available_count += results.iter().filter(|r| r.available).count();

        let now = Instant::now();
        self.window.push_back((now, self.completed));
        while self.window.len() > 2 {
            match self.window.front() {
                Some(&(at, _)) if now.duration_since(at) > RATE_WINDOW => {
                    self.window.pop_front();
                }
                _ => break,
            }
        }

        let finished = self.completed >= self.total;
        if self.completed < self.next_report && !finished {
            return None;
        }
        self.next_report = (self.completed / self.interval + 1) * self.interval;

        let snapshot = self.snapshot();
        if let Some(publisher) = &self.publisher {
            publisher.send_replace(Some(snapshot.clone()));
        }
        Some(snapshot)
    }

    /// Current state, regardless of thresholds.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let rate = self.rate();
        let remaining = self.total.saturating_sub(self.completed);
        let eta = if remaining == 0 {
            Some(Duration::ZERO)
        } else if rate > 0.0 {
            Some(Duration::from_secs_f64(remaining as f64 / rate))
        } else {
            None
        };
        let percent = if self.total == 0 {
            100.0
        } else {
            (self.completed as f64 / self.total as f64 * 100.0).min(100.0)
        };

        ProgressSnapshot {
            completed: self.completed,
            total: self.total,
            percent,
            rate,
            eta,
            elapsed: self.started.elapsed(),
            available_count: self.available_count,
        }
    }

    /// Domains per second over the recent window, falling back to the whole
    /// run while the window has no measurable span.
    pub fn rate(&self) -> f64 {
        if let (Some(&(first_at, first_done)), Some(&(last_at, last_done))) =
            (self.window.front(), self.window.back())
        {
            let span = last_at.duration_since(first_at).as_secs_f64();
            if span > 0.0 && last_done > first_done {
                return (last_done - first_done) as f64 / span;
            }
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.completed as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn available_count(&self) -> usize {
        self.available_count
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
