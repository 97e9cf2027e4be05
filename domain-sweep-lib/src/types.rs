//! Core data types for short-name domain scanning.
//!
//! This module defines the data structures shared by the scanning pipeline:
//! per-domain results, concurrency strategies, the scan configuration, progress
//! snapshots and the final report.

use crate::error::DomainSweepError;
use crate::utils::normalize_tlds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Shortest supported name length.
pub const MIN_NAME_LENGTH: usize = 3;
/// Longest supported name length.
pub const MAX_NAME_LENGTH: usize = 4;

/// Per-request timeout applied to every lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
/// Public RDAP redirector used when no base URL is configured.
pub const DEFAULT_RDAP_BASE_URL: &str = "https://rdap.org";
/// Number of random candidates used to rank strategies.
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;
/// Completed domains between two progress snapshots.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 500;

/// Upper bound for a user-defined batch size.
pub const MAX_CUSTOM_BATCH_SIZE: usize = 100;
/// Upper bound for a user-defined worker count.
pub const MAX_CUSTOM_WORKERS: usize = 200;

/// How a single lookup ended.
///
/// Only [`LookupOutcome::NotFound`] means the name is available; every other
/// outcome is treated as registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum LookupOutcome {
    /// The registry has no record for the name (HTTP 404)
    NotFound,
    /// The registry returned a record (HTTP 200)
    Found,
    /// Any other HTTP status
    UnexpectedStatus(u16),
    /// No response within the per-request timeout
    Timeout,
    /// Connection, TLS, DNS or protocol failure
    Network(String),
    /// Local failure while checking (e.g. a panicking checker)
    Internal(String),
}

impl LookupOutcome {
    /// Whether the registry gave a definitive answer.
    pub fn is_definitive(&self) -> bool {
        matches!(self, Self::NotFound | Self::Found)
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Found => write!(f, "found"),
            Self::UnexpectedStatus(code) => write!(f, "HTTP {}", code),
            Self::Timeout => write!(f, "timeout"),
            Self::Network(message) => write!(f, "network error: {}", message),
            Self::Internal(message) => write!(f, "internal error: {}", message),
        }
    }
}

/// Result of checking one candidate. Produced once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Fully qualified name that was checked (e.g. "abc.io")
    pub domain: String,
    /// `true` only when the registry reported "not found"
    pub available: bool,
    /// Raw classification of the lookup
    pub outcome: LookupOutcome,
}

impl CheckResult {
    /// Build a result from a lookup outcome, applying the fail-closed rule.
    pub fn from_outcome<D: Into<String>>(domain: D, outcome: LookupOutcome) -> Self {
        Self {
            domain: domain.into(),
            available: outcome == LookupOutcome::NotFound,
            outcome,
        }
    }
}

/// Concurrency shape of a scan: `batch_size` domains per task, at most
/// `max_workers` tasks in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Strategy {
    pub batch_size: usize,
    pub max_workers: usize,
}

impl Strategy {
    /// One domain per task, 100 tasks.
    pub const FAST: Strategy = Strategy {
        batch_size: 1,
        max_workers: 100,
    };
    /// Ten domains per task, 30 tasks.
    pub const BALANCED: Strategy = Strategy {
        batch_size: 10,
        max_workers: 30,
    };
    /// Fifty domains per task, 10 tasks.
    pub const STABLE: Strategy = Strategy {
        batch_size: 50,
        max_workers: 10,
    };

    /// Create a strategy, rejecting zero values.
    pub fn new(batch_size: usize, max_workers: usize) -> Result<Self, DomainSweepError> {
        if batch_size == 0 {
            return Err(DomainSweepError::invalid_strategy(
                "batch size must be at least 1",
            ));
        }
        if max_workers == 0 {
            return Err(DomainSweepError::invalid_strategy(
                "worker count must be at least 1",
            ));
        }
        Ok(Self {
            batch_size,
            max_workers,
        })
    }

    /// The strategies compared by the automatic benchmark.
    pub fn benchmark_menu() -> Vec<Strategy> {
        vec![
            Strategy {
                batch_size: 1,
                max_workers: 100,
            },
            Strategy {
                batch_size: 4,
                max_workers: 75,
            },
            Strategy {
                batch_size: 5,
                max_workers: 50,
            },
            Strategy {
                batch_size: 10,
                max_workers: 30,
            },
            Strategy {
                batch_size: 20,
                max_workers: 20,
            },
            Strategy {
                batch_size: 50,
                max_workers: 10,
            },
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} domains/batch, {} workers",
            self.batch_size, self.max_workers
        )
    }
}

/// Strategy selection requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyChoice {
    /// Benchmark a sample first and keep the fastest strategy
    #[default]
    Auto,
    Fast,
    Balanced,
    Stable,
    Custom {
        batch_size: usize,
        workers: usize,
    },
}

impl StrategyChoice {
    /// The fixed strategy for this choice, or `None` for [`StrategyChoice::Auto`].
    pub fn fixed(&self) -> Option<Strategy> {
        match *self {
            Self::Auto => None,
            Self::Fast => Some(Strategy::FAST),
            Self::Balanced => Some(Strategy::BALANCED),
            Self::Stable => Some(Strategy::STABLE),
            Self::Custom {
                batch_size,
                workers,
            } => Some(Strategy {
                batch_size,
                max_workers: workers,
            }),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), DomainSweepError> {
        if let Self::Custom {
            batch_size,
            workers,
        } = *self
        {
            if batch_size == 0 || batch_size > MAX_CUSTOM_BATCH_SIZE {
                return Err(DomainSweepError::invalid_strategy(format!(
                    "batch size must be between 1 and {}",
                    MAX_CUSTOM_BATCH_SIZE
                )));
            }
            if workers == 0 || workers > MAX_CUSTOM_WORKERS {
                return Err(DomainSweepError::invalid_strategy(format!(
                    "worker count must be between 1 and {}",
                    MAX_CUSTOM_WORKERS
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for StrategyChoice {
    type Err = DomainSweepError;

    /// Parses the named strategies. `custom` needs explicit sizes and is
    /// therefore built with [`StrategyChoice::Custom`] directly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "benchmark" => Ok(Self::Auto),
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "stable" => Ok(Self::Stable),
            other => Err(DomainSweepError::invalid_strategy(format!(
                "unknown strategy '{}', expected auto, fast, balanced, stable or custom",
                other
            ))),
        }
    }
}

impl fmt::Display for StrategyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Fast => write!(f, "fast"),
            Self::Balanced => write!(f, "balanced"),
            Self::Stable => write!(f, "stable"),
            Self::Custom {
                batch_size,
                workers,
            } => write!(f, "custom ({}x{})", batch_size, workers),
        }
    }
}

/// Full configuration of one scan.
///
/// Build it with [`ScanConfig::new`] and the `with_*` methods; the scanner
/// validates it before any lookup is issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Number of letters per name (3 or 4)
    pub length: usize,

    /// Ordered TLD list, without leading dots
    pub tlds: Vec<String>,

    /// Requested concurrency strategy
    pub strategy: StrategyChoice,

    /// Per-request timeout
    pub timeout: Duration,

    /// RDAP service base URL; requests go to `{base}/domain/{name}`
    pub rdap_base_url: String,

    /// Optional ceiling on lookups per second, on top of the worker bound
    pub max_requests_per_second: Option<u32>,

    /// Candidates sampled for the automatic benchmark
    pub benchmark_sample_size: usize,

    /// Completed domains between two progress snapshots
    pub progress_interval: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            length: MIN_NAME_LENGTH,
            tlds: vec!["com".to_string()],
            strategy: StrategyChoice::Auto,
            timeout: DEFAULT_TIMEOUT,
            rdap_base_url: DEFAULT_RDAP_BASE_URL.to_string(),
            max_requests_per_second: None,
            benchmark_sample_size: DEFAULT_SAMPLE_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ScanConfig {
    /// Create a configuration for the given length and TLDs, with defaults
    /// for everything else.
    pub fn new<T: Into<String>>(length: usize, tlds: impl IntoIterator<Item = T>) -> Self {
        Self {
            length,
            tlds: tlds.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_strategy(mut self, strategy: StrategyChoice) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rdap_base_url<U: Into<String>>(mut self, url: U) -> Self {
        self.rdap_base_url = url.into();
        self
    }

    pub fn with_rate_limit(mut self, per_second: Option<u32>) -> Self {
        self.max_requests_per_second = per_second;
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.benchmark_sample_size = sample_size;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Validate every setting and normalize the TLD list.
    ///
    /// TLDs are lowercased, stripped of leading dots and de-duplicated in
    /// order of first appearance.
    pub fn validated(mut self) -> Result<Self, DomainSweepError> {
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&self.length) {
            return Err(DomainSweepError::InvalidLength {
                length: self.length,
                min: MIN_NAME_LENGTH,
                max: MAX_NAME_LENGTH,
            });
        }

        self.tlds = normalize_tlds(&self.tlds)?;
        self.strategy.validate()?;

        if self.timeout.is_zero() {
            return Err(DomainSweepError::config("timeout must be greater than zero"));
        }
        if self.benchmark_sample_size == 0 {
            return Err(DomainSweepError::config(
                "benchmark sample size must be at least 1",
            ));
        }
        if self.progress_interval == 0 {
            return Err(DomainSweepError::config(
                "progress interval must be at least 1",
            ));
        }
        if self.max_requests_per_second == Some(0) {
            return Err(DomainSweepError::config(
                "rate limit must be at least 1 request per second",
            ));
        }
        let base = self.rdap_base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(DomainSweepError::config(format!(
                "RDAP base URL '{}' must start with http:// or https://",
                self.rdap_base_url
            )));
        }
        self.rdap_base_url = base.to_string();

        Ok(self)
    }

    /// Number of candidates this configuration describes.
    pub fn total_candidates(&self) -> usize {
        26usize.pow(self.length as u32) * self.tlds.len()
    }
}

/// Point-in-time view of scan progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    /// Completion percentage, 0.0 to 100.0
    pub percent: f64,
    /// Domains per second over the recent window
    pub rate: f64,
    /// Estimated time remaining, `None` until a rate is known
    pub eta: Option<Duration>,
    pub elapsed: Duration,
    pub available_count: usize,
}

/// Lifecycle of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanPhase {
    Idle,
    Benchmarking,
    Scanning,
    Completed,
    Cancelled,
}

impl ScanPhase {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: ScanPhase) -> bool {
        use ScanPhase::*;
        matches!(
            (self, next),
            (Idle, Benchmarking)
                | (Idle, Scanning)
                | (Idle, Cancelled)
                | (Benchmarking, Scanning)
                | (Benchmarking, Cancelled)
                | (Scanning, Completed)
                | (Scanning, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ScanPhase::Completed | ScanPhase::Cancelled)
    }
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Idle => "idle",
            ScanPhase::Benchmarking => "benchmarking",
            ScanPhase::Scanning => "scanning",
            ScanPhase::Completed => "completed",
            ScanPhase::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Measurements of one strategy over the benchmark sample.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRun {
    pub strategy: Strategy,
    pub elapsed: Duration,
    pub checked: usize,
    /// Lookups with a definitive registry answer
    pub succeeded: usize,
    /// Lookups that failed closed (timeouts, errors, unexpected statuses)
    pub failed: usize,
    pub available: usize,
    /// Domains per second
    pub rate: f64,
}

/// Outcome of the automatic strategy selection.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub runs: Vec<BenchmarkRun>,
    pub best: Strategy,
    pub sample_size: usize,
}

/// Final statistics of a scan, handed to the persistence layer.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Available domains in the order they were found
    pub available: Vec<String>,
    pub total_candidates: usize,
    pub total_checked: usize,
    pub available_count: usize,
    /// Lookups counted as registered because they were not definitive
    pub failed_count: usize,
    pub elapsed: Duration,
    /// Average domains per second over the whole scan
    pub throughput: f64,
    pub strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkReport>,
    pub phase: ScanPhase,
}

impl ScanReport {
    /// Percentage of checked names that were available.
    pub fn efficiency(&self) -> f64 {
        if self.total_checked == 0 {
            0.0
        } else {
            self.available_count as f64 / self.total_checked as f64 * 100.0
        }
    }

    pub fn was_cancelled(&self) -> bool {
        self.phase == ScanPhase::Cancelled
    }
}
