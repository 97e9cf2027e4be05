//! # Domain Sweep Library
//!
//! An adaptive parallel scanner for short (3 and 4 letter) domain names.
//!
//! The library enumerates every `{letters}.{tld}` candidate for a length and
//! a TLD list, picks a concurrency strategy by benchmarking a random sample,
//! then checks every candidate over RDAP with a bounded pool of batch
//! workers. Lookups are fail-closed: only an explicit "not found" from the
//! registry counts as available.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_sweep_lib::{ScanConfig, Scanner, StrategyChoice};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScanConfig::new(3, ["io"]).with_strategy(StrategyChoice::Balanced);
//!     let scanner = Scanner::from_config(config)?;
//!
//!     let report = scanner.run().await?;
//!     println!("{} of {} available", report.available_count, report.total_checked);
//!     Ok(())
//! }
//! ```
//!
//! ## Testing without the network
//!
//! Everything that issues lookups is generic over [`AvailabilityChecker`],
//! so a scan can run against an in-memory double with
//! [`Scanner::with_checker`].

pub use batch::{batch_count, Batch, Batches};
pub use benchmark::{pick_best, StrategySelector};
pub use checker::{AvailabilityChecker, RateLimited};
pub use collector::ResultCollector;
pub use concurrent::{ExecutionStatus, ParallelExecutor, ScanState};
pub use config::{
    env_config_from, load_env_config, parse_timeout_string, resolve_strategy, BenchmarkSection,
    ConfigManager, EnvConfig, FileConfig, NetworkSection, OutputSection, ScanSection,
};
pub use error::DomainSweepError;
pub use generate::{CandidateSet, Candidates};
pub use progress::{progress_channel, ProgressReceiver, ProgressSender, ProgressTracker};
pub use protocols::{classify_error, classify_status, RdapChecker};
pub use scanner::{DefaultChecker, Scanner};
pub use tlds::{get_all_catalog_tlds, get_available_categories, get_category_tlds};
pub use types::{
    BenchmarkReport, BenchmarkRun, CheckResult, LookupOutcome, ProgressSnapshot, ScanConfig,
    ScanPhase, ScanReport, Strategy, StrategyChoice, DEFAULT_PROGRESS_INTERVAL,
    DEFAULT_RDAP_BASE_URL, DEFAULT_SAMPLE_SIZE, DEFAULT_TIMEOUT, MAX_CUSTOM_BATCH_SIZE,
    MAX_CUSTOM_WORKERS, MAX_NAME_LENGTH, MIN_NAME_LENGTH,
};
pub use utils::{normalize_tld, normalize_tlds, output_file_name, validate_tld};

// Public modules
pub mod generate;

// Internal modules - these are not part of the public API
mod batch;
mod benchmark;
mod checker;
mod collector;
mod concurrent;
mod config;
mod error;
mod progress;
mod protocols;
mod scanner;
mod tlds;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainSweepError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
