//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files, reading `DS_*`
//! environment variables and merging configurations with proper precedence
//! rules. Turning the merged values into a [`ScanConfig`](crate::ScanConfig)
//! happens in the caller, after command-line flags have been applied.

use crate::error::DomainSweepError;
use crate::tlds::get_category_tlds;
use crate::types::{StrategyChoice, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::utils::normalize_tlds;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// What to scan and with which strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan: Option<ScanSection>,

    /// Lookup service settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkSection>,

    /// Automatic strategy selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkSection>,

    /// Where results go and how often progress is shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScanSection {
    /// Letters per name, 3 or 4
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    /// Explicit TLD list (alternative to category)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlds: Option<Vec<String>>,

    /// Built-in TLD category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// auto, fast, balanced, stable or custom
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Batch size for the custom strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    /// Worker count for the custom strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NetworkSection {
    /// Per-request timeout (as string, e.g., "2s", "1500ms")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdap_base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_requests_per_second: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BenchmarkSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputSection {
    /// Directory the result file is written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    /// Completed domains between progress updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_interval: Option<usize>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to report which config files were picked up
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// The file must exist, parse as TOML and pass [`validate_config`](Self::validate_config).
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainSweepError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainSweepError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainSweepError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;

        self.validate_config(&config)?;
        debug!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config is the lowest precedence, then the home directory, then
    /// the current directory. Files that fail to load are skipped with a
    /// warning.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainSweepError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    merged_config = self.merge_configs(merged_config, config);
                    loaded_files.push(path);
                }
                Err(e) => warn!("Ignoring config file {}: {}", path.display(), e),
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            warn!("Multiple config files found, later ones take precedence:");
            for path in &loaded_files {
                warn!("  {}", path.display());
            }
        }

        Ok(merged_config)
    }

    /// Looks for configuration files in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./domain-sweep.toml", "./.domain-sweep.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Looks for configuration files in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        [".domain-sweep.toml", "domain-sweep.toml"]
            .iter()
            .map(|candidate| Path::new(&home).join(candidate))
            .find(|path| path.exists())
    }

    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-sweep").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations; values from `higher` win field by field.
    ///
    /// `tlds` and `category` are one setting: whichever the higher layer
    /// sets replaces both of the lower layer's.
    pub fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            scan: merge_section(lower.scan, higher.scan, |low, high| {
                let tld_source = if high.tlds.is_some() || high.category.is_some() {
                    (high.tlds, high.category)
                } else {
                    (low.tlds, low.category)
                };
                ScanSection {
                    length: high.length.or(low.length),
                    tlds: tld_source.0,
                    category: tld_source.1,
                    strategy: high.strategy.or(low.strategy),
                    batch_size: high.batch_size.or(low.batch_size),
                    workers: high.workers.or(low.workers),
                }
            }),
            network: merge_section(lower.network, higher.network, |low, high| NetworkSection {
                timeout: high.timeout.or(low.timeout),
                rdap_base_url: high.rdap_base_url.or(low.rdap_base_url),
                max_requests_per_second: high
                    .max_requests_per_second
                    .or(low.max_requests_per_second),
            }),
            benchmark: merge_section(lower.benchmark, higher.benchmark, |low, high| {
                BenchmarkSection {
                    sample_size: high.sample_size.or(low.sample_size),
                }
            }),
            output: merge_section(lower.output, higher.output, |low, high| OutputSection {
                directory: high.directory.or(low.directory),
                progress_interval: high.progress_interval.or(low.progress_interval),
            }),
        }
    }

    /// Validate a configuration for common issues.
    pub fn validate_config(&self, config: &FileConfig) -> Result<(), DomainSweepError> {
        if let Some(scan) = &config.scan {
            if let Some(length) = scan.length {
                if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
                    return Err(DomainSweepError::InvalidLength {
                        length,
                        min: MIN_NAME_LENGTH,
                        max: MAX_NAME_LENGTH,
                    });
                }
            }

            if scan.tlds.is_some() && scan.category.is_some() {
                return Err(DomainSweepError::config(
                    "Cannot specify both 'tlds' and 'category' in [scan]",
                ));
            }

            if let Some(tlds) = &scan.tlds {
                normalize_tlds(tlds)?;
            }

            if let Some(category) = &scan.category {
                if get_category_tlds(category).is_none() {
                    return Err(DomainSweepError::config(format!(
                        "Unknown TLD category '{}'",
                        category
                    )));
                }
            }

            if let Some(choice) =
                resolve_strategy(scan.strategy.as_deref(), scan.batch_size, scan.workers)?
            {
                choice.validate()?;
            }
        }

        if let Some(network) = &config.network {
            if let Some(timeout_str) = &network.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(DomainSweepError::config(format!(
                        "Invalid timeout format '{}'. Use format like '2s', '1500ms', '1m'",
                        timeout_str
                    )));
                }
            }

            if network.max_requests_per_second == Some(0) {
                return Err(DomainSweepError::config(
                    "max_requests_per_second must be at least 1",
                ));
            }

            if let Some(url) = &network.rdap_base_url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(DomainSweepError::config(format!(
                        "rdap_base_url '{}' must start with http:// or https://",
                        url
                    )));
                }
            }
        }

        if config.benchmark.as_ref().and_then(|b| b.sample_size) == Some(0) {
            return Err(DomainSweepError::config("sample_size must be at least 1"));
        }

        if config.output.as_ref().and_then(|o| o.progress_interval) == Some(0) {
            return Err(DomainSweepError::config(
                "progress_interval must be at least 1",
            ));
        }

        Ok(())
    }
}

fn merge_section<T>(
    lower: Option<T>,
    higher: Option<T>,
    merge: impl FnOnce(T, T) -> T,
) -> Option<T> {
    match (lower, higher) {
        (Some(low), Some(high)) => Some(merge(low, high)),
        (low, high) => high.or(low),
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via DS_* environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub length: Option<usize>,
    pub tlds: Option<Vec<String>>,
    pub category: Option<String>,
    pub strategy: Option<String>,
    pub batch_size: Option<usize>,
    pub workers: Option<usize>,
    pub timeout: Option<Duration>,
    pub rdap_base_url: Option<String>,
    pub rate_limit: Option<u32>,
    pub sample_size: Option<usize>,
    pub output_dir: Option<String>,
    pub config: Option<String>,
}

/// Load configuration from the process environment.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    env_config_from(|key| env::var(key).ok())
}

/// Build an [`EnvConfig`] from any variable lookup.
pub fn env_config_from<F>(lookup: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };
    let list = |key: &str| {
        var(key).and_then(|value| {
            let items: Vec<String> = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            (!items.is_empty()).then_some(items)
        })
    };

    let mut env_config = EnvConfig {
        tlds: list("DS_TLD"),
        category: var("DS_CATEGORY"),
        rdap_base_url: var("DS_RDAP_URL"),
        output_dir: var("DS_OUTPUT_DIR"),
        config: var("DS_CONFIG"),
        ..Default::default()
    };

    // DS_LENGTH - letters per name
    if let Some(val) = var("DS_LENGTH") {
        match val.parse::<usize>() {
            Ok(length) if (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) => {
                env_config.length = Some(length)
            }
            _ => warn!(
                "Invalid DS_LENGTH='{}', must be {} or {}",
                val, MIN_NAME_LENGTH, MAX_NAME_LENGTH
            ),
        }
    }

    // DS_STRATEGY - named strategy
    if let Some(val) = var("DS_STRATEGY") {
        if val.eq_ignore_ascii_case("custom") || val.parse::<StrategyChoice>().is_ok() {
            env_config.strategy = Some(val.to_lowercase());
        } else {
            warn!(
                "Invalid DS_STRATEGY='{}', use auto, fast, balanced, stable or custom",
                val
            );
        }
    }

    env_config.batch_size = positive(&var, "DS_BATCH_SIZE");
    env_config.workers = positive(&var, "DS_WORKERS");
    env_config.sample_size = positive(&var, "DS_SAMPLE_SIZE");
    env_config.rate_limit =
        positive(&var, "DS_RATE_LIMIT").and_then(|rate| u32::try_from(rate).ok());

    // DS_TIMEOUT - per-request timeout
    if let Some(val) = var("DS_TIMEOUT") {
        match parse_timeout_string(&val) {
            Some(timeout) => env_config.timeout = Some(timeout),
            None => warn!(
                "Invalid DS_TIMEOUT='{}', use format like '2s', '1500ms', '1m'",
                val
            ),
        }
    }

    if env_config.tlds.is_some() && env_config.category.is_some() {
        warn!("Both DS_TLD and DS_CATEGORY are set, DS_TLD wins");
        env_config.category = None;
    }

    debug!("Environment configuration: {:?}", env_config);
    env_config
}

fn positive(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let val = var(key)?;
    match val.parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            warn!("Invalid {}='{}', must be a positive integer", key, val);
            None
        }
    }
}

/// Resolve a strategy name and optional custom sizes into a choice.
///
/// Sizes alone imply `custom`; `custom` needs both sizes; sizes next to a
/// named preset are rejected. Returns `None` when nothing was given.
pub fn resolve_strategy(
    name: Option<&str>,
    batch_size: Option<usize>,
    workers: Option<usize>,
) -> Result<Option<StrategyChoice>, DomainSweepError> {
    let custom_requested = name.is_some_and(|n| n.trim().eq_ignore_ascii_case("custom"));

    if !custom_requested && name.is_some() && (batch_size.is_some() || workers.is_some()) {
        return Err(DomainSweepError::invalid_strategy(
            "batch size and workers can only be set with the custom strategy",
        ));
    }

    if custom_requested || batch_size.is_some() || workers.is_some() {
        return match (batch_size, workers) {
            (Some(batch_size), Some(workers)) => Ok(Some(StrategyChoice::Custom {
                batch_size,
                workers,
            })),
            _ => Err(DomainSweepError::invalid_strategy(
                "the custom strategy needs both a batch size and a worker count",
            )),
        };
    }

    name.map(str::parse::<StrategyChoice>).transpose()
}

/// Parse a timeout like `"2s"`, `"1500ms"`, `"1m"` or a bare number of seconds.
pub fn parse_timeout_string(timeout_str: &str) -> Option<Duration> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let duration = if let Some(ms) = timeout_str.strip_suffix("ms") {
        ms.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.trim().parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.trim()
            .parse::<u64>()
            .ok()
            .map(|m| Duration::from_secs(m * 60))
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok().map(Duration::from_secs)
    };

    duration.filter(|d| !d.is_zero())
}
