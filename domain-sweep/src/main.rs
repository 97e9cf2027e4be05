//! Domain Sweep CLI Application
//!
//! A command-line interface that finds unregistered 3 and 4 letter domain
//! names. It resolves configuration from flags, `DS_*` environment variables
//! and config files, drives a scan through domain-sweep-lib, renders
//! progress and writes the available domains to disk.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use console::{style, Term};
use domain_sweep_lib::{
    get_available_categories, get_category_tlds, load_env_config, output_file_name,
    parse_timeout_string, resolve_strategy, ConfigManager, EnvConfig, FileConfig, ScanConfig,
    Scanner, StrategyChoice, MAX_NAME_LENGTH, MIN_NAME_LENGTH,
};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::{debug, info, warn};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Scans above this many candidates ask for confirmation on a terminal.
const LARGE_SCAN_THRESHOLD: usize = 100_000;

/// Number of candidates listed by `--dry-run`.
const DRY_RUN_PREVIEW: usize = 10;

/// CLI arguments for domain-sweep
#[derive(Parser, Debug)]
#[command(name = "domain-sweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Sai Dutt G.V <gvs46@protonmail.com>")]
#[command(about = "Find unregistered 3 and 4 letter domain names using RDAP")]
#[command(
    long_about = "Enumerate every 3 or 4 letter name across a set of TLDs and check each one over RDAP.\n\nA short benchmark picks the fastest concurrency strategy unless one is given. Only an explicit 'not found' counts as available."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Letters per name (3 or 4)
    #[arg(
        short = 'l',
        long = "length",
        value_name = "N",
        help_heading = "Candidates"
    )]
    pub length: Option<usize>,

    /// TLDs to scan (comma-separated or multiple -t flags)
    #[arg(short = 't', long = "tld", value_name = "TLD", value_delimiter = ',', action = clap::ArgAction::Append, help_heading = "Candidates")]
    pub tlds: Option<Vec<String>>,

    /// Use a built-in TLD category (use --list-tlds to see all)
    #[arg(long = "category", value_name = "NAME", help_heading = "Candidates")]
    pub category: Option<String>,

    /// Scan every TLD in the built-in catalog
    #[arg(long = "all", help_heading = "Candidates")]
    pub all_tlds: bool,

    /// List the built-in TLD categories and exit
    #[arg(long = "list-tlds", help_heading = "Candidates")]
    pub list_tlds: bool,

    /// Concurrency strategy: auto, fast, balanced, stable or custom
    #[arg(
        short = 's',
        long = "strategy",
        value_name = "NAME",
        help_heading = "Performance"
    )]
    pub strategy: Option<String>,

    /// Domains per batch for the custom strategy (1-100)
    #[arg(long = "batch-size", value_name = "N", help_heading = "Performance")]
    pub batch_size: Option<usize>,

    /// Batches in flight for the custom strategy (1-200)
    #[arg(long = "workers", value_name = "N", help_heading = "Performance")]
    pub workers: Option<usize>,

    /// Domains sampled by the automatic benchmark (default: 1000)
    #[arg(long = "sample-size", value_name = "N", help_heading = "Performance")]
    pub sample_size: Option<usize>,

    /// Per-request timeout, e.g. 2s or 1500ms (default: 2s)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Network")]
    pub timeout: Option<String>,

    /// RDAP service base URL (default: https://rdap.org)
    #[arg(long = "rdap-url", value_name = "URL", help_heading = "Network")]
    pub rdap_url: Option<String>,

    /// Maximum requests per second across all workers
    #[arg(long = "rate-limit", value_name = "N", help_heading = "Network")]
    pub rate_limit: Option<u32>,

    /// Directory the result file is written to (default: current directory)
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help_heading = "Output"
    )]
    pub output_dir: Option<String>,

    /// Print the scan report as JSON on stdout
    #[arg(short = 'j', long = "json", help_heading = "Output")]
    pub json: bool,

    /// Print the scan plan without sending any request
    #[arg(long = "dry-run", help_heading = "Output")]
    pub dry_run: bool,

    /// Skip the confirmation prompt for large scans
    #[arg(long = "yes", short = 'y', help_heading = "Output")]
    pub yes: bool,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show detailed debug information
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Everything a run needs after all configuration sources are merged.
#[derive(Debug, Clone)]
struct ResolvedConfig {
    scan: ScanConfig,
    output_dir: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Settings contributed by one configuration source.
#[derive(Debug, Default)]
struct ConfigLayer {
    length: Option<usize>,
    tlds: Option<Vec<String>>,
    strategy: Option<StrategyChoice>,
    timeout: Option<Duration>,
    rdap_base_url: Option<String>,
    rate_limit: Option<u32>,
    sample_size: Option<usize>,
    progress_interval: Option<usize>,
    output_dir: Option<String>,
}

impl ConfigLayer {
    fn apply_to(self, config: &mut ResolvedConfig) {
        let scan = &mut config.scan;
        if let Some(length) = self.length {
            scan.length = length;
        }
        if let Some(tlds) = self.tlds {
            scan.tlds = tlds;
        }
        if let Some(strategy) = self.strategy {
            scan.strategy = strategy;
        }
        if let Some(timeout) = self.timeout {
            scan.timeout = timeout;
        }
        if let Some(url) = self.rdap_base_url {
            scan.rdap_base_url = url;
        }
        if let Some(rate) = self.rate_limit {
            scan.max_requests_per_second = Some(rate);
        }
        if let Some(sample_size) = self.sample_size {
            scan.benchmark_sample_size = sample_size;
        }
        if let Some(interval) = self.progress_interval {
            scan.progress_interval = interval;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = PathBuf::from(dir);
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    init_logging(&args);

    // Handle --list-tlds early
    if args.list_tlds {
        print_categories();
        return;
    }

    if let Err(e) = run_scan(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_logging(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    // --list-tlds is self-contained, skip other validation
    if args.list_tlds {
        return Ok(());
    }

    if let Some(length) = args.length {
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
            return Err(format!(
                "Length must be {} or {}",
                MIN_NAME_LENGTH, MAX_NAME_LENGTH
            ));
        }
    }

    // Check for conflicting flags
    let tld_sources = [args.tlds.is_some(), args.category.is_some(), args.all_tlds]
        .iter()
        .filter(|&&x| x)
        .count();

    if tld_sources > 1 {
        return Err(
            "Cannot specify multiple TLD sources. Use only one of: -t/--tld, --category, or --all"
                .to_string(),
        );
    }

    if args.rate_limit == Some(0) {
        return Err("Rate limit must be at least 1 request per second".to_string());
    }

    if args.sample_size == Some(0) {
        return Err("Sample size must be at least 1".to_string());
    }

    Ok(())
}

/// Print all built-in TLD categories with their TLDs, then exit.
fn print_categories() {
    use console::Style;

    let heading = Style::new().yellow().bold();
    let name_style = Style::new().green().bold();
    let count_style = Style::new().cyan();

    println!();
    println!("{}", heading.apply_to("Available TLD Categories:"));
    println!();

    for category in get_available_categories() {
        if let Some(tlds) = get_category_tlds(category) {
            println!(
                "  {} {}  {}",
                name_style.apply_to(format!("{:<12}", category)),
                count_style.apply_to(format!("({})", tlds.len())),
                tlds.join(", "),
            );
        }
    }

    println!();
    println!("Use: domain-sweep --length 3 --category <name>");
}

/// Main scanning logic
async fn run_scan(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = build_config(&args)?;
    let config = resolved.scan.validated()?;
    let total = config.total_candidates();
    let output_path = resolved
        .output_dir
        .join(output_file_name(config.length, &config.tlds));

    if args.dry_run {
        return print_plan(&config, &output_path, args.json);
    }

    // Interactive confirmation for large runs (TTY only)
    if total > LARGE_SCAN_THRESHOLD && !args.yes && !confirm_large_scan(total)? {
        eprintln!("Aborted.");
        return Ok(());
    }

    let scanner = Scanner::from_config(config)?;
    ui::print_header(scanner.config(), total);

    // Ctrl-C stops new lookups; the partial results are still written
    let cancel = scanner.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing in-flight lookups");
            cancel.cancel();
        }
    });

    let renderer = tokio::spawn(ui::render_progress(scanner.subscribe_progress()));
    let report = scanner.run().await?;
    if let Err(e) = renderer.await {
        debug!("Progress renderer stopped: {}", e);
    }

    let available = ui::sorted_available(&report);
    write_results(&output_path, &available)?;
    info!(
        "Wrote {} available domains to {}",
        available.len(),
        output_path.display()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if let Some(benchmark) = &report.benchmark {
            ui::print_benchmark(benchmark);
        }
        ui::print_summary(&report, Some(&output_path));
    }

    Ok(())
}

/// Ask before a very large scan. Non-interactive runs always proceed.
fn confirm_large_scan(total: usize) -> Result<bool, Box<dyn std::error::Error>> {
    let term = Term::stderr();
    if !term.is_term() {
        return Ok(true);
    }

    eprint!("Will check {} domains. Proceed? [Y/n] ", total);
    let mut input = String::new();
    std::io::stdin().lock().read_line(&mut input)?;
    let answer = input.trim().to_lowercase();
    Ok(answer != "n" && answer != "no")
}

/// Print what a scan would do without sending any request.
fn print_plan(
    config: &ScanConfig,
    output_path: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let candidates = domain_sweep_lib::CandidateSet::from_config(config)?;
    let preview: Vec<String> = candidates.iter().take(DRY_RUN_PREVIEW).collect();

    if json {
        let plan = serde_json::json!({
            "length": config.length,
            "tlds": config.tlds,
            "total_candidates": candidates.len(),
            "strategy": config.strategy,
            "benchmark_sample_size": config.benchmark_sample_size,
            "timeout_ms": config.timeout.as_millis() as u64,
            "rdap_base_url": config.rdap_base_url,
            "max_requests_per_second": config.max_requests_per_second,
            "output_file": output_path.display().to_string(),
            "preview": preview,
        });
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Length:      {}", config.length);
    println!("TLDs:        {}", config.tlds.join(", "));
    println!("Candidates:  {}", candidates.len());
    match config.strategy {
        StrategyChoice::Auto => println!(
            "Strategy:    auto (benchmark on {} sampled domains)",
            config.benchmark_sample_size.min(candidates.len())
        ),
        other => println!("Strategy:    {}", other),
    }
    println!("RDAP:        {}", config.rdap_base_url);
    println!("Output:      {}", output_path.display());
    println!();
    for domain in &preview {
        println!("  {}", domain);
    }
    if candidates.len() > preview.len() {
        println!(
            "  {}",
            style(format!("... and {} more", candidates.len() - preview.len())).dim()
        );
    }
    eprintln!("{} domains would be checked", candidates.len());
    Ok(())
}

/// Write available domains, one per line. Creates the directory if needed.
fn write_results(path: &Path, available: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create '{}': {}", dir.display(), e))?;
    }

    let mut content = available.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    std::fs::write(path, content)
        .map_err(|e| format!("Failed to write results to '{}': {}", path.display(), e))?;
    Ok(())
}

/// Build the scan configuration: defaults, then config files, then the
/// environment, then CLI flags.
fn build_config(args: &Args) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
    let env_config = load_env_config();
    let config_manager = ConfigManager::new(args.verbose);

    // Step 1: Determine config file path and load config files
    let file_config = if let Some(explicit_config_path) = &args.config {
        info!("Using config file (--config): {}", explicit_config_path);
        config_manager
            .load_file(explicit_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", explicit_config_path, e))?
    } else if let Some(env_config_path) = &env_config.config {
        info!("Using config file (DS_CONFIG): {}", env_config_path);
        config_manager
            .load_file(env_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", env_config_path, e))?
    } else {
        config_manager.discover_and_load().unwrap_or_else(|e| {
            warn!("Config discovery warning: {}", e);
            FileConfig::default()
        })
    };

    resolve_config(file_config, env_config, args)
}

/// Merge the three configuration sources over the defaults.
fn resolve_config(
    file_config: FileConfig,
    env_config: EnvConfig,
    args: &Args,
) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
    let mut config = ResolvedConfig::default();

    // Step 2: Config file
    file_layer(file_config)?.apply_to(&mut config);

    // Step 3: Environment variables (DS_*)
    env_layer(env_config).apply_to(&mut config);

    // Step 4: CLI arguments (highest precedence)
    cli_layer(args)?.apply_to(&mut config);

    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn file_layer(file_config: FileConfig) -> Result<ConfigLayer, Box<dyn std::error::Error>> {
    ConfigManager::new(false).validate_config(&file_config)?;

    let mut layer = ConfigLayer::default();

    if let Some(scan) = file_config.scan {
        layer.length = scan.length;
        layer.tlds = match (scan.tlds, scan.category) {
            (Some(tlds), _) => Some(tlds),
            (None, Some(category)) => Some(category_tlds(&category)?),
            (None, None) => None,
        };
        layer.strategy =
            resolve_strategy(scan.strategy.as_deref(), scan.batch_size, scan.workers)?;
    }

    if let Some(network) = file_config.network {
        layer.timeout = network.timeout.as_deref().and_then(parse_timeout_string);
        layer.rdap_base_url = network.rdap_base_url;
        layer.rate_limit = network.max_requests_per_second;
    }

    if let Some(benchmark) = file_config.benchmark {
        layer.sample_size = benchmark.sample_size;
    }

    if let Some(output) = file_config.output {
        layer.output_dir = output.directory;
        layer.progress_interval = output.progress_interval;
    }

    Ok(layer)
}

/// Environment values that do not resolve are ignored with a warning.
fn env_layer(env_config: EnvConfig) -> ConfigLayer {
    let tlds = match (env_config.tlds, env_config.category) {
        (Some(tlds), _) => Some(tlds),
        (None, Some(category)) => match get_category_tlds(&category) {
            Some(tlds) => Some(tlds),
            None => {
                warn!("Unknown DS_CATEGORY='{}', ignoring", category);
                None
            }
        },
        (None, None) => None,
    };

    let strategy = match resolve_strategy(
        env_config.strategy.as_deref(),
        env_config.batch_size,
        env_config.workers,
    ) {
        Ok(strategy) => strategy,
        Err(e) => {
            warn!("Ignoring DS_STRATEGY/DS_BATCH_SIZE/DS_WORKERS: {}", e);
            None
        }
    };

    ConfigLayer {
        length: env_config.length,
        tlds,
        strategy,
        timeout: env_config.timeout,
        rdap_base_url: env_config.rdap_base_url,
        rate_limit: env_config.rate_limit,
        sample_size: env_config.sample_size,
        progress_interval: None,
        output_dir: env_config.output_dir,
    }
}

fn cli_layer(args: &Args) -> Result<ConfigLayer, Box<dyn std::error::Error>> {
    // Handle TLD precedence: explicit list > category > whole catalog
    let tlds = if let Some(tlds) = &args.tlds {
        Some(tlds.clone())
    } else if let Some(category) = &args.category {
        Some(category_tlds(category)?)
    } else if args.all_tlds {
        Some(domain_sweep_lib::get_all_catalog_tlds())
    } else {
        None
    };

    let timeout = match &args.timeout {
        Some(raw) => Some(parse_timeout_string(raw).ok_or_else(|| {
            format!(
                "Invalid timeout '{}', use a format like '2s', '1500ms' or '1m'",
                raw
            )
        })?),
        None => None,
    };

    Ok(ConfigLayer {
        length: args.length,
        tlds,
        strategy: resolve_strategy(args.strategy.as_deref(), args.batch_size, args.workers)?,
        timeout,
        rdap_base_url: args.rdap_url.clone(),
        rate_limit: args.rate_limit,
        sample_size: args.sample_size,
        progress_interval: None,
        output_dir: args.output_dir.clone(),
    })
}

fn category_tlds(category: &str) -> Result<Vec<String>, String> {
    get_category_tlds(category).ok_or_else(|| {
        format!(
            "Unknown category '{}'. Available: {}",
            category,
            get_available_categories().join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_sweep_lib::{NetworkSection, OutputSection, ScanSection};

    // Helper function with all required fields
    fn create_test_args() -> Args {
        Args {
            length: None,
            tlds: None,
            category: None,
            all_tlds: false,
            list_tlds: false,
            strategy: None,
            batch_size: None,
            workers: None,
            sample_size: None,
            timeout: None,
            rdap_url: None,
            rate_limit: None,
            output_dir: None,
            json: false,
            dry_run: false,
            yes: false,
            config: None,
            debug: false,
            verbose: false,
        }
    }

    fn file_with_scan(scan: ScanSection) -> FileConfig {
        FileConfig {
            scan: Some(scan),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_multiple_tld_sources() {
        let mut args = create_test_args();
        args.tlds = Some(vec!["io".to_string()]);
        args.category = Some("popular".to_string());
        assert!(validate_args(&args).is_err());

        let mut args = create_test_args();
        args.category = Some("popular".to_string());
        args.all_tlds = true;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_length_range() {
        let mut args = create_test_args();
        args.length = Some(5);
        assert!(validate_args(&args).is_err());

        args.length = Some(4);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_list_tlds_skips_checks() {
        let mut args = create_test_args();
        args.list_tlds = true;
        args.length = Some(9);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config =
            resolve_config(FileConfig::default(), EnvConfig::default(), &create_test_args())
                .unwrap();
        assert_eq!(config.scan.length, 3);
        assert_eq!(config.scan.tlds, vec!["com"]);
        assert_eq!(config.scan.strategy, StrategyChoice::Auto);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let file = FileConfig {
            scan: Some(ScanSection {
                length: Some(4),
                tlds: Some(vec!["net".to_string()]),
                strategy: Some("stable".to_string()),
                ..Default::default()
            }),
            network: Some(NetworkSection {
                timeout: Some("5s".to_string()),
                ..Default::default()
            }),
            output: Some(OutputSection {
                directory: Some("from-file".to_string()),
                progress_interval: Some(100),
            }),
            ..Default::default()
        };
        let env = EnvConfig {
            tlds: Some(vec!["org".to_string()]),
            strategy: Some("fast".to_string()),
            output_dir: Some("from-env".to_string()),
            ..Default::default()
        };
        let mut args = create_test_args();
        args.tlds = Some(vec!["io".to_string()]);

        let config = resolve_config(file, env, &args).unwrap();

        assert_eq!(config.scan.length, 4);
        assert_eq!(config.scan.tlds, vec!["io"]);
        assert_eq!(config.scan.strategy, StrategyChoice::Fast);
        assert_eq!(config.scan.timeout, Duration::from_secs(5));
        assert_eq!(config.scan.progress_interval, 100);
        assert_eq!(config.output_dir, PathBuf::from("from-env"));
    }

    #[test]
    fn test_category_resolution() {
        let file = file_with_scan(ScanSection {
            category: Some("government".to_string()),
            ..Default::default()
        });
        let config = resolve_config(file, EnvConfig::default(), &create_test_args()).unwrap();
        assert_eq!(config.scan.tlds, vec!["gov", "edu", "mil"]);

        let mut args = create_test_args();
        args.category = Some("nowhere".to_string());
        assert!(resolve_config(FileConfig::default(), EnvConfig::default(), &args).is_err());
    }

    #[test]
    fn test_all_flag_uses_catalog() {
        let mut args = create_test_args();
        args.all_tlds = true;
        let config = resolve_config(FileConfig::default(), EnvConfig::default(), &args).unwrap();
        assert_eq!(config.scan.tlds, domain_sweep_lib::get_all_catalog_tlds());
    }

    #[test]
    fn test_custom_strategy_from_sizes() {
        let mut args = create_test_args();
        args.batch_size = Some(25);
        args.workers = Some(40);
        let config = resolve_config(FileConfig::default(), EnvConfig::default(), &args).unwrap();
        assert_eq!(
            config.scan.strategy,
            StrategyChoice::Custom {
                batch_size: 25,
                workers: 40
            }
        );

        let mut args = create_test_args();
        args.strategy = Some("fast".to_string());
        args.workers = Some(40);
        assert!(resolve_config(FileConfig::default(), EnvConfig::default(), &args).is_err());
    }

    #[test]
    fn test_invalid_env_strategy_ignored() {
        let env = EnvConfig {
            strategy: Some("custom".to_string()),
            ..Default::default()
        };
        let config = resolve_config(FileConfig::default(), env, &create_test_args()).unwrap();
        assert_eq!(config.scan.strategy, StrategyChoice::Auto);
    }

    #[test]
    fn test_invalid_cli_timeout_rejected() {
        let mut args = create_test_args();
        args.timeout = Some("soon".to_string());
        assert!(resolve_config(FileConfig::default(), EnvConfig::default(), &args).is_err());

        args.timeout = Some("1500ms".to_string());
        let config = resolve_config(FileConfig::default(), EnvConfig::default(), &args).unwrap();
        assert_eq!(config.scan.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_write_results_sorted_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        let available = vec!["aaa.io", "zzz.io"];

        write_results(&path, &available).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "aaa.io\nzzz.io\n");
    }

    #[test]
    fn test_write_results_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        write_results(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
