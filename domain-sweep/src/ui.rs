//! Terminal display for domain-sweep.
//!
//! Header, live progress line, benchmark table and the final summary. Live
//! output goes to stderr so stdout stays clean for `--json`. Uses only the
//! `console` crate.

use console::{pad_str, style, Alignment, Term};
use domain_sweep_lib::{BenchmarkReport, ProgressReceiver, ProgressSnapshot, ScanConfig, ScanReport};
use std::path::Path;
use std::time::Duration;

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a scan.
pub fn print_header(config: &ScanConfig, total: usize) {
    eprintln!(
        "{} {} {}",
        style("domain-sweep").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "- Scanning {} {}-letter candidate{}",
            total,
            config.length,
            if total == 1 { "" } else { "s" }
        ))
        .dim(),
    );

    let mut meta_parts: Vec<String> = vec![format!("TLDs: {}", config.tlds.join(", "))];
    meta_parts.push(format!("Strategy: {}", config.strategy));
    meta_parts.push(format!("Timeout: {}ms", config.timeout.as_millis()));
    if let Some(rate) = config.max_requests_per_second {
        meta_parts.push(format!("Rate limit: {}/s", rate));
    }

    eprintln!("{}", style(meta_parts.join(" | ")).dim());
    eprintln!();
}

// ── Progress ─────────────────────────────────────────────────────────────────

/// One-line rendering of a progress snapshot.
pub fn format_progress(snapshot: &ProgressSnapshot) -> String {
    let eta = match snapshot.eta {
        Some(eta) => format_duration(eta),
        None => "--".to_string(),
    };
    format!(
        "[{}/{}] {:.1}% | {:.1} domains/s | ETA {} | {} available",
        snapshot.completed,
        snapshot.total,
        snapshot.percent,
        snapshot.rate,
        eta,
        snapshot.available_count
    )
}

/// Render progress snapshots on stderr until the scan drops its sender.
pub async fn render_progress(mut progress: ProgressReceiver) {
    let term = Term::stderr();
    let interactive = term.is_term();

    while progress.changed().await.is_ok() {
        let Some(snapshot) = progress.borrow_and_update().clone() else {
            continue;
        };
        let line = format_progress(&snapshot);
        if interactive {
            let _ = term.clear_line();
            let _ = term.write_str(&format!("{}", style(line).cyan()));
        } else {
            let _ = term.write_line(&line);
        }
    }

    if interactive {
        let _ = term.clear_line();
    }
}

// ── Benchmark ────────────────────────────────────────────────────────────────

pub fn print_benchmark(report: &BenchmarkReport) {
    eprintln!(
        "{}",
        style(format!("Benchmark on {} sampled domains", report.sample_size)).bold()
    );
    for run in &report.runs {
        let marker = if run.strategy == report.best {
            style("*").green().bold().to_string()
        } else {
            " ".to_string()
        };
        eprintln!(
            "  {} {}  {:>7.2}s  {:>8.1}/s  {:>5} ok  {:>5} failed",
            marker,
            pad_str(&run.strategy.to_string(), 24, Alignment::Left, None),
            run.elapsed.as_secs_f64(),
            run.rate,
            run.succeeded,
            run.failed,
        );
    }
    eprintln!("  Selected: {}", style(report.best).green());
    eprintln!();
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar and where the results went.
pub fn print_summary(report: &ScanReport, output: Option<&Path>) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    if report.was_cancelled() {
        println!(
            "  {}",
            style(format!(
                "Scan cancelled after {} of {} domains",
                report.total_checked, report.total_candidates
            ))
            .yellow()
        );
    }
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}  {}  {:.1}/s",
        style(report.total_checked).bold(),
        if report.total_checked == 1 { "" } else { "s" },
        report.elapsed.as_secs_f64(),
        style("|").dim(),
        style(format!(
            "{} available ({:.2}%)",
            report.available_count,
            report.efficiency()
        ))
        .green(),
        style("|").dim(),
        style(format!("{} uncertain", report.failed_count)).yellow(),
        style("|").dim(),
        report.throughput,
    );
    if let Some(strategy) = report.strategy {
        println!("  {}", style(format!("Strategy: {}", strategy)).dim());
    }
    let available = sorted_available(report);
    if !available.is_empty() {
        println!();
        println!("  {}", style("Available:").bold());
        for domain in &available {
            println!("    {}", style(domain).green());
        }
        println!();
    }
    if let Some(path) = output {
        println!("  Results saved to {}", style(path.display()).bold());
    }
}

/// Available domains in sorted order, as written to the results file.
pub fn sorted_available(report: &ScanReport) -> Vec<&str> {
    let mut available: Vec<&str> = report.available.iter().map(String::as_str).collect();
    available.sort_unstable();
    available
}

/// Compact duration like `45s`, `3m 07s` or `1h 02m`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
