// domain-sweep/tests/cli_integration.rs

//! CLI tests. Scans run against a local mock RDAP server.

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the user's config files and DS_* environment.
fn sweep_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("domain-sweep").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    for key in [
        "DS_LENGTH",
        "DS_TLD",
        "DS_CATEGORY",
        "DS_STRATEGY",
        "DS_BATCH_SIZE",
        "DS_WORKERS",
        "DS_TIMEOUT",
        "DS_RDAP_URL",
        "DS_RATE_LIMIT",
        "DS_SAMPLE_SIZE",
        "DS_OUTPUT_DIR",
        "DS_CONFIG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_help_lists_flags() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--length"))
        .stdout(predicate::str::contains("--category"))
        .stdout(predicate::str::contains("--strategy"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--rate-limit"));
}

#[test]
fn test_list_tlds() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .arg("--list-tlds")
        .assert()
        .success()
        .stdout(predicate::str::contains("popular"))
        .stdout(predicate::str::contains("government"))
        .stdout(predicate::str::contains("gov, edu, mil"));
}

#[test]
fn test_dry_run_plan() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--length", "3", "--tld", "io", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Candidates:  17576"))
        .stdout(predicate::str::contains("aaa.io"))
        .stdout(predicate::str::contains(
            "available_domains_3letters_io.txt",
        ))
        .stderr(predicate::str::contains("17576 domains would be checked"));
}

#[test]
fn test_dry_run_json_plan() {
    let home = TempDir::new().unwrap();
    let output = sweep_cmd(&home)
        .args(["-l", "3", "-t", ".IO,com,io", "--strategy", "fast", "--dry-run", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["total_candidates"], 2 * 17_576);
    assert_eq!(plan["tlds"], serde_json::json!(["io", "com"]));
    assert_eq!(plan["strategy"], "fast");
    assert_eq!(plan["preview"][0], "aaa.io");
}

#[test]
fn test_dry_run_custom_strategy() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--tld", "io", "--batch-size", "10", "--workers", "30", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom (10x30)"));
}

#[test]
fn test_dry_run_reads_config_file() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("sweep.toml");
    fs::write(
        &config_path,
        r#"
[scan]
length = 4
category = "government"

[network]
rdap_base_url = "https://rdap.example.test"
"#,
    )
    .unwrap();

    sweep_cmd(&home)
        .args(["--dry-run", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("TLDs:        gov, edu, mil"))
        .stdout(predicate::str::contains("Candidates:  1370928"))
        .stdout(predicate::str::contains("https://rdap.example.test"));
}

#[test]
fn test_local_config_discovered_and_cli_wins() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("domain-sweep.toml"),
        "[scan]\nlength = 4\ntlds = [\"net\"]\n",
    )
    .unwrap();

    sweep_cmd(&home)
        .args(["--tld", "io", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Length:      4"))
        .stdout(predicate::str::contains("TLDs:        io"));
}

#[test]
fn test_env_overrides_defaults() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .env("DS_TLD", "dev,app")
        .env("DS_STRATEGY", "stable")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("TLDs:        dev, app"))
        .stdout(predicate::str::contains("Strategy:    stable"));
}

#[test]
fn test_rejects_invalid_length() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--length", "5", "--tld", "io", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Length must be 3 or 4"));
}

#[test]
fn test_rejects_multiple_tld_sources() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--tld", "io", "--category", "popular", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("multiple TLD sources"));
}

#[test]
fn test_rejects_sizes_with_named_strategy() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--tld", "io", "--strategy", "fast", "--workers", "5", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("custom strategy"));
}

#[test]
fn test_rejects_out_of_range_custom_strategy() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--tld", "io", "--batch-size", "0", "--workers", "5", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch size must be between 1 and 100"));
}

#[test]
fn test_rejects_unknown_category() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--category", "moon", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category 'moon'"));
}

#[test]
fn test_rejects_invalid_tld() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--tld", "co.uk", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_rejects_bad_timeout() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--tld", "io", "--timeout", "soon", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timeout"));
}

#[test]
fn test_missing_config_file_fails() {
    let home = TempDir::new().unwrap();
    sweep_cmd(&home)
        .args(["--config", "does-not-exist.toml", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config file"));
}

/// Mock RDAP server where only `aaa.io` and `zzz.io` are unregistered.
fn rdap_server() -> mockito::ServerGuard {
    let mut server = Server::new();
    server
        .mock("GET", Matcher::Regex(r"^/domain/[a-z]{3}\.io$".to_string()))
        .with_status_code_from_request(|request| match request.path() {
            "/domain/aaa.io" | "/domain/zzz.io" => 404,
            _ => 200,
        })
        .create();
    server
}

#[test]
fn test_scan_writes_sorted_results_and_json_report() {
    let home = TempDir::new().unwrap();
    let server = rdap_server();
    let out_dir = home.path().join("out");

    let output = sweep_cmd(&home)
        .args(["-l", "3", "-t", "io", "--strategy", "stable", "--timeout", "10s"])
        .args(["--rdap-url", &server.url()])
        .arg("-o")
        .arg(&out_dir)
        .args(["--json", "-y"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let results = fs::read_to_string(out_dir.join("available_domains_3letters_io.txt")).unwrap();
    assert_eq!(results, "aaa.io\nzzz.io\n");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["phase"], "completed");
    assert_eq!(report["total_candidates"], 17_576);
    assert_eq!(report["total_checked"], 17_576);
    assert_eq!(report["available_count"], 2);
    assert_eq!(report["failed_count"], 0);
    assert_eq!(report["strategy"]["batch_size"], 50);
    assert_eq!(report["strategy"]["max_workers"], 10);
    assert!(report.get("benchmark").is_none());

    let mut available: Vec<String> =
        serde_json::from_value(report["available"].clone()).unwrap();
    available.sort();
    assert_eq!(available, vec!["aaa.io", "zzz.io"]);
}

#[test]
fn test_scan_summary_lists_available_domains() {
    let home = TempDir::new().unwrap();
    let server = rdap_server();

    sweep_cmd(&home)
        .args(["-l", "3", "-t", "io", "--strategy", "stable", "--timeout", "10s"])
        .args(["--rdap-url", &server.url()])
        .arg("-y")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 available"))
        .stdout(predicate::str::contains("Available:"))
        .stdout(predicate::str::is_match(r"(?s)aaa\.io.*zzz\.io").unwrap())
        .stdout(predicate::str::contains("available_domains_3letters_io.txt"));

    assert_eq!(
        fs::read_to_string(home.path().join("available_domains_3letters_io.txt")).unwrap(),
        "aaa.io\nzzz.io\n"
    );
}
