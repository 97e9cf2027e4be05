//! Utility functions for TLD handling and output naming.
//!
//! This module contains helper functions used by configuration validation
//! and by the persistence layer.

use crate::error::DomainSweepError;

/// Normalize a TLD as typed by a user: trim, drop leading dots, lowercase.
///
/// # Examples
///
/// ```
/// use domain_sweep_lib::normalize_tld;
///
/// assert_eq!(normalize_tld(" .IO "), "io");
/// assert_eq!(normalize_tld("com"), "com");
/// ```
pub fn normalize_tld(tld: &str) -> String {
    tld.trim().trim_start_matches('.').to_lowercase()
}

/// Validate an already-normalized TLD.
///
/// Accepts ASCII letters, digits and inner hyphens (IDN `xn--` labels included).
pub fn validate_tld(tld: &str) -> Result<(), DomainSweepError> {
    if tld.is_empty() {
        return Err(DomainSweepError::invalid_tld(tld, "TLD cannot be empty"));
    }

    if tld.len() > 63 {
        return Err(DomainSweepError::invalid_tld(
            tld,
            "TLD is longer than 63 characters",
        ));
    }

    if tld.contains('.') {
        return Err(DomainSweepError::invalid_tld(
            tld,
            "multi-label suffixes are not supported",
        ));
    }

    if tld.starts_with('-') || tld.ends_with('-') {
        return Err(DomainSweepError::invalid_tld(
            tld,
            "TLD cannot start or end with a hyphen",
        ));
    }

    if !tld.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(DomainSweepError::invalid_tld(
            tld,
            "only ASCII letters, digits and hyphens are allowed",
        ));
    }

    Ok(())
}

/// Normalize, validate and de-duplicate a TLD list, keeping first occurrences.
///
/// Blank entries are skipped. An empty result is an error.
pub fn normalize_tlds(tlds: &[String]) -> Result<Vec<String>, DomainSweepError> {
    let mut results: Vec<String> = Vec::with_capacity(tlds.len());

    for raw in tlds {
        if raw.trim().is_empty() {
            continue;
        }
        let tld = normalize_tld(raw);
        validate_tld(&tld)?;
        if !results.contains(&tld) {
            results.push(tld);
        }
    }

    if results.is_empty() {
        return Err(DomainSweepError::EmptyTldSet);
    }

    Ok(results)
}

/// File name for the list of available domains of a scan.
///
/// Derived only from the name length and the TLD selection, so re-running
/// the same scan overwrites the same file.
///
/// # Examples
///
/// ```
/// use domain_sweep_lib::output_file_name;
///
/// let tlds = vec!["io".to_string(), ".com".to_string()];
/// assert_eq!(output_file_name(3, &tlds), "available_domains_3letters_io_com.txt");
/// ```
pub fn output_file_name(length: usize, tlds: &[String]) -> String {
    let suffix = tlds
        .iter()
        .map(|tld| normalize_tld(tld))
        .filter(|tld| !tld.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    format!("available_domains_{}letters_{}.txt", length, suffix)
}
