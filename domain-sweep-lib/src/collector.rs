//! Aggregation of check results into the final report.
//!
//! [`ResultCollector`] only counts and appends, so feeding it the same
//! multiset of results in any order yields the same counts and the same
//! set of available names.

use crate::types::{CheckResult, ScanPhase, ScanReport};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultCollector {
    available: Vec<String>,
    checked: usize,
    available_count: usize,
    failed_count: usize,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a whole result set at once.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a CheckResult>,
    {
        let mut collector = Self::new();
        for result in results {
            collector.absorb_one(result);
        }
        collector
    }

    /// Add the results of one finished batch.
    pub fn absorb(&mut self, results: &[CheckResult]) {
        for result in results {
            self.absorb_one(result);
        }
    }

    pub fn absorb_one(&mut self, result: &CheckResult) {
        self.checked += 1;
        if result.available {
            self.available_count += 1;
            self.available.push(result.domain.clone());
        }
        if !result.outcome.is_definitive() {
            self.failed_count += 1;
        }
    }

    /// Available names in the order they were absorbed.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Available names, sorted; the order the persistence layer writes.
    pub fn sorted_available(&self) -> Vec<String> {
        let mut sorted = self.available.clone();
        sorted.sort();
        sorted
    }

    pub fn checked(&self) -> usize {
        self.checked
    }

    pub fn available_count(&self) -> usize {
        self.available_count
    }

    /// Lookups that ended without a definitive answer and were counted as
    /// registered.
    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    /// Freeze the aggregate into a report.
    ///
    /// Strategy and benchmark details are filled in by the scanner.
    pub fn into_report(
        self,
        total_candidates: usize,
        elapsed: Duration,
        phase: ScanPhase,
    ) -> ScanReport {
        let secs = elapsed.as_secs_f64();
        let throughput = if secs > 0.0 {
            self.checked as f64 / secs
        } else {
            0.0
        };

        ScanReport {
            available: self.available,
            total_candidates,
            total_checked: self.checked,
            available_count: self.available_count,
            failed_count: self.failed_count,
            elapsed,
            throughput,
            strategy: None,
            benchmark: None,
            phase,
        }
    }
}
