//! Result aggregation and reporting.
//!
//! Collects rule outcomes in registry order and derives summary counts.

use crate::{Check, CheckResult, Profile};
use serde::Serialize;

/// Result summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub passed: u32,
    pub warned: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total: u32,
    pub total_duration_ms: u64,
}

impl ResultSummary {
    fn tally<'a>(checks: impl IntoIterator<Item = &'a Check>) -> Self {
        let mut summary = ResultSummary::default();

        for check in checks {
            summary.total += 1;
            summary.total_duration_ms += check.duration_ms;

            match &check.result {
                Some(CheckResult::Pass { .. }) => summary.passed += 1,
                Some(CheckResult::Warn { .. }) => summary.warned += 1,
                Some(CheckResult::Fail { .. }) => summary.failed += 1,
                Some(CheckResult::Skip { .. }) | None => summary.skipped += 1,
            }
        }

        summary
    }
}

/// Validation report containing every rule outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Unix timestamp (seconds) when the report was built
    pub timestamp: u64,
    /// Path of the checked document, or `<memory>`
    pub source: String,
    pub profile: Profile,
    pub checks: Vec<Check>,
    pub total_duration_ms: u64,
}

impl ValidationReport {
    /// Create a new empty report
    pub fn new() -> Self {
        ValidationReport {
            timestamp: unix_timestamp(),
            source: String::new(),
            profile: Profile::default(),
            checks: Vec::new(),
            total_duration_ms: 0,
        }
    }

    /// Calculate summary statistics
    pub fn summary(&self) -> ResultSummary {
        ResultSummary::tally(&self.checks)
    }

    /// True when no rule failed
    pub fn passed(&self) -> bool {
        !self.checks.iter().any(|c| matches!(c.result, Some(CheckResult::Fail { .. })))
    }

    /// Outcome of a rule by ID
    pub fn result_of(&self, id: &str) -> Option<&CheckResult> {
        self.checks
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.result.as_ref())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Result aggregator for collecting rule outcomes
pub struct ResultAggregator {
    checks: Vec<Check>,
    source: String,
    profile: Profile,
    total_duration_ms: u64,
}

impl ResultAggregator {
    /// Create a new result aggregator
    pub fn new() -> Self {
        ResultAggregator {
            checks: Vec::new(),
            source: String::new(),
            profile: Profile::default(),
            total_duration_ms: 0,
        }
    }

    /// Set report metadata
    pub fn set_metadata(&mut self, source: String, profile: Profile, total_duration_ms: u64) {
        self.source = source;
        self.profile = profile;
        self.total_duration_ms = total_duration_ms;
    }

    /// Add a completed rule outcome
    pub fn add_result(&mut self, check: Check) {
        self.checks.push(check);
    }

    /// Get summary statistics
    pub fn get_summary(&self) -> ResultSummary {
        ResultSummary::tally(&self.checks)
    }

    /// Create final validation report
    pub fn into_report(self) -> ValidationReport {
        ValidationReport {
            timestamp: unix_timestamp(),
            source: self.source,
            profile: self.profile,
            checks: self.checks,
            total_duration_ms: self.total_duration_ms,
        }
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_timestamp() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}
