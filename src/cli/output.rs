//! Output formatting for pagecheck.
//!
//! Provides terminal, JSON, and JUnit XML output formatters.
//!
//! # Graceful Degradation
//!
//! - Color: disabled via NO_COLOR or --no-color
//! - Empty reports: produce valid output with zero rules
//! - Multi-line details: indented under the rule in terminal output
//!
//! All formatters produce valid output for any ValidationReport input.

use crate::cli::args::OutputFormat;
use crate::engine::result::ValidationReport;
use crate::{Check, CheckCategory, CheckResult};
use chrono::DateTime;
use colored::{ColoredString, Colorize};
use serde_json::json;

const RULE: &str = "--------------------------------------------------------------------------------";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a validation report into a string
    fn format(&self, report: &ValidationReport) -> String;
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool, quiet: bool) -> Self {
        // colored turns itself off when stdout is not a terminal
        if color {
            colored::control::set_override(true);
        }
        TerminalFormatter {
            color,
            verbose,
            quiet,
        }
    }

    fn status_tag(&self, result: Option<&CheckResult>) -> String {
        let (tag, paint): (&str, fn(&str) -> ColoredString) = match result {
            Some(CheckResult::Pass { .. }) => ("[PASS]", |t| t.green()),
            Some(CheckResult::Warn { .. }) => ("[WARN]", |t| t.yellow()),
            Some(CheckResult::Fail { .. }) => ("[FAIL]", |t| t.red()),
            Some(CheckResult::Skip { .. }) => ("[SKIP]", |t| t.bright_black()),
            None => ("[----]", |t| t.bright_black()),
        };
        if self.color {
            paint(tag).to_string()
        } else {
            tag.to_string()
        }
    }

    fn is_issue(check: &Check) -> bool {
        matches!(
            check.result,
            Some(CheckResult::Fail { .. }) | Some(CheckResult::Warn { .. })
        )
    }

    fn format_check(&self, check: &Check, output: &mut String) {
        let result = check.result.as_ref();
        let message = result.map(CheckResult::message).unwrap_or("Not executed");

        output.push_str(&format!(
            "  {} {}: {} ({})",
            self.status_tag(result),
            check.id,
            check.name,
            message
        ));
        if self.verbose && result.is_some() {
            output.push_str(&format!(" [{}ms]", check.duration_ms));
        }
        output.push('\n');

        // Details are always shown for failures; for warnings only when verbose
        let details = match result {
            Some(CheckResult::Fail { details, .. }) => Some(details),
            Some(CheckResult::Warn { details, .. }) if self.verbose => Some(details),
            _ => None,
        };
        if let Some(details) = details {
            for line in details.lines().filter(|l| *l != message) {
                output.push_str(&format!("         {}\n", line));
            }
        }
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        // Header
        output.push_str(RULE);
        output.push('\n');
        output.push_str("pagecheck validation report\n");
        output.push_str(&format!("Document: {}\n", report.source));
        output.push_str(&format!("Profile: {}\n", report.profile));
        output.push_str(&format!("Timestamp: {}\n", format_timestamp(report.timestamp)));
        output.push_str(RULE);
        output.push_str("\n\n");

        for category in CheckCategory::ALL {
            let category_checks: Vec<&Check> = report
                .checks
                .iter()
                .filter(|c| c.category == category)
                .filter(|c| !self.quiet || Self::is_issue(c))
                .collect();

            if category_checks.is_empty() {
                continue;
            }

            output.push_str(&format!("{} CHECKS\n", category.to_string().to_uppercase()));
            for check in category_checks {
                self.format_check(check, &mut output);
            }
            output.push('\n');
        }

        // Summary
        let summary = report.summary();
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "SUMMARY: {} passed, {} warnings, {} failed, {} skipped\n",
            summary.passed, summary.warned, summary.failed, summary.skipped
        ));
        output.push_str(&format!(
            "Total time: {:.1}s\n",
            report.total_duration_ms as f64 / 1000.0
        ));

        let (exit_code, exit_desc) = if summary.failed > 0 {
            (1, "failures detected")
        } else if summary.warned > 0 {
            (2, "warnings detected")
        } else {
            (0, "all checks passed")
        };
        output.push_str(&format!("Exit code: {} ({})\n", exit_code, exit_desc));
        output.push_str(RULE);

        output
    }
}

/// JSON formatter
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let value = json!({
            "timestamp": report.timestamp,
            "source": report.source,
            "profile": report.profile,
            "total_duration_ms": report.total_duration_ms,
            "passed": report.passed(),
            "summary": report.summary(),
            "checks": report.checks,
        });

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        // A json! value always serializes
        rendered.unwrap_or_default()
    }
}

/// JUnit XML formatter
pub struct JunitFormatter;

impl JunitFormatter {
    pub fn new() -> Self {
        JunitFormatter
    }

    fn escape_xml(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&apos;"),
                c => result.push(c),
            }
        }
        result
    }

    fn seconds(check: &Check) -> f64 {
        check.duration_ms as f64 / 1000.0
    }
}

impl Default for JunitFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JunitFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let mut output = String::new();
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        let summary = report.summary();
        output.push_str(&format!(
            "<testsuites name=\"pagecheck\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\">\n",
            summary.total,
            summary.failed,
            summary.skipped,
            report.total_duration_ms as f64 / 1000.0
        ));

        for category in CheckCategory::ALL {
            let category_checks: Vec<&Check> = report
                .checks
                .iter()
                .filter(|c| c.category == category)
                .collect();

            if category_checks.is_empty() {
                continue;
            }

            let suite_name = category.to_string().to_lowercase();
            let suite_failures = category_checks
                .iter()
                .filter(|c| matches!(c.result, Some(CheckResult::Fail { .. })))
                .count();
            let suite_skipped = category_checks
                .iter()
                .filter(|c| matches!(c.result, Some(CheckResult::Skip { .. }) | None))
                .count();
            let suite_time: f64 = category_checks
                .iter()
                .map(|c| Self::seconds(c))
                .sum();

            output.push_str(&format!(
                "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\">\n",
                suite_name,
                category_checks.len(),
                suite_failures,
                suite_skipped,
                suite_time
            ));

            for check in category_checks {
                output.push_str(&format!(
                    "    <testcase name=\"{}: {}\" classname=\"pagecheck.{}\" time=\"{:.3}\"",
                    Self::escape_xml(&check.id),
                    Self::escape_xml(&check.name),
                    suite_name,
                    Self::seconds(check)
                ));

                match &check.result {
                    Some(CheckResult::Pass { message }) => {
                        output.push_str(">\n");
                        output.push_str(&format!(
                            "      <system-out>{}</system-out>\n",
                            Self::escape_xml(message)
                        ));
                        output.push_str("    </testcase>\n");
                    }
                    Some(CheckResult::Warn { message, details }) => {
                        output.push_str(">\n");
                        output.push_str(&format!(
                            "      <system-out>WARNING: {}\n{}</system-out>\n",
                            Self::escape_xml(message),
                            Self::escape_xml(details)
                        ));
                        output.push_str("    </testcase>\n");
                    }
                    Some(CheckResult::Fail { message, details }) => {
                        output.push_str(">\n");
                        output.push_str(&format!(
                            "      <failure message=\"{}\">{}</failure>\n",
                            Self::escape_xml(message),
                            Self::escape_xml(details)
                        ));
                        output.push_str("    </testcase>\n");
                    }
                    Some(CheckResult::Skip { reason }) => {
                        output.push_str(">\n");
                        output.push_str(&format!(
                            "      <skipped message=\"{}\" />\n",
                            Self::escape_xml(reason)
                        ));
                        output.push_str("    </testcase>\n");
                    }
                    None => {
                        output.push_str(" />\n");
                    }
                }
            }

            output.push_str("  </testsuite>\n");
        }

        output.push_str("</testsuites>");
        output
    }
}

/// Get a formatter based on the output format
pub fn get_formatter(
    format: OutputFormat,
    no_color: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TerminalFormatter::new(!no_color, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Junit => Box::new(JunitFormatter::new()),
    }
}

/// Format a Unix timestamp as ISO 8601 (UTC)
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}
