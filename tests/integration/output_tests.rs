//! Output formatting tests.
//!
//! Tests for terminal, JSON, and JUnit XML output formatters.

use pagecheck::cli::args::OutputFormat;
use pagecheck::cli::output::{get_formatter, JsonFormatter, JunitFormatter, OutputFormatter, TerminalFormatter};
use pagecheck::engine::result::ValidationReport;
use pagecheck::{Check, CheckCategory, CheckResult, Profile};

fn check(id: &str, name: &str, category: CheckCategory, result: CheckResult, duration_ms: u64) -> Check {
    Check {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: format!("{} description", name),
        result: Some(result),
        duration_ms,
    }
}

fn create_sample_report() -> ValidationReport {
    ValidationReport {
        timestamp: 1733500000,
        source: "site/index.html".to_string(),
        profile: Profile::Standard,
        checks: vec![
            check(
                "STR-001",
                "Doctype Declaration",
                CheckCategory::Structure,
                CheckResult::Pass {
                    message: "Found <!DOCTYPE html> declaration".to_string(),
                },
                1,
            ),
            check(
                "STR-003",
                "Language Attribute",
                CheckCategory::Structure,
                CheckResult::Fail {
                    message: "Include a lang attribute assigned to \"en\" for English in the <html> tag".to_string(),
                    details: "Expected lang=\"en\" on the <html> tag, but the attribute is missing".to_string(),
                },
                2,
            ),
            check(
                "HEAD-004",
                "Title Content",
                CheckCategory::Head,
                CheckResult::Pass {
                    message: "The <title> reads 'My Site Title'".to_string(),
                },
                0,
            ),
            check(
                "CONF-001",
                "HTML Conformance",
                CheckCategory::Conformance,
                CheckResult::Warn {
                    message: "Document is valid with 1 warning(s)".to_string(),
                    details: "line 2, column 1: Consider adding a “lang” attribute.".to_string(),
                },
                350,
            ),
        ],
        total_duration_ms: 360,
    }
}

#[test]
fn test_terminal_groups_by_category() {
    let output = TerminalFormatter::new(false, false, false).format(&create_sample_report());

    assert!(output.contains("Document: site/index.html"));
    assert!(output.contains("STRUCTURE CHECKS"));
    assert!(output.contains("HEAD CHECKS"));
    assert!(output.contains("CONFORMANCE CHECKS"));
    assert!(!output.contains("METADATA CHECKS"));
    assert!(output.find("STRUCTURE CHECKS") < output.find("HEAD CHECKS"));
    assert!(output.contains("[FAIL] STR-003: Language Attribute"));
    assert!(output.contains("SUMMARY: 2 passed, 1 warnings, 1 failed, 0 skipped"));
    assert!(output.contains("Exit code: 1 (failures detected)"));
    assert!(output.contains("2024-12-06T"));
}

#[test]
fn test_terminal_shows_failure_details() {
    let output = TerminalFormatter::new(false, false, false).format(&create_sample_report());
    assert!(output.contains("but the attribute is missing"));
    // warning details only in verbose mode
    assert!(!output.contains("Consider adding"));

    let verbose = TerminalFormatter::new(false, true, false).format(&create_sample_report());
    assert!(verbose.contains("Consider adding"));
    assert!(verbose.contains("[350ms]"));
}

#[test]
fn test_terminal_quiet_hides_passes() {
    let output = TerminalFormatter::new(false, false, true).format(&create_sample_report());
    assert!(!output.contains("STR-001"));
    assert!(!output.contains("HEAD CHECKS"));
    assert!(output.contains("STR-003"));
    assert!(output.contains("CONF-001"));
}

#[test]
fn test_terminal_color() {
    let colored = TerminalFormatter::new(true, false, false).format(&create_sample_report());
    assert!(colored.contains("\x1b[31m[FAIL]\x1b[0m"));
    assert!(colored.contains("\x1b[32m[PASS]\x1b[0m"));

    let plain = TerminalFormatter::new(false, false, false).format(&create_sample_report());
    assert!(!plain.contains("\x1b["));
}

#[test]
fn test_json_is_parseable() {
    let output = JsonFormatter::new(true).format(&create_sample_report());
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["source"], "site/index.html");
    assert_eq!(value["profile"], "standard");
    assert_eq!(value["passed"], false);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["summary"]["total"], 4);

    let checks = value["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 4);
    assert_eq!(checks[1]["id"], "STR-003");
    assert_eq!(checks[1]["category"], "Structure");
    assert_eq!(checks[1]["result"]["status"], "fail");
    assert_eq!(checks[3]["result"]["status"], "warn");
    assert_eq!(checks[3]["duration_ms"], 350);
    assert!(checks[3]["result"].get("duration_ms").is_none());
    assert_eq!(value["summary"]["total_duration_ms"], 353);
}

#[test]
fn test_json_compact_has_no_newlines() {
    let output = JsonFormatter::new(false).format(&create_sample_report());
    assert!(!output.contains('\n'));
}

#[test]
fn test_junit_structure() {
    let output = JunitFormatter::new().format(&create_sample_report());

    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(output.contains("<testsuites name=\"pagecheck\" tests=\"4\" failures=\"1\""));
    assert!(output.contains("<testsuite name=\"structure\" tests=\"2\" failures=\"1\""));
    assert!(output.contains("<testsuite name=\"conformance\""));
    assert!(output.contains("classname=\"pagecheck.head\""));
    assert!(output.contains("<failure message=\"Include a lang attribute assigned to &quot;en&quot;"));
    assert!(output.contains("&lt;html&gt;"));
    assert!(output.ends_with("</testsuites>"));
}

#[test]
fn test_junit_skipped() {
    let mut report = create_sample_report();
    report.checks.push(check(
        "HEAD-001",
        "Stylesheet Link",
        CheckCategory::Head,
        CheckResult::Skip {
            reason: "not applicable".to_string(),
        },
        0,
    ));
    let output = JunitFormatter::new().format(&report);
    assert!(output.contains("<skipped message=\"not applicable\" />"));
}

#[test]
fn test_junit_times_come_from_checks() {
    let output = JunitFormatter::new().format(&create_sample_report());
    assert!(output.contains("name=\"conformance\" tests=\"1\" failures=\"0\" errors=\"0\" skipped=\"0\" time=\"0.350\""));
    assert!(output.contains("name=\"STR-003: Language Attribute\" classname=\"pagecheck.structure\" time=\"0.002\""));
}

#[test]
fn test_empty_report() {
    let report = ValidationReport::new();
    for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Junit] {
        let output = get_formatter(format, true, false, false).format(&report);
        assert!(!output.is_empty());
    }

    let json = JsonFormatter::new(true).format(&report);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["passed"], true);
    assert_eq!(value["checks"].as_array().unwrap().len(), 0);
}
