//! Full engine runs.
//!
//! Covers rule independence, determinism, selection, and the conformance
//! rule's interaction with the validator.

use crate::mocks::*;
use pagecheck::document::Document;
use pagecheck::engine::orchestrator::RuleEngine;
use pagecheck::engine::result::ValidationReport;
use pagecheck::validator::ValidatorError;
use pagecheck::{CheckCategory, CheckResult, PageCheckError, Profile};

fn run(raw: &str, engine: &RuleEngine) -> ValidationReport {
    let document = Document::parse(raw).unwrap();
    engine.run(&document).unwrap()
}

fn failing_ids(report: &ValidationReport) -> Vec<&str> {
    report
        .checks
        .iter()
        .filter(|c| matches!(c.result, Some(CheckResult::Fail { .. })))
        .map(|c| c.id.as_str())
        .collect()
}

#[test]
fn test_good_page_passes_every_markup_rule() {
    let engine = RuleEngine::with_profile(Profile::Standard);
    let report = run(GOOD_PAGE, &engine);

    for check in &report.checks {
        if check.category == CheckCategory::Conformance {
            continue;
        }
        assert!(
            matches!(check.result, Some(CheckResult::Pass { .. })),
            "{} did not pass: {:?}",
            check.id,
            check.result
        );
    }
    assert!(report.passed());
}

#[test]
fn test_missing_lang_fails_only_language_rule() {
    let engine = RuleEngine::with_profile(Profile::Standard)
        .with_validator(Box::new(MockValidator::clean()));
    let report = run(NO_LANG_PAGE, &engine);

    assert_eq!(failing_ids(&report), vec!["STR-003"]);
    let message = report.result_of("STR-003").unwrap().message();
    assert!(message.contains("\"en\""), "message was: {}", message);
}

#[test]
fn test_conformance_outcome_follows_validator() {
    let clean = RuleEngine::with_profile(Profile::Standard)
        .with_validator(Box::new(MockValidator::clean()));
    assert!(matches!(
        run(GOOD_PAGE, &clean).result_of("CONF-001"),
        Some(CheckResult::Pass { .. })
    ));

    let offline = RuleEngine::with_profile(Profile::Standard);
    assert!(matches!(
        run(GOOD_PAGE, &offline).result_of("CONF-001"),
        Some(CheckResult::Skip { .. })
    ));

    let warned = RuleEngine::with_profile(Profile::Standard)
        .with_validator(Box::new(MockValidator::with_warnings(&["Consider adding a “lang” attribute."])));
    let report = run(GOOD_PAGE, &warned);
    assert!(matches!(report.result_of("CONF-001"), Some(CheckResult::Warn { .. })));
    assert!(report.passed());
    assert_eq!(report.summary().warned, 1);
}

#[test]
fn test_every_validator_error_is_in_details() {
    let errors = [
        "Element “head” is missing a required instance of child element “title”.",
        "Stray end tag “div”.",
        "Attribute “foo” not allowed on element “body” at this point.",
    ];
    let engine = RuleEngine::with_profile(Profile::Standard)
        .with_validator(Box::new(MockValidator::with_errors(&errors)));
    let report = run(GOOD_PAGE, &engine);

    let result = report.result_of("CONF-001").unwrap();
    assert!(result.is_fail());
    assert_eq!(result.details(), Some(errors.join("\n").as_str()));
    assert_eq!(failing_ids(&report), vec!["CONF-001"]);
}

#[test]
fn test_validator_receives_raw_text() {
    let mock = MockValidator::clean();
    let engine = RuleEngine::with_profile(Profile::Standard).with_validator(Box::new(mock.clone()));
    run(GOOD_PAGE, &engine);

    assert_eq!(mock.calls(), 1);
    assert_eq!(mock.last_input().as_deref(), Some(GOOD_PAGE));
}

#[test]
fn test_validator_transport_failure_aborts_run() {
    let engine = RuleEngine::with_profile(Profile::Standard)
        .with_validator(Box::new(MockValidator::unreachable()));
    let document = Document::parse(GOOD_PAGE).unwrap();

    let err = engine.run(&document).unwrap_err();
    assert!(matches!(
        err,
        PageCheckError::Validator(ValidatorError::RequestFailed { .. })
    ));
}

#[test]
fn test_panicking_validator_fails_only_conformance() {
    let engine = RuleEngine::with_profile(Profile::Standard)
        .with_validator(Box::new(MockValidator::panicking()));
    let report = run(GOOD_PAGE, &engine);

    assert_eq!(report.checks.len(), 9);
    assert_eq!(failing_ids(&report), vec!["CONF-001"]);
    assert_eq!(
        report.result_of("CONF-001").unwrap().message(),
        "Rule panicked during execution"
    );
}

#[test]
fn test_missing_head_is_reported_not_crashed() {
    let engine = RuleEngine::with_profile(Profile::Standard);
    let report = run(HEADLESS_PAGE, &engine);

    let failing = failing_ids(&report);
    assert!(failing.contains(&"STR-004"));
    assert!(failing.contains(&"HEAD-001"));
    assert!(failing.contains(&"HEAD-003"));
    assert!(!failing.contains(&"STR-001"));
    assert!(!failing.contains(&"STR-003"));
    assert_eq!(report.checks.len(), 9);
}

#[test]
fn test_empty_document_fails_structure_and_head() {
    let engine = RuleEngine::with_profile(Profile::Standard);
    let document = Document::parse("").unwrap();
    let report = engine.run(&document).unwrap();

    let summary = report.summary();
    assert_eq!(summary.failed, 8);
    assert_eq!(summary.skipped, 1);
    assert!(report
        .checks
        .iter()
        .filter(|c| c.category != CheckCategory::Conformance)
        .all(|c| matches!(c.result, Some(CheckResult::Fail { .. }))));
}

#[test]
fn test_runs_are_deterministic() {
    let engine = RuleEngine::with_profile(Profile::Strict)
        .with_validator(Box::new(MockValidator::with_errors(&["Stray end tag “p”."])));
    let document = Document::parse(HEADLESS_PAGE).unwrap();

    let first = engine.run(&document).unwrap();
    let second = engine.run(&document).unwrap();

    let outcomes = |r: &ValidationReport| -> Vec<(String, Option<CheckResult>)> {
        r.checks.iter().map(|c| (c.id.clone(), c.result.clone())).collect()
    };
    assert_eq!(outcomes(&first).len(), 14);
    assert_eq!(outcomes(&first), outcomes(&second));
}

#[test]
fn test_report_order_matches_registry() {
    let engine = RuleEngine::with_profile(Profile::Strict);
    let report = run(STRICT_PAGE, &engine);

    let registry: Vec<&str> = engine.rules().iter().map(|r| r.id).collect();
    let reported: Vec<&str> = report.checks.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(registry, reported);
    assert_eq!(report.profile, Profile::Strict);
}

#[test]
fn test_strict_profile_on_standard_page() {
    let engine = RuleEngine::with_profile(Profile::Strict);
    let report = run(GOOD_PAGE, &engine);

    assert_eq!(
        failing_ids(&report),
        vec!["META-001", "META-002", "META-003", "META-004", "META-005"]
    );
}

#[test]
fn test_strict_page_passes_strict_profile() {
    let engine = RuleEngine::with_profile(Profile::Strict)
        .with_validator(Box::new(MockValidator::clean()));
    let report = run(STRICT_PAGE, &engine);

    let summary = report.summary();
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.passed, summary.total);
}

#[test]
fn test_category_selection_skips_validator() {
    let mock = MockValidator::clean();
    let engine = RuleEngine::with_profile(Profile::Standard).with_validator(Box::new(mock.clone()));
    let document = Document::parse(GOOD_PAGE).unwrap();

    let report = engine
        .run_categories(&document, &[CheckCategory::Structure])
        .unwrap();
    assert_eq!(report.checks.len(), 4);
    assert_eq!(mock.calls(), 0);
}

#[test]
fn test_missing_doctype_changes_only_doctype_rule() {
    let engine = RuleEngine::with_profile(Profile::Standard);
    let without = GOOD_PAGE.replacen("<!DOCTYPE html>", "", 1);

    let baseline = run(GOOD_PAGE, &engine);
    let report = run(&without, &engine);

    assert_eq!(failing_ids(&report), vec!["STR-001"]);
    for (before, after) in baseline.checks.iter().zip(&report.checks) {
        if after.id != "STR-001" {
            assert_eq!(
                before.result.as_ref().map(CheckResult::status),
                after.result.as_ref().map(CheckResult::status),
                "{} changed",
                after.id
            );
        }
    }
}
