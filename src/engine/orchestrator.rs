//! Rule execution orchestrator.
//!
//! Manages rule registration, selection, and execution against one parsed
//! document.
//!
//! # Graceful Degradation
//!
//! - Rule panics: caught via `std::panic::catch_unwind` and converted to a
//!   `Fail` result for that rule only
//! - Failing rules: never stop the run; every selected rule is evaluated
//! - Unknown rule IDs: logged and ignored in `run_specific`/`run_excluding`
//! - Empty selection: returns an empty report (not an error)
//!
//! The only run-level error is a conformance validator that cannot process
//! the document, which aborts the run with `PageCheckError::Validator`.

use crate::checks::{rules_for_profile, RegisteredRule, RuleContext};
use crate::document::Document;
use crate::engine::result::{ResultAggregator, ValidationReport};
use crate::validator::ConformanceValidator;
use crate::{Check, CheckCategory, CheckResult, PageCheckError, Profile};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Rule engine
pub struct RuleEngine {
    profile: Profile,
    rules: Vec<RegisteredRule>,
    validator: Option<Box<dyn ConformanceValidator>>,
}

impl RuleEngine {
    /// Create an engine with no rules and no validator
    pub fn new() -> Self {
        RuleEngine {
            profile: Profile::default(),
            rules: Vec::new(),
            validator: None,
        }
    }

    /// Create an engine loaded with the rule table of `profile`
    pub fn with_profile(profile: Profile) -> Self {
        let mut engine = Self::new();
        engine.profile = profile;
        engine.register_rules(rules_for_profile(profile));
        engine
    }

    /// Attach a conformance validator. Without one the conformance rule is skipped.
    pub fn with_validator(mut self, validator: Box<dyn ConformanceValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Register rules for execution
    pub fn register_rules(&mut self, rules: Vec<RegisteredRule>) {
        self.rules.extend(rules);
    }

    /// Registered rules in evaluation order
    pub fn rules(&self) -> &[RegisteredRule] {
        &self.rules
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Run all registered rules
    pub fn run(&self, document: &Document) -> Result<ValidationReport, PageCheckError> {
        self.run_rules(document, self.rules.iter().collect())
    }

    /// Run rules in a single category
    pub fn run_category(
        &self,
        document: &Document,
        category: CheckCategory,
    ) -> Result<ValidationReport, PageCheckError> {
        self.run_categories(document, &[category])
    }

    /// Run rules in multiple categories
    pub fn run_categories(
        &self,
        document: &Document,
        categories: &[CheckCategory],
    ) -> Result<ValidationReport, PageCheckError> {
        let selected = self
            .rules
            .iter()
            .filter(|r| categories.contains(&r.category))
            .collect();
        self.run_rules(document, selected)
    }

    /// Run specific rules by ID, in registry order
    pub fn run_specific(
        &self,
        document: &Document,
        rule_ids: &[String],
    ) -> Result<ValidationReport, PageCheckError> {
        self.warn_unknown(rule_ids);
        let selected = self
            .rules
            .iter()
            .filter(|r| rule_ids.iter().any(|id| id == r.id))
            .collect();
        self.run_rules(document, selected)
    }

    /// Run all rules except the specified IDs
    pub fn run_excluding(
        &self,
        document: &Document,
        skip_ids: &[String],
    ) -> Result<ValidationReport, PageCheckError> {
        self.warn_unknown(skip_ids);
        let selected = self
            .rules
            .iter()
            .filter(|r| !skip_ids.iter().any(|id| id == r.id))
            .collect();
        self.run_rules(document, selected)
    }

    fn warn_unknown(&self, ids: &[String]) {
        for id in ids {
            if !self.rules.iter().any(|r| r.id == id) {
                warn!(rule = %id, "unknown rule ID ignored");
            }
        }
    }

    /// Execute the selected rules sequentially
    fn run_rules(
        &self,
        document: &Document,
        selected: Vec<&RegisteredRule>,
    ) -> Result<ValidationReport, PageCheckError> {
        let start = Instant::now();
        let ctx = RuleContext {
            document,
            validator: self.validator.as_deref(),
        };

        let mut aggregator = ResultAggregator::new();
        for rule in selected {
            let (result, duration_ms) = execute_rule(rule, &ctx)?;
            debug!(rule = rule.id, status = result.status(), duration_ms, "rule evaluated");

            aggregator.add_result(Check {
                id: rule.id.to_string(),
                name: rule.name.to_string(),
                category: rule.category,
                description: rule.description.to_string(),
                result: Some(result),
                duration_ms,
            });
        }

        let total_duration_ms = start.elapsed().as_millis() as u64;
        aggregator.set_metadata(document.label(), self.profile, total_duration_ms);
        let report = aggregator.into_report();

        let summary = report.summary();
        info!(
            source = %report.source,
            passed = summary.passed,
            warned = summary.warned,
            failed = summary.failed,
            skipped = summary.skipped,
            "validation run complete"
        );

        Ok(report)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute a single rule, isolating panics. Returns the outcome and its wall time.
fn execute_rule(
    rule: &RegisteredRule,
    ctx: &RuleContext<'_>,
) -> Result<(CheckResult, u64), PageCheckError> {
    let start = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| rule.evaluate(ctx)));
    let elapsed = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(Ok(result)) => Ok((result, elapsed)),
        Ok(Err(e)) => {
            warn!(rule = rule.id, error = %e, "rule aborted the run");
            Err(e)
        }
        Err(_) => {
            warn!(rule = rule.id, "rule panicked");
            let result = CheckResult::Fail {
                message: "Rule panicked during execution".to_string(),
                details: "An unexpected error occurred".to_string(),
            };
            Ok((result, elapsed))
        }
    }
}
