//! Standards conformance rule (CONF-001).

use super::{RegisteredRule, RuleContext, RuleKind};
use crate::validator::{ConformanceMessage, Severity};
use crate::{CheckCategory, CheckResult, PageCheckError};
use tracing::debug;

/// Get the conformance rule
pub fn get_conformance_rules() -> Vec<RegisteredRule> {
    vec![RegisteredRule {
        id: "CONF-001",
        name: "HTML Conformance",
        category: CheckCategory::Conformance,
        description: "An external HTML validator reports no errors",
        kind: RuleKind::Conformance,
    }]
}

/// Submit the raw document to the configured validator.
///
/// Errors fail the rule, warnings alone downgrade it to `Warn`, and `Info`
/// messages are ignored. A validator that cannot process the document
/// surfaces as `PageCheckError::Validator`.
pub fn evaluate(ctx: &RuleContext<'_>) -> Result<CheckResult, PageCheckError> {
    let Some(validator) = ctx.validator else {
        return Ok(CheckResult::Skip {
            reason: "Conformance validator disabled (offline)".to_string(),
        });
    };

    let messages = validator.validate(ctx.document.raw())?;
    debug!(
        validator = validator.name(),
        count = messages.len(),
        "conformance messages received"
    );

    let errors = with_severity(&messages, Severity::Error);
    let warnings = with_severity(&messages, Severity::Warning);

    if !errors.is_empty() {
        return Ok(CheckResult::Fail {
            message: format!(
                "Expected a valid HTML document but the validator reported {} error(s)",
                errors.len()
            ),
            details: errors.join("\n"),
        });
    }

    if !warnings.is_empty() {
        return Ok(CheckResult::Warn {
            message: format!("Document is valid with {} warning(s)", warnings.len()),
            details: warnings.join("\n"),
        });
    }

    Ok(CheckResult::Pass {
        message: format!("No conformance errors reported by {}", validator.name()),
    })
}

fn with_severity(messages: &[ConformanceMessage], severity: Severity) -> Vec<String> {
    messages
        .iter()
        .filter(|m| m.severity == severity)
        .map(ToString::to_string)
        .collect()
}
