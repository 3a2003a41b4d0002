//! Rule table and generic evaluator.
//!
//! Rules are data. Each `RegisteredRule` carries either a list of markup
//! `Condition`s, evaluated by `evaluate_conditions`, or delegates to the
//! conformance validator. The tables live in the category modules:
//! - Structure: doctype, root element, language, head/body sectioning
//! - Head: stylesheet link and title
//! - Metadata: `<meta>` tags (strict profile)
//! - Conformance: external validator
//!
//! # Isolation
//!
//! Every condition looks up its own target and turns a missing element into
//! a violation message. Conditions never panic and never depend on another
//! rule's outcome, so a document without `<head>` fails the head rules
//! cleanly while the structure rules still report independently.

pub mod conformance;
pub mod head;
pub mod metadata;
pub mod structure;

use crate::document::{Document, Element, Selector};
use crate::validator::ConformanceValidator;
use crate::{CheckCategory, CheckResult, PageCheckError, Profile};

/// Inputs available to a rule during one run
pub struct RuleContext<'a> {
    pub document: &'a Document,
    pub validator: Option<&'a dyn ConformanceValidator>,
}

/// One primitive predicate of a markup rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `<!DOCTYPE html>` present and ahead of the `<html>` opening tag
    Doctype,
    /// Opening and closing tag both written in the raw text
    TagPair { tag: &'static str },
    /// Closing tag written in the raw text
    ClosingTag { tag: &'static str },
    /// Exactly one element matches
    SingleElement { selector: Selector },
    /// At least one element matches
    ElementPresent { selector: Selector },
    /// Attribute present with a non-empty value
    AttributePresent {
        selector: Selector,
        attribute: &'static str,
    },
    /// Attribute equals a literal
    AttributeEquals {
        selector: Selector,
        attribute: &'static str,
        expected: &'static str,
    },
    /// Trimmed text content equals a literal
    TextEquals {
        selector: Selector,
        expected: &'static str,
    },
    /// Element children of `parent` are exactly `children`, in order
    ChildOrder {
        parent: Selector,
        children: &'static [&'static str],
    },
}

impl Condition {
    /// `None` when the condition holds, otherwise a diagnostic
    pub fn violation(&self, document: &Document) -> Option<String> {
        match self {
            Condition::Doctype => match document.doctype_position() {
                None => Some("Missing <!DOCTYPE html> declaration".to_string()),
                Some(pos) => match document.opening_tag_position("html") {
                    Some(html) if html < pos => {
                        Some("The <!DOCTYPE html> declaration must precede the <html> tag".to_string())
                    }
                    _ => None,
                },
            },
            Condition::TagPair { tag } => {
                let opening = document.has_opening_tag(tag);
                let closing = document.has_closing_tag(tag);
                match (opening, closing) {
                    (true, true) => None,
                    (false, true) => Some(format!("Missing opening <{}> tag", tag)),
                    (true, false) => Some(format!("Missing closing </{}> tag", tag)),
                    (false, false) => Some(format!("Missing <{}> and </{}> tags", tag, tag)),
                }
            }
            Condition::ClosingTag { tag } => {
                if document.has_closing_tag(tag) {
                    None
                } else {
                    Some(format!("Missing closing </{}> tag", tag))
                }
            }
            Condition::SingleElement { selector } => match document.select_all(selector).len() {
                1 => None,
                0 => Some(missing_element(selector)),
                n => Some(format!("Expected exactly one <{}> element, found {}", selector.target(), n)),
            },
            Condition::ElementPresent { selector } => {
                document.select(selector).is_none().then(|| missing_element(selector))
            }
            Condition::AttributePresent { selector, attribute } => {
                with_element(document, selector, |element| match element.attr(attribute) {
                    Some(value) if !value.trim().is_empty() => None,
                    Some(_) => Some(format!(
                        "The '{}' attribute of the <{}> tag is empty",
                        attribute,
                        selector.target()
                    )),
                    None => Some(format!(
                        "The '{}' attribute is missing in the {} tag",
                        attribute,
                        selector.target()
                    )),
                })
            }
            Condition::AttributeEquals {
                selector,
                attribute,
                expected,
            } => with_element(document, selector, |element| match element.attr(attribute) {
                Some(value) if value == *expected => None,
                Some(value) => Some(format!(
                    "Expected {}=\"{}\" on the <{}> tag, found {}=\"{}\"",
                    attribute,
                    expected,
                    selector.target(),
                    attribute,
                    value
                )),
                None => Some(format!(
                    "Expected {}=\"{}\" on the <{}> tag, but the attribute is missing",
                    attribute,
                    expected,
                    selector.target()
                )),
            }),
            Condition::TextEquals { selector, expected } => {
                with_element(document, selector, |element| {
                    let text = element.text();
                    if text == *expected {
                        None
                    } else {
                        Some(format!(
                            "Expected the <{}> text to be '{}', found '{}'",
                            selector.target(),
                            expected,
                            text
                        ))
                    }
                })
            }
            Condition::ChildOrder { parent, children } => with_element(document, parent, |element| {
                let actual: Vec<String> = element
                    .children()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect();
                if actual.iter().map(String::as_str).eq(children.iter().copied()) {
                    None
                } else {
                    Some(format!(
                        "Expected <{}> to contain {} in that order, found {}",
                        parent.target(),
                        tag_list(children.iter().copied()),
                        if actual.is_empty() {
                            "no elements".to_string()
                        } else {
                            tag_list(actual.iter().map(String::as_str))
                        }
                    ))
                }
            }),
        }
    }
}

fn missing_element(selector: &Selector) -> String {
    match selector.parent() {
        Some(parent) => format!(
            "No <{}> tag found in the <{}> ({})",
            selector.target(),
            parent.target(),
            selector
        ),
        None => format!("No <{}> tag found ({})", selector.target(), selector),
    }
}

fn with_element<F>(document: &Document, selector: &Selector, check: F) -> Option<String>
where
    F: FnOnce(&Element) -> Option<String>,
{
    match document.select(selector) {
        Some(element) => check(&element),
        None => Some(missing_element(selector)),
    }
}

fn tag_list<'a>(tags: impl Iterator<Item = &'a str>) -> String {
    tags.map(|t| format!("<{}>", t)).collect::<Vec<_>>().join(", ")
}

/// How a rule decides its outcome
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Declarative markup predicates; all must hold
    Markup {
        conditions: Vec<Condition>,
        /// Author-facing headline used instead of the first violation
        hint: Option<&'static str>,
        /// Message reported on success
        passed: &'static str,
    },
    /// Delegate to the external conformance validator
    Conformance,
}

/// A rule with its metadata
#[derive(Debug, Clone)]
pub struct RegisteredRule {
    pub id: &'static str,
    pub name: &'static str,
    pub category: CheckCategory,
    pub description: &'static str,
    pub kind: RuleKind,
}

impl RegisteredRule {
    /// Evaluate against one document.
    ///
    /// Only the conformance delegate can return `Err`.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CheckResult, PageCheckError> {
        match &self.kind {
            RuleKind::Markup {
                conditions,
                hint,
                passed,
            } => Ok(evaluate_conditions(ctx.document, conditions, *hint, passed)),
            RuleKind::Conformance => conformance::evaluate(ctx),
        }
    }
}

/// Evaluate every condition; the rule fails if any is violated.
///
/// The headline is the hint when set, otherwise the first violation. The
/// details list every violation, one per line.
pub fn evaluate_conditions(
    document: &Document,
    conditions: &[Condition],
    hint: Option<&str>,
    passed: &str,
) -> CheckResult {
    let violations: Vec<String> = conditions
        .iter()
        .filter_map(|c| c.violation(document))
        .collect();

    match violations.first() {
        None => CheckResult::Pass {
            message: passed.to_string(),
        },
        Some(first) => CheckResult::Fail {
            message: hint.map(str::to_string).unwrap_or_else(|| first.clone()),
            details: violations.join("\n"),
        },
    }
}

/// Rule table for a profile, in evaluation order
pub fn rules_for_profile(profile: Profile) -> Vec<RegisteredRule> {
    let mut rules = Vec::new();
    rules.extend(structure::get_structure_rules());
    rules.extend(head::get_head_rules());
    if profile == Profile::Strict {
        rules.extend(metadata::get_metadata_rules());
    }
    rules.extend(conformance::get_conformance_rules());
    rules
}
