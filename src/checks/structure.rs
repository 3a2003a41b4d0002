//! Document structure rules (STR-001 through STR-004).
//!
//! The skeleton every page needs: a doctype, a single `<html>` root carrying
//! `lang="en"`, and a `<head>` followed by a `<body>`.

use super::{Condition, RegisteredRule, RuleKind};
use crate::document::Selector;
use crate::CheckCategory;

/// Required value of the root `lang` attribute
pub const EXPECTED_LANG: &str = "en";

/// Get all document structure rules
pub fn get_structure_rules() -> Vec<RegisteredRule> {
    vec![
        RegisteredRule {
            id: "STR-001",
            name: "Doctype Declaration",
            category: CheckCategory::Structure,
            description: "Document begins with a <!DOCTYPE html> declaration",
            kind: RuleKind::Markup {
                conditions: vec![Condition::Doctype],
                hint: None,
                passed: "Found <!DOCTYPE html> declaration",
            },
        },
        RegisteredRule {
            id: "STR-002",
            name: "Root Element",
            category: CheckCategory::Structure,
            description: "Document has opening and closing <html> tags around a single root",
            kind: RuleKind::Markup {
                conditions: vec![
                    Condition::TagPair { tag: "html" },
                    Condition::SingleElement {
                        selector: Selector::root("html"),
                    },
                ],
                hint: None,
                passed: "Found <html> and </html> tags",
            },
        },
        RegisteredRule {
            id: "STR-003",
            name: "Language Attribute",
            category: CheckCategory::Structure,
            description: "The <html> tag declares lang=\"en\"",
            kind: RuleKind::Markup {
                conditions: vec![Condition::AttributeEquals {
                    selector: Selector::root("html"),
                    attribute: "lang",
                    expected: EXPECTED_LANG,
                }],
                hint: Some("Include a lang attribute assigned to \"en\" for English in the <html> tag"),
                passed: "The <html> tag has lang=\"en\"",
            },
        },
        RegisteredRule {
            id: "STR-004",
            name: "Head and Body Sections",
            category: CheckCategory::Structure,
            description: "A <head> element followed by a <body> element nested in <html>",
            kind: RuleKind::Markup {
                conditions: vec![
                    Condition::TagPair { tag: "head" },
                    Condition::TagPair { tag: "body" },
                    Condition::ChildOrder {
                        parent: Selector::root("html"),
                        children: &["head", "body"],
                    },
                ],
                hint: None,
                passed: "<head> and <body> are nested in <html> in order",
            },
        },
    ]
}
