//! `<head>` content rules (HEAD-001 through HEAD-004).

use super::{Condition, RegisteredRule, RuleKind};
use crate::document::Selector;
use crate::CheckCategory;

/// Stylesheet the page must link
pub const EXPECTED_STYLESHEET: &str = "style.css";
/// Required `rel` of the stylesheet link
pub const EXPECTED_REL: &str = "stylesheet";
/// Required page title
pub const EXPECTED_TITLE: &str = "My Site Title";

fn link() -> Selector {
    Selector::root("html").child("head").child("link")
}

fn title() -> Selector {
    Selector::root("html").child("head").child("title")
}

/// Get all `<head>` content rules
pub fn get_head_rules() -> Vec<RegisteredRule> {
    vec![
        RegisteredRule {
            id: "HEAD-001",
            name: "Stylesheet Link",
            category: CheckCategory::Head,
            description: "The <head> contains a <link> tag with href and rel attributes",
            kind: RuleKind::Markup {
                conditions: vec![
                    Condition::ElementPresent { selector: link() },
                    Condition::AttributePresent {
                        selector: link(),
                        attribute: "href",
                    },
                    Condition::AttributePresent {
                        selector: link(),
                        attribute: "rel",
                    },
                ],
                hint: None,
                passed: "Found a <link> tag with href and rel in the <head>",
            },
        },
        RegisteredRule {
            id: "HEAD-002",
            name: "Stylesheet Target",
            category: CheckCategory::Head,
            description: "The <link> tag points at style.css with rel=\"stylesheet\"",
            kind: RuleKind::Markup {
                conditions: vec![
                    Condition::AttributeEquals {
                        selector: link(),
                        attribute: "href",
                        expected: EXPECTED_STYLESHEET,
                    },
                    Condition::AttributeEquals {
                        selector: link(),
                        attribute: "rel",
                        expected: EXPECTED_REL,
                    },
                ],
                hint: None,
                passed: "The <link> tag loads style.css as a stylesheet",
            },
        },
        RegisteredRule {
            id: "HEAD-003",
            name: "Title Element",
            category: CheckCategory::Head,
            description: "The <head> contains a closed <title> tag",
            kind: RuleKind::Markup {
                conditions: vec![
                    Condition::ElementPresent { selector: title() },
                    Condition::ClosingTag { tag: "title" },
                ],
                hint: None,
                passed: "Found a <title> tag in the <head>",
            },
        },
        RegisteredRule {
            id: "HEAD-004",
            name: "Title Content",
            category: CheckCategory::Head,
            description: "The <title> text is 'My Site Title'",
            kind: RuleKind::Markup {
                conditions: vec![Condition::TextEquals {
                    selector: title(),
                    expected: EXPECTED_TITLE,
                }],
                hint: Some("The content inside the <title> tag should be 'My Site Title'"),
                passed: "The <title> reads 'My Site Title'",
            },
        },
    ]
}
