//! `<meta>` tag rules (META-001 through META-005), strict profile only.

use super::{Condition, RegisteredRule, RuleKind};
use crate::document::Selector;
use crate::CheckCategory;

/// Required document character set
pub const EXPECTED_CHARSET: &str = "UTF-8";
/// Required viewport declaration
pub const EXPECTED_VIEWPORT: &str = "width=device-width, initial-scale=1.0";

fn meta() -> Selector {
    Selector::root("html").child("head").child("meta")
}

fn named(name: &'static str) -> Selector {
    meta().with_attr_value("name", name)
}

/// `meta[name=...]` must carry a non-empty `content`
fn content_rule(
    id: &'static str,
    name: &'static str,
    meta_name: &'static str,
    description: &'static str,
    passed: &'static str,
) -> RegisteredRule {
    RegisteredRule {
        id,
        name,
        category: CheckCategory::Metadata,
        description,
        kind: RuleKind::Markup {
            conditions: vec![Condition::AttributePresent {
                selector: named(meta_name),
                attribute: "content",
            }],
            hint: None,
            passed,
        },
    }
}

/// Get all metadata rules
pub fn get_metadata_rules() -> Vec<RegisteredRule> {
    vec![
        RegisteredRule {
            id: "META-001",
            name: "Character Set",
            category: CheckCategory::Metadata,
            description: "A <meta charset=\"UTF-8\"> tag is present",
            kind: RuleKind::Markup {
                conditions: vec![Condition::AttributeEquals {
                    selector: meta().with_attr("charset"),
                    attribute: "charset",
                    expected: EXPECTED_CHARSET,
                }],
                hint: None,
                passed: "Character set declared as UTF-8",
            },
        },
        content_rule(
            "META-002",
            "Description",
            "description",
            "A description <meta> tag with content is present",
            "Found a description <meta> tag",
        ),
        content_rule(
            "META-003",
            "Keywords",
            "keywords",
            "A keywords <meta> tag with content is present",
            "Found a keywords <meta> tag",
        ),
        content_rule(
            "META-004",
            "Author",
            "author",
            "An author <meta> tag with content is present",
            "Found an author <meta> tag",
        ),
        RegisteredRule {
            id: "META-005",
            name: "Viewport",
            category: CheckCategory::Metadata,
            description: "The viewport <meta> tag is width=device-width, initial-scale=1.0",
            kind: RuleKind::Markup {
                conditions: vec![Condition::AttributeEquals {
                    selector: named("viewport"),
                    attribute: "content",
                    expected: EXPECTED_VIEWPORT,
                }],
                hint: None,
                passed: "Viewport configured for device width",
            },
        },
    ]
}
