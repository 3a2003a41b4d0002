//! pagecheck library
//!
//! Structural, semantic and conformance checks for a static HTML page.
//!
//! This library provides:
//! - A document loader backed by `html5ever` with child-path selectors
//! - A declarative rule table (doctype, root element, language, sectioning,
//!   `<head>` content, optional `<meta>` tags)
//! - A rule engine that evaluates every rule independently
//! - A conformance rule delegating to the W3C Nu HTML Checker
//! - Terminal, JSON, and JUnit XML report formatters
//!
//! # Example
//!
//! ```no_run
//! use pagecheck::{run_checks, PageCheckConfig, ValidatorMode};
//!
//! let config = PageCheckConfig {
//!     validator: ValidatorMode::Offline,
//!     ..Default::default()
//! };
//! let report = run_checks(config).expect("document could not be checked");
//! println!("Checks passed: {}", report.summary().passed);
//! ```

pub mod checks;
pub mod cli;
pub mod document;
pub mod engine;
pub mod validator;
pub mod version;

use cli::args::{CategoryFilter, CheckArgs};
use document::Document;
use engine::orchestrator::RuleEngine;
use engine::result::ValidationReport;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use validator::nu::{NuValidator, DEFAULT_NU_URL};
use validator::ValidatorError;

// Re-exports for public API
pub use engine::orchestrator::RuleEngine as Engine;
pub use engine::result::{ResultSummary, ValidationReport as Report};

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckResult {
    /// Rule passed
    Pass { message: String },
    /// Rule passed, but the validator reported warnings
    Warn { message: String, details: String },
    /// Rule failed
    Fail { message: String, details: String },
    /// Rule could not run (no validator configured)
    Skip { reason: String },
}

impl CheckResult {
    /// Short lowercase status label
    pub fn status(&self) -> &'static str {
        match self {
            CheckResult::Pass { .. } => "pass",
            CheckResult::Warn { .. } => "warn",
            CheckResult::Fail { .. } => "fail",
            CheckResult::Skip { .. } => "skip",
        }
    }

    /// Headline message (the skip reason for skipped rules)
    pub fn message(&self) -> &str {
        match self {
            CheckResult::Pass { message }
            | CheckResult::Warn { message, .. }
            | CheckResult::Fail { message, .. } => message,
            CheckResult::Skip { reason } => reason,
        }
    }

    /// Diagnostic details, if any
    pub fn details(&self) -> Option<&str> {
        match self {
            CheckResult::Warn { details, .. } | CheckResult::Fail { details, .. } => Some(details),
            _ => None,
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckResult::Fail { .. })
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Pass { message } => write!(f, "PASS: {}", message),
            CheckResult::Warn { message, details, .. } => {
                write!(f, "WARN: {} ({})", message, details)
            }
            CheckResult::Fail { message, details, .. } => {
                write!(f, "FAIL: {} ({})", message, details)
            }
            CheckResult::Skip { reason } => write!(f, "SKIP: {}", reason),
        }
    }
}

/// Rule category for grouping related rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckCategory {
    /// Document skeleton (doctype, html, head, body, lang)
    Structure,
    /// `<head>` content (stylesheet link, title)
    Head,
    /// `<meta>` tags (strict profile only)
    Metadata,
    /// External standards conformance
    Conformance,
}

impl CheckCategory {
    /// All categories in report order
    pub const ALL: [CheckCategory; 4] = [
        CheckCategory::Structure,
        CheckCategory::Head,
        CheckCategory::Metadata,
        CheckCategory::Conformance,
    ];
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckCategory::Structure => write!(f, "Structure"),
            CheckCategory::Head => write!(f, "Head"),
            CheckCategory::Metadata => write!(f, "Metadata"),
            CheckCategory::Conformance => write!(f, "Conformance"),
        }
    }
}

/// Strictness of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Document structure, stylesheet link, title, conformance
    #[default]
    Standard,
    /// Standard plus the charset/description/keywords/author/viewport meta tags
    Strict,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Standard => write!(f, "standard"),
            Profile::Strict => write!(f, "strict"),
        }
    }
}

/// A rule together with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Check {
    /// Unique identifier (e.g., "STR-001")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Rule category
    pub category: CheckCategory,
    /// Description of what this rule validates
    pub description: String,
    /// Outcome (None if not yet executed)
    pub result: Option<CheckResult>,
    /// Wall time spent evaluating the rule
    pub duration_ms: u64,
}

/// Run-level failures. Rule failures are never reported through this type.
#[derive(Debug, Error)]
pub enum PageCheckError {
    /// The document could not be read
    #[error("cannot read {}: {source}", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document could not be turned into a tree
    #[error("cannot parse {context}: {message}")]
    Parse { context: String, message: String },
    /// The conformance validator could not process the document
    #[error("conformance validator failed: {0}")]
    Validator(#[from] ValidatorError),
}

/// Where conformance checking happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorMode {
    /// No validator; the conformance rule is skipped
    Offline,
    /// Nu HTML Checker at the given endpoint
    Nu { url: String },
}

impl Default for ValidatorMode {
    fn default() -> Self {
        ValidatorMode::Nu {
            url: DEFAULT_NU_URL.to_string(),
        }
    }
}

/// Configuration for a validation run.
#[derive(Debug, Clone)]
pub struct PageCheckConfig {
    /// Document to check
    pub path: PathBuf,
    /// Rule table strictness
    pub profile: Profile,
    /// Categories to run (None = all)
    pub categories: Option<Vec<CheckCategory>>,
    /// Specific rules to skip (by ID)
    pub skip_checks: Vec<String>,
    /// Specific rules to run (by ID)
    pub only_checks: Vec<String>,
    /// Conformance validator selection
    pub validator: ValidatorMode,
    /// Validator request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for PageCheckConfig {
    fn default() -> Self {
        PageCheckConfig {
            path: PathBuf::from("index.html"),
            profile: Profile::Standard,
            categories: None,
            skip_checks: Vec::new(),
            only_checks: Vec::new(),
            validator: ValidatorMode::default(),
            timeout_ms: 30000,
        }
    }
}

impl PageCheckConfig {
    /// Create configuration from command line arguments
    pub fn from_args(args: &CheckArgs) -> Self {
        let categories = if args.category.is_empty() {
            None
        } else {
            Some(
                args.category
                    .iter()
                    .map(|filter| match filter {
                        CategoryFilter::Structure => CheckCategory::Structure,
                        CategoryFilter::Head => CheckCategory::Head,
                        CategoryFilter::Metadata => CheckCategory::Metadata,
                        CategoryFilter::Conformance => CheckCategory::Conformance,
                    })
                    .collect(),
            )
        };

        let validator = if args.offline {
            ValidatorMode::Offline
        } else {
            ValidatorMode::Nu {
                url: args.validator_url.clone(),
            }
        };

        PageCheckConfig {
            path: args.path.clone(),
            profile: if args.strict {
                Profile::Strict
            } else {
                Profile::Standard
            },
            categories,
            skip_checks: args.skip.clone(),
            only_checks: args.only.clone(),
            validator,
            timeout_ms: args.timeout_ms,
        }
    }
}

/// Run validation checks against the configured document.
///
/// Loads the document, builds the rule table for the configured profile,
/// attaches the conformance validator, and runs the selected rules.
///
/// # Errors
///
/// Returns a `PageCheckError` when the document cannot be read or parsed,
/// or when the conformance validator cannot process it. Failing rules are
/// reported inside the `ValidationReport`, not as errors.
///
/// # Example
///
/// ```no_run
/// use pagecheck::{run_checks, CheckCategory, PageCheckConfig};
///
/// // Run only the document structure rules
/// let config = PageCheckConfig {
///     categories: Some(vec![CheckCategory::Structure]),
///     ..Default::default()
/// };
///
/// match run_checks(config) {
///     Ok(report) => {
///         let summary = report.summary();
///         println!("Passed: {}, Failed: {}", summary.passed, summary.failed);
///     }
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_checks(config: PageCheckConfig) -> Result<ValidationReport, PageCheckError> {
    let document = Document::load(&config.path)?;

    let mut engine = RuleEngine::with_profile(config.profile);
    if let ValidatorMode::Nu { ref url } = config.validator {
        engine = engine.with_validator(Box::new(NuValidator::new(url, config.timeout_ms)?));
    }

    if !config.only_checks.is_empty() {
        engine.run_specific(&document, &config.only_checks)
    } else if !config.skip_checks.is_empty() {
        engine.run_excluding(&document, &config.skip_checks)
    } else if let Some(ref categories) = config.categories {
        if categories.is_empty() {
            engine.run(&document)
        } else {
            engine.run_categories(&document, categories)
        }
    } else {
        engine.run(&document)
    }
}
