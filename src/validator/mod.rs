//! Standards conformance validation.
//!
//! Conformance checking is delegated to an external collaborator behind the
//! `ConformanceValidator` trait. The shipped implementation is `NuValidator`,
//! which submits the document to the W3C Nu HTML Checker.
//!
//! Requests go through a `ureq` agent. HTTPS needs its TLS backend, enabled
//! by the "online" feature (on by default). Without it, `NuValidator` can
//! still reach plain-HTTP instances, such as a locally running `vnu.jar`.

pub mod nu;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Severity of a conformance message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// One message reported by a validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConformanceMessage {
    pub severity: Severity,
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl ConformanceMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ConformanceMessage {
            severity: Severity::Error,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        ConformanceMessage {
            severity: Severity::Warning,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Attach a source position
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ConformanceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => {
                write!(f, "line {}, column {}: {}", line, column, self.message)
            }
            (Some(line), None) => write!(f, "line {}: {}", line, self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

/// Validator failures. Any of these aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    #[error("request failed: {message}")]
    RequestFailed { message: String },
    #[error("validator returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("request timed out: {message}")]
    Timeout { message: String },
    #[error("invalid validator response: {message}")]
    InvalidResponse { message: String },
    #[error("invalid validator URL '{url}'")]
    InvalidUrl { url: String },
    /// The validator could not process the document at all
    #[error("validator rejected the document: {message}")]
    Rejected { message: String },
    #[error("HTTPS validators need the \"online\" feature")]
    FeatureNotEnabled,
}

/// External standards conformance checker.
pub trait ConformanceValidator {
    /// Short name for logs and reports
    fn name(&self) -> &str;

    /// Check raw markup. An empty list means the document conforms.
    fn validate(&self, html: &str) -> Result<Vec<ConformanceMessage>, ValidatorError>;
}
