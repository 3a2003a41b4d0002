//! CLI module for argument parsing and output formatting.
//!
//! Arguments are declared with `clap` derive; formatters render a
//! `ValidationReport` as text, JSON, or JUnit XML.

pub mod args;
pub mod output;
