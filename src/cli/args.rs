//! Command line arguments for pagecheck.
//!
//! `pagecheck [PATH]` is shorthand for `pagecheck check [PATH]`.

use crate::validator::nu::DEFAULT_NU_URL;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Check a static HTML page for structure, `<head>` content, and standards conformance
#[derive(Debug, Parser)]
#[command(name = "pagecheck", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub check: CheckArgs,
}

impl Args {
    /// Arguments of the check run, whether given via `check` or bare
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Check(self.check))
    }
}

/// Command to execute
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Run validation checks (default)
    Check(CheckArgs),
    /// List the rules of a profile
    List(ListArgs),
    /// Print version information
    Version,
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// JUnit XML for CI/CD integration
    Junit,
}

/// Rule category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryFilter {
    Structure,
    Head,
    Metadata,
    Conformance,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct CheckArgs {
    /// HTML document to check
    #[arg(default_value = "index.html")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "PAGECHECK_FORMAT")]
    pub format: OutputFormat,

    /// Also require the charset, description, keywords, author and viewport <meta> tags
    #[arg(long)]
    pub strict: bool,

    /// Only run rules in these categories
    #[arg(short, long, value_enum)]
    pub category: Vec<CategoryFilter>,

    /// Only run these rule IDs
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these rule IDs
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Do not contact the conformance validator; CONF-001 is skipped
    #[arg(long)]
    pub offline: bool,

    /// Nu HTML Checker endpoint
    #[arg(long, env = "PAGECHECK_VALIDATOR_URL", default_value = DEFAULT_NU_URL)]
    pub validator_url: String,

    /// Validator request timeout in milliseconds
    #[arg(long = "timeout", default_value_t = 30000)]
    pub timeout_ms: u64,

    /// Only show failures and warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show details and timings for every rule
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Default for CheckArgs {
    fn default() -> Self {
        CheckArgs {
            path: PathBuf::from("index.html"),
            format: OutputFormat::Text,
            strict: false,
            category: Vec::new(),
            only: Vec::new(),
            skip: Vec::new(),
            offline: false,
            validator_url: DEFAULT_NU_URL.to_string(),
            timeout_ms: 30000,
            quiet: false,
            verbose: false,
            no_color: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, clap::Args)]
pub struct ListArgs {
    /// List the strict profile
    #[arg(long)]
    pub strict: bool,
}
