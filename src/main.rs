//! pagecheck CLI entry point
//!
//! Validates a static HTML page against the structure, head-content, and
//! conformance rules.

use clap::Parser;
use pagecheck::checks::rules_for_profile;
use pagecheck::cli::args::{Args, CheckArgs, Command, ListArgs};
use pagecheck::cli::output::get_formatter;
use pagecheck::version::get_build_info;
use pagecheck::{run_checks, CheckCategory, PageCheckConfig, Profile};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version come through here too
            let code = if e.use_stderr() { 3 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match args.into_command() {
        Command::Version => {
            println!("{}", get_build_info());
            ExitCode::SUCCESS
        }
        Command::List(list) => {
            print_rule_list(&list);
            ExitCode::SUCCESS
        }
        Command::Check(check) => run(check),
    }
}

fn init_logging(args: &CheckArgs, color: bool) {
    let default_level = if args.verbose {
        "pagecheck=debug"
    } else {
        "pagecheck=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .init();
}

fn print_rule_list(args: &ListArgs) {
    let profile = if args.strict {
        Profile::Strict
    } else {
        Profile::Standard
    };
    let rules = rules_for_profile(profile);

    println!("Available rules ({} profile):", profile);
    for category in CheckCategory::ALL {
        let in_category: Vec<_> = rules.iter().filter(|r| r.category == category).collect();
        if in_category.is_empty() {
            continue;
        }
        println!();
        println!("{} CHECKS:", category.to_string().to_uppercase());
        for rule in in_category {
            println!("  {:<9}{}", rule.id, rule.name);
        }
    }
}

fn run(args: CheckArgs) -> ExitCode {
    let color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
    init_logging(&args, color);

    let config = PageCheckConfig::from_args(&args);
    let report = match run_checks(config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error running checks: {}", e);
            return ExitCode::from(3);
        }
    };

    let formatter = get_formatter(args.format, !color, args.verbose, args.quiet);
    println!("{}", formatter.format(&report));

    let summary = report.summary();
    if summary.failed > 0 {
        ExitCode::from(1)
    } else if summary.warned > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
