//! Custom test runner for the jsv case suite.
//!
//! This binary runs all case files and reports results per file:
//! - keywords/minimum 5/5 PASS
//! - combinators/one_of 3/4 FAIL

use clap::Parser;
use rayon::prelude::*;
use test_suite::{CaseFile, CaseOutcome, TestRunner, cases_dir};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "test-suite", about = "jsv case suite runner")]
struct Args {
    /// Enable trace output for debugging
    #[arg(short, long)]
    trace: bool,

    /// Filter case files by name (substring match)
    #[arg(short, long)]
    filter: Option<String>,

    /// Show one line per failure instead of the full error trace
    #[arg(short, long)]
    short: bool,
}

/// ANSI color codes
mod colors {
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

/// Result of one case file
enum FileOutcome {
    Ran {
        file_name: String,
        cases: Vec<CaseOutcome>,
    },
    LoadError {
        file_name: String,
        error: String,
    },
}

fn main() {
    let args = Args::parse();
    let exit_code = run(&args);
    std::process::exit(exit_code);
}

fn run(args: &Args) -> i32 {
    if args.trace {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("jsv_valid=trace,jsv_hyper=trace"))
            .try_init();
    }

    println!(
        "\n{}{}jsv Case Suite{}",
        colors::BOLD,
        colors::CYAN,
        colors::RESET
    );
    println!("{}{}", colors::DIM, "=".repeat(50));
    println!("{}\n", colors::RESET);

    let mut runner = TestRunner::new(cases_dir());
    if let Some(filter) = &args.filter {
        runner = runner.with_filter(filter.as_str());
    }

    let files = match runner.discover_test_files() {
        Ok(files) => files,
        Err(e) => {
            eprintln!(
                "{}{}Error:{} Failed to collect case files: {:#}",
                colors::BOLD,
                colors::RED,
                colors::RESET,
                e
            );
            return 1;
        }
    };

    if files.is_empty() {
        println!(
            "{}{}Warning:{} No case files found{}",
            colors::BOLD,
            colors::YELLOW,
            colors::RESET,
            if args.filter.is_some() {
                " matching filter"
            } else {
                ""
            }
        );
        return 0;
    }

    // The validator is only read from here on, so files run in parallel
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| {
            let file_name = runner.file_name(path);
            match CaseFile::load(path) {
                Ok(case_file) => FileOutcome::Ran {
                    file_name,
                    cases: case_file.run(runner.validator()),
                },
                Err(e) => FileOutcome::LoadError {
                    file_name,
                    error: format!("{e:#}"),
                },
            }
        })
        .collect();

    let mut total = 0;
    let mut passed = 0;
    let mut failed_files = 0;

    for outcome in &outcomes {
        match outcome {
            FileOutcome::Ran { file_name, cases } => {
                let file_passed = cases.iter().filter(|c| c.passed).count();
                total += cases.len();
                passed += file_passed;
                let ok = file_passed == cases.len();
                if !ok {
                    failed_files += 1;
                }
                println!(
                    "{} {}/{} {}{}{}",
                    file_name,
                    file_passed,
                    cases.len(),
                    if ok { colors::GREEN } else { colors::RED },
                    if ok { "PASS" } else { "FAIL" },
                    colors::RESET
                );
                for case in cases.iter().filter(|c| !c.passed) {
                    print_failure(&case.name, case.error.as_deref().unwrap_or(""), args.short);
                }
            }
            FileOutcome::LoadError { file_name, error } => {
                failed_files += 1;
                println!("{} {}LOAD ERROR{}", file_name, colors::RED, colors::RESET);
                print_failure(file_name, error, args.short);
            }
        }
    }

    println!(
        "\n{}Total:{} {} passed, {} failed",
        colors::BOLD,
        colors::RESET,
        passed,
        total - passed
    );

    if failed_files == 0 { 0 } else { 1 }
}

fn print_failure(name: &str, error: &str, short: bool) {
    println!("  {}- {}{}", colors::RED, name, colors::RESET);
    if short {
        if let Some(first) = error.lines().next() {
            println!("    {}{}{}", colors::DIM, first, colors::RESET);
        }
        return;
    }
    for line in error.lines() {
        println!("    {}{}{}", colors::DIM, line, colors::RESET);
    }
}
