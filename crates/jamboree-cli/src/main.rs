//! jamboree CLI - Scout Camp Activity Assignment Engine
//!
//! Command-line interface for validating problem documents and solving
//! assignment problems.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod report;

#[derive(Parser)]
#[command(name = "jamboree")]
#[command(author, version, about = "Scout camp activity assignment engine", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an assignment problem
    Solve {
        /// Problem document (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// File the solve report is written to as JSON
        #[arg(short, long, default_value = "results.json")]
        output: PathBuf,

        /// Stdout rendering
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// Solve budget in seconds
        #[arg(long, env = "JAMBOREE_TIME_LIMIT", default_value_t = 300)]
        time_limit: u64,
    },

    /// Parse and validate a problem document
    Check {
        /// Problem document (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    // Initialize tracing; log to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Solve {
            file,
            output,
            format,
            time_limit,
        } => solve(&file, &output, format, time_limit),
        Commands::Check { file } => check(&file),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Load, build, solve, report. Exit 0 when a schedule exists, 1 when the
/// solve ended without one.
fn solve(file: &Path, output: &Path, format: ReportFormat, time_limit: u64) -> Result<ExitCode> {
    let problem = jamboree_parser::load_problem(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    tracing::info!(
        activities = problem.activities().len(),
        groups = problem.groups().len(),
        selections = problem.selections().len(),
        "problem loaded"
    );

    let model = jamboree_solver::build(&problem);
    tracing::debug!(
        variables = model.variable_count(),
        constraints = model.constraint_names().len(),
        "model built"
    );

    let solve_report = model.solve(Duration::from_secs(time_limit));
    tracing::info!(status = %solve_report.status, "solve finished");

    let json = serde_json::to_string_pretty(&solve_report)?;
    std::fs::write(output, json)
        .with_context(|| format!("cannot write {}", output.display()))?;

    match format {
        ReportFormat::Text => print!("{}", report::render_text(&solve_report, &problem)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&solve_report)?),
    }

    Ok(if solve_report.status.has_schedule() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Load and validate only, printing a problem summary.
fn check(file: &Path) -> Result<ExitCode> {
    let problem = jamboree_parser::load_problem(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    println!("{}: ok", file.display());
    println!("  activities:   {}", problem.activities().len());
    println!("  scout groups: {}", problem.groups().len());
    println!("  selections:   {}", problem.selections().len());

    Ok(ExitCode::SUCCESS)
}
