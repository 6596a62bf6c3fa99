// crates/apismoke-cli/src/main.rs
// ============================================================================
// Module: Apismoke CLI Entry Point
// Description: Command-line front end for running contract suites.
// Purpose: Wire the suite loader, HTTP transport, and console reporter
// around the core engine.
// Dependencies: apismoke-cli, apismoke-core, apismoke-http, clap
// ============================================================================

//! ## Overview
//! The binary loads a suite definition, compiles it, runs it against the
//! target base URL, and exits with the suite's verdict: 0 when every
//! contract passed, 1 when any failed, 2 when the suite could not be loaded
//! or the client could not be built. Per-contract outcomes stream through
//! the console reporter as the run progresses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use apismoke_cli::load_suite;
use apismoke_cli::report;
use apismoke_core::ProcessEnv;
use apismoke_core::RunSummary;
use apismoke_core::SuitePlan;
use apismoke_core::SuiteRunner;
use apismoke_http::HttpClientConfig;
use apismoke_http::ReqwestTransport;
use clap::Parser;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "apismoke", version, about = "Run declarative HTTP contract suites")]
struct Cli {
    /// File containing the suite definition (JSON or YAML).
    #[arg(long, short, value_name = "PATH")]
    file: PathBuf,

    /// Base URL of the service under test.
    #[arg(long, short, value_name = "URL")]
    url: String,

    /// Print successful results in addition to failures.
    #[arg(long, short)]
    verbose: bool,

    /// Request timeout in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 10_000)]
    timeout_ms: u64,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Process entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) if summary.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(message) => {
            let _ = write_stderr_line(&message);
            ExitCode::from(2)
        }
    }
}

/// Loads, compiles, and runs the suite; fatal setup failures become the
/// error message printed before exit.
fn run(cli: &Cli) -> Result<RunSummary, String> {
    let suite = load_suite(&cli.file).map_err(|err| err.to_string())?;
    let plan = SuitePlan::compile(suite);

    let config = HttpClientConfig {
        timeout_ms: cli.timeout_ms,
        ..HttpClientConfig::default()
    };
    let transport = ReqwestTransport::new(&config).map_err(|err| err.to_string())?;

    let mut reporter = report::console(cli.verbose);
    let runner = SuiteRunner::new(&transport, &ProcessEnv, &cli.url);
    Ok(runner.run(&plan, &mut reporter))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}
