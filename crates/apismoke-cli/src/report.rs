// crates/apismoke-cli/src/report.rs
// ============================================================================
// Module: Apismoke Console Reporter
// Description: Writer-backed reporter for per-contract outcomes.
// Purpose: Route successes and failures to the right streams with the
// suite's final verdict.
// Dependencies: apismoke-core
// ============================================================================

//! ## Overview
//! The console reporter writes one line per contract: `✓  name` for a
//! success, `✗  name: reason` for a failure. Failures and the `FAILED`
//! summary always reach the failure stream; success lines and the `OK`
//! summary reach the success stream, which is a sink unless verbose mode is
//! on. Write failures are deliberately ignored — reporting must never fail
//! a run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;

use apismoke_core::Reporter;

// ============================================================================
// SECTION: Glyphs
// ============================================================================

/// Success marker.
const GOOD: &str = "\u{2713}";
/// Failure marker.
const BAD: &str = "\u{2717}";

// ============================================================================
// SECTION: Console Reporter
// ============================================================================

/// Reporter writing outcome lines to a pair of streams.
pub struct ConsoleReporter<S, F> {
    /// Stream receiving success lines and the `OK` summary.
    success: S,
    /// Stream receiving failure lines and the `FAILED` summary.
    failure: F,
}

impl<S: Write, F: Write> ConsoleReporter<S, F> {
    /// Creates a reporter over explicit streams.
    pub const fn new(success: S, failure: F) -> Self {
        Self {
            success,
            failure,
        }
    }

    /// Returns the underlying streams, for inspection in tests.
    pub fn into_parts(self) -> (S, F) {
        (self.success, self.failure)
    }
}

impl<S: Write, F: Write> Reporter for ConsoleReporter<S, F> {
    fn record_success(&mut self, name: &str) {
        let _ = writeln!(self.success, "{GOOD}\t{name}");
    }

    fn record_failure(&mut self, name: &str, reason: &str) {
        let _ = writeln!(self.failure, "{BAD}\t{name}: {reason}");
    }

    fn record_summary(&mut self, failed: usize, total: usize) {
        if failed > 0 {
            let _ = writeln!(self.failure, "FAILED ({failed} of {total} tests failed)");
        } else {
            let _ = writeln!(self.success, "OK");
        }
    }
}

// ============================================================================
// SECTION: Standard Streams
// ============================================================================

/// Builds the standard console reporter.
///
/// Verbose mode routes success output to stdout; otherwise successes are
/// discarded. Failures always go to stderr.
#[must_use]
pub fn console(verbose: bool) -> ConsoleReporter<Box<dyn Write>, Box<dyn Write>> {
    let success: Box<dyn Write> =
        if verbose { Box::new(io::stdout()) } else { Box::new(io::sink()) };
    ConsoleReporter::new(success, Box::new(io::stderr()))
}
