// crates/apismoke-core/src/runner.rs
// ============================================================================
// Module: Apismoke Suite Runner
// Description: Sequential execution of a compiled suite with per-contract
// failure isolation.
// Purpose: Drive every contract in declaration order and tally the verdict.
// Dependencies: crate::context, crate::executor, crate::interfaces,
// crate::suite
// ============================================================================

//! ## Overview
//! The runner walks contracts strictly in declaration order on a single
//! thread: a contract starts only after the previous one reached its
//! terminal state. The ordering is load-bearing, not incidental — outputs
//! written by contract N seed the resolver for contracts after N, so no
//! reordering or parallelism is permitted. One contract's failure is
//! recorded and the run continues; the final tally is reported after the
//! last contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::context::RunContext;
use crate::executor::ContractExecutor;
use crate::interfaces::Environment;
use crate::interfaces::HttpTransport;
use crate::interfaces::Reporter;
use crate::suite::SuitePlan;

// ============================================================================
// SECTION: Run Summary
// ============================================================================

/// Final tally for one suite run.
///
/// # Invariants
/// - `failed` counts contracts that did not reach their terminal success
///   state, compilation failures included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of failed contracts.
    pub failed: usize,
    /// Total number of contracts in the suite.
    pub total: usize,
}

impl RunSummary {
    /// Returns the overall verdict: true when no contract failed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failed == 0
    }
}

// ============================================================================
// SECTION: Suite Runner
// ============================================================================

/// Runs a compiled suite against one target service.
pub struct SuiteRunner<'a> {
    /// Executor shared by every contract in the run.
    executor: ContractExecutor<'a>,
}

impl<'a> SuiteRunner<'a> {
    /// Creates a runner bound to a transport, environment, and base URL.
    #[must_use]
    pub const fn new(
        transport: &'a dyn HttpTransport,
        env: &'a dyn Environment,
        base_url: &'a str,
    ) -> Self {
        Self {
            executor: ContractExecutor::new(transport, env, base_url),
        }
    }

    /// Runs every contract and reports outcomes through the reporter.
    ///
    /// The run context is created from the plan's seed globals and dropped
    /// when this call returns; results are not persisted.
    pub fn run(&self, plan: &SuitePlan, reporter: &mut dyn Reporter) -> RunSummary {
        let mut ctx = RunContext::new(plan.globals.clone());
        let mut failed = 0;
        for contract in &plan.contracts {
            let outcome = match &contract.compiled {
                Ok(compiled) => self.executor.execute(compiled, &mut ctx),
                Err(err) => Err(err.clone()),
            };
            match outcome {
                Ok(()) => reporter.record_success(&contract.name),
                Err(err) => {
                    reporter.record_failure(&contract.name, &err.to_string());
                    failed += 1;
                }
            }
        }
        let total = plan.contracts.len();
        reporter.record_summary(failed, total);
        RunSummary {
            failed,
            total,
        }
    }
}
