// crates/apismoke-core/src/context.rs
// ============================================================================
// Module: Apismoke Run Context
// Description: Mutable suite-global variable state for one run.
// Purpose: Carry outputs from earlier contracts to later contracts.
// Dependencies: none
// ============================================================================

//! ## Overview
//! [`RunContext`] owns the suite-global variable map for the lifetime of one
//! run. It is created from the suite's seed globals, passed by mutable
//! reference into each contract's execution, and discarded when the run
//! ends. Because contracts run strictly in declaration order, a write made
//! while executing contract N is visible to every contract after N.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

// ============================================================================
// SECTION: Run Context
// ============================================================================

/// Mutable suite-global state threaded through one sequential run.
///
/// # Invariants
/// - Accessed by exactly one logical thread of control.
/// - Has no persistence beyond the run that created it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Suite-global variable values, seeded at run start.
    globals: BTreeMap<String, String>,
}

impl RunContext {
    /// Creates a run context seeded with the suite's global variables.
    #[must_use]
    pub const fn new(globals: BTreeMap<String, String>) -> Self {
        Self {
            globals,
        }
    }

    /// Returns the current value of a suite-global variable.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&str> {
        self.globals.get(name).map(String::as_str)
    }

    /// Writes a suite-global variable, overwriting any prior value.
    pub fn set_global(&mut self, name: String, value: String) {
        self.globals.insert(name, value);
    }

    /// Returns the full global map, newest writes included.
    #[must_use]
    pub const fn globals(&self) -> &BTreeMap<String, String> {
        &self.globals
    }
}
