// crates/apismoke-cli/src/lib.rs
// ============================================================================
// Module: Apismoke CLI Library
// Description: Suite file loading and console reporting for the apismoke
// binary.
// Purpose: Keep the fallible CLI plumbing testable outside the binary.
// Dependencies: apismoke-core, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! The CLI library owns the two collaborators the binary wires around the
//! core engine: the suite [`loader`], which reads and decodes a JSON or
//! YAML suite definition under a size cap, and the console [`report`]
//! writer, which routes per-contract outcomes to stdout/stderr.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod loader;
pub mod report;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use loader::LoadError;
pub use loader::load_suite;
pub use report::ConsoleReporter;
pub use report::console;
