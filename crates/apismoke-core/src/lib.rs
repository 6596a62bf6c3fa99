// crates/apismoke-core/src/lib.rs
// ============================================================================
// Module: Apismoke Core Library
// Description: Contract execution engine for declarative HTTP smoke suites.
// Purpose: Resolve templates, send requests, validate responses, and
// propagate captured outputs between contracts.
// Dependencies: regex, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Apismoke core executes a declarative suite of HTTP contracts — named
//! request/expected-response pairs — against a target service, one contract
//! at a time, in declaration order.
//! Invariants:
//! - String-typed expressions (output extractors, `r/` body patterns) are
//!   validated once at suite-load time.
//! - Suite-global state is an explicit [`RunContext`], threaded by mutable
//!   reference through one sequential run.
//! - Every failure is contract-scoped; the suite always runs to the end.
//!
//! The engine performs no I/O of its own: networking, reporting, and
//! environment access arrive through the [`interfaces`] traits.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod capture;
pub mod context;
pub mod error;
pub mod executor;
pub mod interfaces;
pub mod path;
pub mod runner;
pub mod suite;
pub mod validate;
pub mod vars;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use capture::capture_outputs;
pub use context::RunContext;
pub use error::ContractError;
pub use error::ExtractionError;
pub use error::TemplateLocation;
pub use error::TransportError;
pub use error::ValidationError;
pub use error::VariableError;
pub use executor::ContractExecutor;
pub use interfaces::Environment;
pub use interfaces::HttpRequest;
pub use interfaces::HttpTransport;
pub use interfaces::ProcessEnv;
pub use interfaces::Reporter;
pub use interfaces::TransportResponse;
pub use path::PathExpression;
pub use path::Segment;
pub use runner::RunSummary;
pub use runner::SuiteRunner;
pub use suite::BodyMatcher;
pub use suite::CapturePlan;
pub use suite::CompiledContract;
pub use suite::Contract;
pub use suite::ContractPlan;
pub use suite::Expectations;
pub use suite::Extractor;
pub use suite::Suite;
pub use suite::SuitePlan;
pub use validate::first_header_value;
pub use validate::validate_body;
pub use validate::validate_headers;
pub use validate::validate_status;
pub use vars::resolve_template;
