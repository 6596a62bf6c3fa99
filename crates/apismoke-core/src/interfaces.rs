// crates/apismoke-core/src/interfaces.rs
// ============================================================================
// Module: Apismoke Collaborator Interfaces
// Description: Backend-agnostic interfaces for transport, reporting, and
// environment lookup.
// Purpose: Define the contract surfaces the execution engine depends on.
// Dependencies: crate::error
// ============================================================================

//! ## Overview
//! The execution engine talks to the outside world through three small
//! capabilities: an HTTP transport that sends one request and returns one
//! response, a reporter that records named successes and failures, and a
//! read-only environment lookup used as the resolver's last tier.
//! Implementations must not retry and must surface failures as errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use crate::error::TransportError;

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Fully resolved outbound HTTP request.
///
/// # Invariants
/// - All template placeholders have already been substituted.
/// - `url` is the complete request target including the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP verb; transports normalize casing.
    pub method: String,
    /// Complete request URL.
    pub url: String,
    /// Request payload; may be empty.
    pub body: String,
    /// Header name to resolved value.
    pub headers: BTreeMap<String, String>,
}

/// Response handed back by an HTTP transport.
///
/// # Invariants
/// - `status` and `headers` are available immediately.
/// - `body` is a single-read resource; callers buffer it at most once.
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in arrival order; names keep their wire casing.
    pub headers: Vec<(String, String)>,
    /// Response body reader.
    pub body: Box<dyn Read>,
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &"<reader>")
            .finish()
    }
}

/// Capability for sending one HTTP request and returning one response.
pub trait HttpTransport {
    /// Sends the request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be built or sent,
    /// or when no response is received.
    fn send(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError>;
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Capability for recording per-contract outcomes and the final tally.
pub trait Reporter {
    /// Records a contract that reached its terminal success state.
    fn record_success(&mut self, name: &str);

    /// Records a contract failure with its human-readable reason.
    fn record_failure(&mut self, name: &str, reason: &str);

    /// Records the final tally after the last contract has run.
    fn record_summary(&mut self, failed: usize, total: usize);
}

// ============================================================================
// SECTION: Environment
// ============================================================================

/// Read-only key/value lookup consulted as the resolver's last tier.
pub trait Environment {
    /// Returns the value for `name`, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Environment lookup backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
