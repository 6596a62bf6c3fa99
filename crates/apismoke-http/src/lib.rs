// crates/apismoke-http/src/lib.rs
// ============================================================================
// Module: Apismoke HTTP Library
// Description: Blocking reqwest-backed transport for the contract engine.
// Purpose: Provide the HTTP collaborator the core's executor sends through.
// Dependencies: apismoke-core, reqwest, url
// ============================================================================

//! ## Overview
//! Apismoke HTTP implements the core's
//! [`HttpTransport`](apismoke_core::HttpTransport) capability over a
//! blocking [`reqwest`] client. The transport sends exactly one request per
//! call and never retries; deadlines and redirect policy are properties of
//! the configured client, and an exceeded deadline surfaces as an ordinary
//! send failure.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use transport::HttpClientConfig;
pub use transport::ReqwestTransport;
