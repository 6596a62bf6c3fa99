// crates/apismoke-core/src/executor.rs
// ============================================================================
// Module: Apismoke Contract Executor
// Description: Orchestration of one contract from template to verdict.
// Purpose: Resolve variables, send the request, validate, and capture
// outputs in order.
// Dependencies: crate::capture, crate::context, crate::error,
// crate::interfaces, crate::suite, crate::validate, crate::vars
// ============================================================================

//! ## Overview
//! A contract advances through fixed phases: variables resolved, request
//! sent, response validated, outputs captured, done. The first failure
//! short-circuits the remaining phases and becomes the contract's failure
//! reason; the [`crate::error::ContractError`] class identifies the phase
//! reached. The response body is a single-read resource: it is buffered at
//! most once and the same buffer feeds body validation and output capture.
//! The executor never retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::Read;

use crate::capture::capture_outputs;
use crate::context::RunContext;
use crate::error::ContractError;
use crate::error::TemplateLocation;
use crate::error::TransportError;
use crate::interfaces::Environment;
use crate::interfaces::HttpRequest;
use crate::interfaces::HttpTransport;
use crate::interfaces::TransportResponse;
use crate::suite::CompiledContract;
use crate::validate::validate_body;
use crate::validate::validate_headers;
use crate::validate::validate_status;
use crate::vars::resolve_template;

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Executes one compiled contract against the target service.
pub struct ContractExecutor<'a> {
    /// HTTP collaborator used to send the request.
    transport: &'a dyn HttpTransport,
    /// Environment lookup for the resolver's last tier.
    env: &'a dyn Environment,
    /// Base URL the contract path is appended to.
    base_url: &'a str,
}

impl<'a> ContractExecutor<'a> {
    /// Creates an executor bound to a transport, environment, and base URL.
    #[must_use]
    pub const fn new(
        transport: &'a dyn HttpTransport,
        env: &'a dyn Environment,
        base_url: &'a str,
    ) -> Self {
        Self {
            transport,
            env,
            base_url,
        }
    }

    /// Runs the contract to its terminal state.
    ///
    /// # Errors
    ///
    /// Returns the [`ContractError`] of the first failing phase; the run
    /// context is only mutated when every phase succeeds.
    pub fn execute(
        &self,
        contract: &CompiledContract,
        ctx: &mut RunContext,
    ) -> Result<(), ContractError> {
        let request = self.resolve_request(contract, ctx)?;
        let mut response = self.transport.send(&request)?;

        validate_status(contract.expect.status, response.status)?;
        validate_headers(&contract.expect.headers, &response.headers)?;

        if contract.expect.body.is_empty() && contract.outputs.is_empty() {
            return Ok(());
        }
        let body = read_body(&mut response)?;
        validate_body(&contract.expect.body, &String::from_utf8_lossy(&body))?;
        capture_outputs(&contract.outputs, &body, ctx)?;
        Ok(())
    }

    /// Resolves the contract's templates into a sendable request.
    ///
    /// Path, body, and each header value resolve independently; the failing
    /// location is carried in the error.
    fn resolve_request(
        &self,
        contract: &CompiledContract,
        ctx: &RunContext,
    ) -> Result<HttpRequest, ContractError> {
        let path = resolve_template(&contract.path, &contract.locals, ctx, self.env)
            .map_err(|source| ContractError::Variable {
                location: TemplateLocation::Path,
                source,
            })?;
        let body = resolve_template(&contract.body, &contract.locals, ctx, self.env)
            .map_err(|source| ContractError::Variable {
                location: TemplateLocation::Body,
                source,
            })?;
        let mut headers = BTreeMap::new();
        for (name, template) in &contract.headers {
            let value = resolve_template(template, &contract.locals, ctx, self.env).map_err(
                |source| ContractError::Variable {
                    location: TemplateLocation::Header,
                    source,
                },
            )?;
            headers.insert(name.clone(), value);
        }
        Ok(HttpRequest {
            method: contract.method.clone(),
            url: format!("{}{}", self.base_url, path),
            body,
            headers,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Buffers the response body in one read.
fn read_body(response: &mut TransportResponse) -> Result<Vec<u8>, TransportError> {
    let mut buffer = Vec::new();
    response
        .body
        .read_to_end(&mut buffer)
        .map_err(|err| TransportError::Body(err.to_string()))?;
    Ok(buffer)
}
