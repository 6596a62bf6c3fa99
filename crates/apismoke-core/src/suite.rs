// crates/apismoke-core/src/suite.rs
// ============================================================================
// Module: Apismoke Suite Model
// Description: Wire-format suite/contract types and their compiled plans.
// Purpose: Decode suite definitions and validate string-typed expressions
// once at load time.
// Dependencies: crate::error, crate::path, regex, serde
// ============================================================================

//! ## Overview
//! The wire model mirrors the suite file format: a suite is an ordered list
//! of contracts plus seed globals, and every contract is an immutable
//! template. Compilation turns the string-typed pieces into checked forms
//! exactly once: output expressions become tagged [`Extractor`] variants,
//! `r/` body expectations become compiled patterns, and a zero expected
//! status becomes "don't check". A contract that fails compilation is
//! recorded as that contract's failure before any request is sent; it never
//! aborts the rest of the suite.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::num::NonZeroU16;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ContractError;
use crate::error::ExtractionError;
use crate::error::ValidationError;
use crate::path::PathExpression;

// ============================================================================
// SECTION: Wire Model
// ============================================================================

/// One declared request/expectation unit within a suite.
///
/// # Invariants
/// - Fields are templates; placeholders are substituted per run, the
///   declaration itself is never mutated.
/// - `locals` are scoped to this contract only and never leak.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Identifier used for reporting.
    #[serde(default)]
    pub name: String,
    /// URL path template appended to the base URL.
    #[serde(default)]
    pub path: String,
    /// HTTP verb; normalized to upper case by the transport.
    #[serde(default)]
    pub method: String,
    /// Request payload template.
    #[serde(default)]
    pub body: String,
    /// Header name to value template.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Variables scoped to this contract, highest resolution precedence.
    #[serde(default)]
    pub locals: BTreeMap<String, String>,
    /// Output name to extraction expression (`"JSON." <path>`).
    #[serde(default)]
    pub outputs: BTreeMap<String, String>,
    /// Expected status code; 0 means "don't check".
    #[serde(default, rename = "http_code_is")]
    pub expected_status: u16,
    /// Ordered literal-or-pattern body expectations; `r/` marks a pattern.
    #[serde(default, rename = "response_contains")]
    pub expected_body: Vec<String>,
    /// Legacy singular body expectation, folded into the list at compile
    /// time when non-empty.
    #[serde(default, rename = "response_body_contains")]
    pub expected_body_single: String,
    /// Header name to exact expected value.
    #[serde(default, rename = "response_headers_is")]
    pub expected_headers: BTreeMap<String, String>,
}

/// The full ordered set of contracts plus seed globals for one run.
///
/// # Invariants
/// - Contract order is declaration order and is load-bearing: later
///   contracts may depend on outputs of earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    /// Seed values for the suite-global variable map.
    #[serde(default)]
    pub globals: BTreeMap<String, String>,
    /// Contracts in declaration order.
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

// ============================================================================
// SECTION: Extractors
// ============================================================================

/// Tagged output extractor, parsed once from its string form.
///
/// # Invariants
/// - Unknown extractor kinds are rejected at parse time; no variant exists
///   for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extractor {
    /// Extract a value from the JSON-decoded response body.
    Json(PathExpression),
}

impl Extractor {
    /// Parses an output expression of the form `<kind> "." <path>`.
    ///
    /// The kind match is case-insensitive; only `JSON` is recognized.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::NotParsable`] for a missing or unknown
    /// kind and propagates path grammar failures.
    pub fn parse(expression: &str) -> Result<Self, ExtractionError> {
        let Some((kind, path)) = expression.split_once('.') else {
            return Err(ExtractionError::NotParsable {
                expression: expression.to_string(),
            });
        };
        if !kind.eq_ignore_ascii_case("json") {
            return Err(ExtractionError::NotParsable {
                expression: expression.to_string(),
            });
        }
        Ok(Self::Json(PathExpression::parse(path)?))
    }
}

/// One named output to capture from a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturePlan {
    /// Suite-global name the extracted value is published under.
    pub name: String,
    /// Parsed extractor to evaluate against the body.
    pub extractor: Extractor,
}

// ============================================================================
// SECTION: Body Matchers
// ============================================================================

/// One compiled body expectation.
#[derive(Debug, Clone)]
pub enum BodyMatcher {
    /// The body must contain this literal substring.
    Literal(String),
    /// The pattern must match somewhere in the body.
    Pattern(Regex),
}

impl BodyMatcher {
    /// Parses a raw expectation; a `r/` prefix marks the remainder as a
    /// regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPattern`] when a `r/` pattern does
    /// not compile.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.strip_prefix("r/") {
            Some(pattern) => Regex::new(pattern).map(Self::Pattern).map_err(|_| {
                ValidationError::InvalidPattern {
                    pattern: pattern.to_string(),
                }
            }),
            None => Ok(Self::Literal(raw.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Compiled Plans
// ============================================================================

/// A contract's expectations in checked form.
///
/// # Invariants
/// - `status` of `None` means the status check is skipped.
#[derive(Debug, Clone, Default)]
pub struct Expectations {
    /// Expected status code, when declared.
    pub status: Option<NonZeroU16>,
    /// Header name to exact expected value.
    pub headers: BTreeMap<String, String>,
    /// Compiled body expectations; all must hold.
    pub body: Vec<BodyMatcher>,
}

/// Contract template with all string-typed expressions validated.
///
/// # Invariants
/// - `outputs` is ordered by output name for deterministic capture.
#[derive(Debug, Clone)]
pub struct CompiledContract {
    /// Identifier used for reporting.
    pub name: String,
    /// URL path template.
    pub path: String,
    /// HTTP verb.
    pub method: String,
    /// Request payload template.
    pub body: String,
    /// Header name to value template.
    pub headers: BTreeMap<String, String>,
    /// Contract-scoped variables.
    pub locals: BTreeMap<String, String>,
    /// Outputs to capture, in name order.
    pub outputs: Vec<CapturePlan>,
    /// Checked response expectations.
    pub expect: Expectations,
}

impl CompiledContract {
    /// Compiles a wire contract, validating its output expressions and body
    /// patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] carrying the extraction or validation
    /// failure; the caller records it as this contract's failure.
    pub fn compile(contract: Contract) -> Result<Self, ContractError> {
        let mut body = Vec::with_capacity(contract.expected_body.len() + 1);
        for raw in &contract.expected_body {
            body.push(BodyMatcher::parse(raw)?);
        }
        if !contract.expected_body_single.is_empty() {
            body.push(BodyMatcher::parse(&contract.expected_body_single)?);
        }

        let mut outputs = Vec::with_capacity(contract.outputs.len());
        for (name, expression) in &contract.outputs {
            outputs.push(CapturePlan {
                name: name.clone(),
                extractor: Extractor::parse(expression)?,
            });
        }

        Ok(Self {
            name: contract.name,
            path: contract.path,
            method: contract.method,
            body: contract.body,
            headers: contract.headers,
            locals: contract.locals,
            outputs,
            expect: Expectations {
                status: NonZeroU16::new(contract.expected_status),
                headers: contract.expected_headers,
                body,
            },
        })
    }
}

/// One contract's place in the run plan: compiled, or failed compilation.
#[derive(Debug, Clone)]
pub struct ContractPlan {
    /// Identifier used for reporting.
    pub name: String,
    /// Compiled contract, or the failure the runner will record for it.
    pub compiled: Result<CompiledContract, ContractError>,
}

/// The whole suite compiled into an executable plan.
#[derive(Debug, Clone, Default)]
pub struct SuitePlan {
    /// Seed values for the run context.
    pub globals: BTreeMap<String, String>,
    /// Contract plans in declaration order.
    pub contracts: Vec<ContractPlan>,
}

impl SuitePlan {
    /// Compiles every contract in the suite.
    ///
    /// Compilation failures stay contract-scoped: the failing contract's
    /// plan carries its error and the rest of the suite compiles normally.
    #[must_use]
    pub fn compile(suite: Suite) -> Self {
        let contracts = suite
            .contracts
            .into_iter()
            .map(|contract| ContractPlan {
                name: contract.name.clone(),
                compiled: CompiledContract::compile(contract),
            })
            .collect();
        Self {
            globals: suite.globals,
            contracts,
        }
    }
}
