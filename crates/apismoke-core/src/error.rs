// crates/apismoke-core/src/error.rs
// ============================================================================
// Module: Apismoke Error Taxonomy
// Description: Contract-scoped error types for suite execution.
// Purpose: Classify failures by execution phase for stable reporting.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every failure raised while executing a contract belongs to exactly one of
//! four classes: variable resolution, transport, response validation, or
//! output extraction. The class identifies the phase the contract reached
//! before failing. All errors are contract-scoped and never abort the suite.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Template Locations
// ============================================================================

/// Template locations subject to variable resolution.
///
/// # Invariants
/// - Variants are stable for failure-reason formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLocation {
    /// The contract's URL path template.
    Path,
    /// The contract's request body template.
    Body,
    /// A header value template.
    Header,
}

impl fmt::Display for TemplateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => f.write_str("path"),
            Self::Body => f.write_str("body"),
            Self::Header => f.write_str("header value"),
        }
    }
}

// ============================================================================
// SECTION: Phase Errors
// ============================================================================

/// Variable resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VariableError {
    /// No tier (locals, globals, environment) resolved the placeholder.
    #[error("value for variable {name} not found")]
    NotFound {
        /// Placeholder name that failed to resolve.
        name: String,
    },
}

/// Transport errors raised by HTTP collaborators.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("could not build http client: {0}")]
    Client(String),
    /// The request could not be constructed from resolved contract fields.
    #[error("could not create http request: {0}")]
    Request(String),
    /// The request was sent but no response was received.
    #[error("error sending request: {0}")]
    Send(String),
    /// The response body could not be read.
    #[error("error reading response body: {0}")]
    Body(String),
}

/// Response validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Missing headers fail distinctly from mismatched header values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The response status differed from the expected status.
    #[error("expected http response code {expected} got {actual}")]
    StatusMismatch {
        /// Status code the contract declared.
        expected: u16,
        /// Status code the response carried.
        actual: u16,
    },
    /// An expected header was absent from the response.
    #[error("expected header {name} not found in the response")]
    HeaderMissing {
        /// Header name that was expected.
        name: String,
    },
    /// An expected header was present with a different value.
    #[error("expected header {name} value {expected} got {actual}")]
    HeaderMismatch {
        /// Header name that was expected.
        name: String,
        /// Value the contract declared.
        expected: String,
        /// First value the response carried.
        actual: String,
    },
    /// A literal body expectation was not a substring of the body.
    #[error("expected response not found in the body: {expected}")]
    LiteralMissing {
        /// Literal that was expected in the body.
        expected: String,
    },
    /// A pattern body expectation matched nowhere in the body.
    #[error("regular expression did not match the response body: {pattern}")]
    PatternUnmatched {
        /// Pattern that found no match.
        pattern: String,
    },
    /// A `r/` body expectation did not compile as a regular expression.
    #[error("expected response pattern does not compile: {pattern}")]
    InvalidPattern {
        /// Pattern source that failed to compile.
        pattern: String,
    },
}

/// Output extraction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - A body that fails to decode reports [`ExtractionError::InvalidJson`],
///   never a not-present error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The output expression named an unknown extractor kind.
    #[error("output expression {expression} is not parsable")]
    NotParsable {
        /// Raw output expression as declared in the suite.
        expression: String,
    },
    /// The path expression contained no segments.
    #[error("path expression is empty")]
    EmptyPath,
    /// A path segment did not match the field/index grammar.
    #[error("malformed path segment {segment}")]
    MalformedSegment {
        /// Offending segment text.
        segment: String,
    },
    /// The response body did not decode as JSON.
    #[error("response body is not valid json: {detail}")]
    InvalidJson {
        /// Decoder message describing the failure.
        detail: String,
    },
    /// A key named by the path was absent from the document.
    #[error("value not present in the json object {path}")]
    ValueNotPresent {
        /// Raw path expression being evaluated.
        path: String,
    },
    /// The path descended into a value of the wrong shape.
    #[error("path {path} traverses a non-matching value at {segment}")]
    NotTraversable {
        /// Raw path expression being evaluated.
        path: String,
        /// Segment at which traversal stopped.
        segment: String,
    },
    /// An array index fell outside the array's bounds.
    #[error("index {index} out of range at {segment}")]
    IndexOutOfRange {
        /// Segment carrying the index.
        segment: String,
        /// Index that was out of range.
        index: usize,
    },
}

// ============================================================================
// SECTION: Contract Error
// ============================================================================

/// Contract-scoped failure reason covering every execution phase.
///
/// # Invariants
/// - Exactly one variant per failure class; the variant identifies the
///   phase the contract reached.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    /// A template placeholder failed to resolve.
    #[error("could not resolve {location}: {source}")]
    Variable {
        /// Template location that failed to resolve.
        location: TemplateLocation,
        /// Underlying resolution failure.
        source: VariableError,
    },
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),
    /// The response did not satisfy the contract's expectations.
    #[error("response validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// An output expression failed to parse or evaluate.
    #[error("output capture failed: {0}")]
    Extraction(#[from] ExtractionError),
}
