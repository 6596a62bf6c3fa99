// crates/apismoke-core/src/validate.rs
// ============================================================================
// Module: Apismoke Response Validation
// Description: Status, header, and body checks against a received response.
// Purpose: Report the first expectation a response fails to satisfy.
// Dependencies: crate::error, crate::suite
// ============================================================================

//! ## Overview
//! Validation runs in a fixed order so failure messages are deterministic:
//! status first, then headers, then body. Header comparison is single-value
//! (only the first response value for a name is considered) and exact.
//! Body expectations are a conjunction; every declared matcher must hold.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::num::NonZeroU16;

use crate::error::ValidationError;
use crate::suite::BodyMatcher;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Checks the response status against the contract's expectation, if any.
///
/// # Errors
///
/// Returns [`ValidationError::StatusMismatch`] reporting both codes.
pub fn validate_status(
    expected: Option<NonZeroU16>,
    actual: u16,
) -> Result<(), ValidationError> {
    if let Some(expected) = expected
        && expected.get() != actual
    {
        return Err(ValidationError::StatusMismatch {
            expected: expected.get(),
            actual,
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Headers
// ============================================================================

/// Checks every expected header for presence and exact value.
///
/// # Errors
///
/// Returns [`ValidationError::HeaderMissing`] when a header is absent and
/// [`ValidationError::HeaderMismatch`] when its first value differs.
pub fn validate_headers(
    expected: &BTreeMap<String, String>,
    headers: &[(String, String)],
) -> Result<(), ValidationError> {
    for (name, expected_value) in expected {
        let Some(actual) = first_header_value(headers, name) else {
            return Err(ValidationError::HeaderMissing {
                name: name.clone(),
            });
        };
        if actual != expected_value {
            return Err(ValidationError::HeaderMismatch {
                name: name.clone(),
                expected: expected_value.clone(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(())
}

/// Returns the first response value for a header name, case-insensitively.
#[must_use]
pub fn first_header_value<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

// ============================================================================
// SECTION: Body
// ============================================================================

/// Checks every compiled body expectation against the buffered body.
///
/// # Errors
///
/// Returns [`ValidationError::LiteralMissing`] or
/// [`ValidationError::PatternUnmatched`] for the first matcher that fails.
pub fn validate_body(matchers: &[BodyMatcher], body: &str) -> Result<(), ValidationError> {
    for matcher in matchers {
        match matcher {
            BodyMatcher::Literal(expected) => {
                if !body.contains(expected) {
                    return Err(ValidationError::LiteralMissing {
                        expected: expected.clone(),
                    });
                }
            }
            BodyMatcher::Pattern(pattern) => {
                if !pattern.is_match(body) {
                    return Err(ValidationError::PatternUnmatched {
                        pattern: pattern.as_str().to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
