// crates/apismoke-core/src/path.rs
// ============================================================================
// Module: Apismoke Path Expressions
// Description: Dotted/bracketed locator grammar over decoded JSON documents.
// Purpose: Parse extraction paths once and evaluate them deterministically.
// Dependencies: crate::error, serde_json
// ============================================================================

//! ## Overview
//! A path expression is an ordered, non-empty sequence of segments split on
//! `.`: a plain field (`A`), an indexed field (`B[3]`), or a bare index
//! (`[0]`) that is only legal as the first segment and addresses an
//! array-rooted document. Parsing happens once at suite-load time;
//! evaluation walks the decoded [`Value`] with exhaustive matching so every
//! shape mismatch becomes an explicit [`ExtractionError`], never a cast
//! failure. Evaluation is deterministic and independent of object key order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::error::ExtractionError;

// ============================================================================
// SECTION: Segments
// ============================================================================

/// One parsed path segment.
///
/// # Invariants
/// - `RootIndex` only ever occupies the first position of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object field lookup (`A`).
    Field(String),
    /// Object field lookup followed by an array index (`B[3]`).
    IndexedField {
        /// Field expected to hold an array.
        field: String,
        /// Zero-based index into that array.
        index: usize,
    },
    /// Index into an array-rooted document (`[0]`).
    RootIndex(usize),
}

// ============================================================================
// SECTION: Path Expression
// ============================================================================

/// Parsed path expression ready for repeated evaluation.
///
/// # Invariants
/// - `segments` is non-empty; an empty expression fails at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    /// Raw expression text, kept for failure reporting.
    raw: String,
    /// Parsed segments in traversal order.
    segments: Vec<Segment>,
}

impl PathExpression {
    /// Parses a raw dotted/bracketed expression.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::EmptyPath`] for an expression with no
    /// segments and [`ExtractionError::MalformedSegment`] for a segment that
    /// does not fit the grammar, including a bare index past position zero.
    pub fn parse(raw: &str) -> Result<Self, ExtractionError> {
        if raw.trim().is_empty() {
            return Err(ExtractionError::EmptyPath);
        }
        let mut segments = Vec::new();
        for (position, part) in raw.split('.').enumerate() {
            segments.push(parse_segment(part, position)?);
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the raw expression text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Evaluates the expression against a decoded document and stringifies
    /// the final value.
    ///
    /// Strings are returned verbatim; numbers and booleans use their
    /// canonical textual form; `null` becomes `"null"`; compound values
    /// render as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::ValueNotPresent`] for a missing key,
    /// [`ExtractionError::IndexOutOfRange`] for an index past an array's
    /// end, and [`ExtractionError::NotTraversable`] when a segment meets a
    /// value of the wrong shape.
    pub fn evaluate(&self, root: &Value) -> Result<String, ExtractionError> {
        let mut current = root;
        let last = self.segments.len().saturating_sub(1);
        for (position, segment) in self.segments.iter().enumerate() {
            let next = self.step(current, segment)?;
            if position == last {
                return Ok(stringify(next));
            }
            current = next;
        }
        Err(ExtractionError::EmptyPath)
    }

    /// Resolves one segment against the current value.
    fn step<'a>(
        &self,
        current: &'a Value,
        segment: &Segment,
    ) -> Result<&'a Value, ExtractionError> {
        match segment {
            Segment::RootIndex(index) => {
                let Value::Array(items) = current else {
                    return Err(self.not_traversable(segment));
                };
                items.get(*index).ok_or_else(|| ExtractionError::IndexOutOfRange {
                    segment: segment_text(segment),
                    index: *index,
                })
            }
            Segment::Field(name) => {
                let Value::Object(map) = current else {
                    return Err(self.not_traversable(segment));
                };
                map.get(name).ok_or_else(|| ExtractionError::ValueNotPresent {
                    path: self.raw.clone(),
                })
            }
            Segment::IndexedField {
                field,
                index,
            } => {
                let Value::Object(map) = current else {
                    return Err(self.not_traversable(segment));
                };
                let entry = map.get(field).ok_or_else(|| ExtractionError::ValueNotPresent {
                    path: self.raw.clone(),
                })?;
                let Value::Array(items) = entry else {
                    return Err(self.not_traversable(segment));
                };
                items.get(*index).ok_or_else(|| ExtractionError::IndexOutOfRange {
                    segment: segment_text(segment),
                    index: *index,
                })
            }
        }
    }

    /// Builds the wrong-shape failure for a segment.
    fn not_traversable(&self, segment: &Segment) -> ExtractionError {
        ExtractionError::NotTraversable {
            path: self.raw.clone(),
            segment: segment_text(segment),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses one dot-separated part into a segment.
fn parse_segment(part: &str, position: usize) -> Result<Segment, ExtractionError> {
    let malformed = || ExtractionError::MalformedSegment {
        segment: part.to_string(),
    };
    if part.is_empty() {
        return Err(malformed());
    }
    if let Some(rest) = part.strip_prefix('[') {
        if position != 0 {
            return Err(malformed());
        }
        let digits = rest.strip_suffix(']').ok_or_else(malformed)?;
        let index = digits.parse::<usize>().map_err(|_| malformed())?;
        return Ok(Segment::RootIndex(index));
    }
    if let Some(rest) = part.strip_suffix(']') {
        let (field, digits) = rest.split_once('[').ok_or_else(malformed)?;
        if field.is_empty() || digits.contains('[') || field.contains(']') {
            return Err(malformed());
        }
        let index = digits.parse::<usize>().map_err(|_| malformed())?;
        return Ok(Segment::IndexedField {
            field: field.to_string(),
            index,
        });
    }
    if part.contains('[') || part.contains(']') {
        return Err(malformed());
    }
    Ok(Segment::Field(part.to_string()))
}

/// Renders a segment back to its source form for error messages.
fn segment_text(segment: &Segment) -> String {
    match segment {
        Segment::Field(name) => name.clone(),
        Segment::IndexedField {
            field,
            index,
        } => format!("{field}[{index}]"),
        Segment::RootIndex(index) => format!("[{index}]"),
    }
}

/// Stringifies the final resolved value.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        compound @ (Value::Array(_) | Value::Object(_)) => compound.to_string(),
    }
}
