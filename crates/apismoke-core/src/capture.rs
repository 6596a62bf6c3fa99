// crates/apismoke-core/src/capture.rs
// ============================================================================
// Module: Apismoke Output Capture
// Description: Extraction of declared outputs from a response body into the
// run context.
// Purpose: Publish values from one contract's response to later contracts.
// Dependencies: crate::context, crate::error, crate::suite, serde_json
// ============================================================================

//! ## Overview
//! Output capture decodes the buffered response body as JSON once and
//! evaluates every declared extractor against it. Writes are staged and
//! committed atomically: if any extraction fails, none of this contract's
//! outputs reach the run context, while outputs written by earlier
//! contracts are retained. A body that does not decode reports a decode
//! error, never a not-present error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::context::RunContext;
use crate::error::ExtractionError;
use crate::suite::CapturePlan;
use crate::suite::Extractor;

// ============================================================================
// SECTION: Capture
// ============================================================================

/// Evaluates every capture plan against the body and commits the results.
///
/// Committing overwrites any prior global with the same name. With no plans
/// declared the body is not decoded at all.
///
/// # Errors
///
/// Returns [`ExtractionError::InvalidJson`] when the body does not decode
/// and propagates the first extractor evaluation failure; on any error no
/// write is committed.
pub fn capture_outputs(
    outputs: &[CapturePlan],
    body: &[u8],
    ctx: &mut RunContext,
) -> Result<(), ExtractionError> {
    if outputs.is_empty() {
        return Ok(());
    }

    let document: Value =
        serde_json::from_slice(body).map_err(|err| ExtractionError::InvalidJson {
            detail: err.to_string(),
        })?;

    let mut staged = Vec::with_capacity(outputs.len());
    for plan in outputs {
        let Extractor::Json(path) = &plan.extractor;
        staged.push((plan.name.clone(), path.evaluate(&document)?));
    }
    for (name, value) in staged {
        ctx.set_global(name, value);
    }
    Ok(())
}
