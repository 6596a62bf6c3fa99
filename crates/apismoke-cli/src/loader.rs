// crates/apismoke-cli/src/loader.rs
// ============================================================================
// Module: Apismoke Suite Loader
// Description: Bounded read and extension-dispatched decode of suite files.
// Purpose: Turn a suite definition file into the core's wire model.
// Dependencies: apismoke-core, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! Suite files decode by extension: `.yaml` and `.yml` via YAML, everything
//! else via JSON. Reads are capped so a mis-pointed path cannot exhaust
//! memory. Loader failures are process-fatal — unlike contract failures,
//! there is no suite to fall back to.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use apismoke_core::Suite;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a suite definition file.
pub const MAX_SUITE_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Suite loading errors.
///
/// # Invariants
/// - Variants are stable for exit-code mapping; all are process-fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The suite file could not be opened or read.
    #[error("could not read suite file {path}: {detail}")]
    Read {
        /// Path as given on the command line.
        path: String,
        /// I/O message describing the failure.
        detail: String,
    },
    /// The suite file exceeds the size cap.
    #[error("suite file {path} exceeds size limit ({max_bytes} bytes)")]
    TooLarge {
        /// Path as given on the command line.
        path: String,
        /// Maximum allowed bytes.
        max_bytes: usize,
    },
    /// The suite file did not decode as JSON or YAML.
    #[error("could not decode suite file {path}: {detail}")]
    Decode {
        /// Path as given on the command line.
        path: String,
        /// Decoder message describing the failure.
        detail: String,
    },
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Reads and decodes a suite definition file.
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be read, exceeds the size
/// cap, or does not decode into the suite model.
pub fn load_suite(path: &Path) -> Result<Suite, LoadError> {
    let content = read_file_limited(path, MAX_SUITE_BYTES)?;
    decode_suite(path, &content)
}

/// Reads a file while enforcing a maximum byte limit.
fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, LoadError> {
    let read_error = |detail: String| LoadError::Read {
        path: path.display().to_string(),
        detail,
    };
    let file = File::open(path).map_err(|err| read_error(err.to_string()))?;
    let mut buffer = Vec::new();
    let limit = max_bytes.saturating_add(1);
    let limit = u64::try_from(limit).map_err(|_| read_error("size limit exceeds u64".to_string()))?;
    let mut handle = file.take(limit);
    handle.read_to_end(&mut buffer).map_err(|err| read_error(err.to_string()))?;
    if buffer.len() > max_bytes {
        return Err(LoadError::TooLarge {
            path: path.display().to_string(),
            max_bytes,
        });
    }
    Ok(buffer)
}

/// Decodes suite content based on the file extension.
fn decode_suite(path: &Path, content: &[u8]) -> Result<Suite, LoadError> {
    let decode_error = |detail: String| LoadError::Decode {
        path: path.display().to_string(),
        detail,
    };
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    let ext = ext.to_ascii_lowercase();
    if ext == "yaml" || ext == "yml" {
        return serde_yaml::from_slice(content).map_err(|err| decode_error(err.to_string()));
    }
    serde_json::from_slice(content).map_err(|err| decode_error(err.to_string()))
}
