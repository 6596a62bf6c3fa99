// crates/apismoke-cli/tests/loader.rs
// ============================================================================
// Module: Suite Loader Tests
// Description: File reading and decoding tests for suite definitions.
// Purpose: Ensure extension dispatch, size capping, and decode failures
// behave as documented.
// Dependencies: apismoke-cli, apismoke-core, tempfile
// ============================================================================

//! Loading suite definitions from JSON and YAML files.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io::Write;
use std::path::Path;

use apismoke_cli::LoadError;
use apismoke_cli::load_suite;
use apismoke_cli::loader::MAX_SUITE_BYTES;
use tempfile::Builder;
use tempfile::NamedTempFile;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Writes content into a temporary file with the given extension.
fn write_suite_file(extension: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(extension).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

#[test]
fn json_suite_loads() {
    let file = write_suite_file(
        ".json",
        r#"{
            "globals": {"host": "svc"},
            "contracts": [
                {"name": "ping", "path": "/ping", "method": "GET", "http_code_is": 200}
            ]
        }"#,
    );

    let suite = load_suite(file.path()).unwrap();

    assert_eq!(suite.globals.get("host").map(String::as_str), Some("svc"));
    assert_eq!(suite.contracts.len(), 1);
    assert_eq!(suite.contracts[0].name, "ping");
    assert_eq!(suite.contracts[0].expected_status, 200);
}

#[test]
fn yaml_suite_loads() {
    let file = write_suite_file(
        ".yaml",
        "globals:\n  host: svc\ncontracts:\n  - name: ping\n    path: /ping\n    method: GET\n    http_code_is: 200\n    response_contains:\n      - ok\n",
    );

    let suite = load_suite(file.path()).unwrap();

    assert_eq!(suite.contracts[0].expected_body, vec!["ok".to_string()]);
}

#[test]
fn yml_extension_also_decodes_as_yaml() {
    let file = write_suite_file(".yml", "contracts:\n  - name: ping\n    path: /ping\n");

    let suite = load_suite(file.path()).unwrap();

    assert_eq!(suite.contracts.len(), 1);
}

#[test]
fn omitted_fields_take_their_defaults() {
    let file = write_suite_file(".json", r#"{"contracts": [{"name": "bare"}]}"#);

    let suite = load_suite(file.path()).unwrap();
    let contract = &suite.contracts[0];

    assert!(suite.globals.is_empty());
    assert!(contract.path.is_empty());
    assert_eq!(contract.expected_status, 0);
    assert!(contract.outputs.is_empty());
}

// ============================================================================
// SECTION: Failures
// ============================================================================

#[test]
fn undecodable_content_is_a_decode_error() {
    let file = write_suite_file(".json", "not json at all");

    let err = load_suite(file.path()).unwrap_err();

    assert!(matches!(err, LoadError::Decode { .. }), "unexpected error: {err:?}");
}

#[test]
fn missing_file_is_a_read_error() {
    let err = load_suite(Path::new("/nonexistent/suite.json")).unwrap_err();

    assert!(matches!(err, LoadError::Read { .. }), "unexpected error: {err:?}");
}

#[test]
fn oversized_file_is_rejected() {
    let padding = "x".repeat(MAX_SUITE_BYTES + 1);
    let file = write_suite_file(".json", &padding);

    let err = load_suite(file.path()).unwrap_err();

    assert!(matches!(err, LoadError::TooLarge { .. }), "unexpected error: {err:?}");
}
