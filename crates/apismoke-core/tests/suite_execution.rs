// crates/apismoke-core/tests/suite_execution.rs
// ============================================================================
// Module: Suite Execution Tests
// Description: End-to-end engine tests over a scripted transport.
// Purpose: Ensure output propagation, failure isolation, and compile-failure
// handling across a sequential run.
// Dependencies: apismoke-core, serde_json
// ============================================================================

//! Sequential suite runs against a scripted in-memory transport.

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

use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;

use apismoke_core::Contract;
use apismoke_core::HttpRequest;
use apismoke_core::HttpTransport;
use apismoke_core::Reporter;
use apismoke_core::RunSummary;
use apismoke_core::Suite;
use apismoke_core::SuitePlan;
use apismoke_core::SuiteRunner;
use apismoke_core::TransportError;
use apismoke_core::TransportResponse;

// ============================================================================
// SECTION: Scripted Transport
// ============================================================================

/// One canned response the scripted transport hands out.
struct Canned {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Canned {
    fn ok(body: &str) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }
}

/// Transport that replays canned responses and records every request.
struct ScriptedTransport {
    responses: Mutex<VecDeque<Canned>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Canned>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let canned = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Send("no scripted response left".to_string()))?;
        Ok(TransportResponse {
            status: canned.status,
            headers: canned.headers,
            body: Box::new(Cursor::new(canned.body.into_bytes())),
        })
    }
}

// ============================================================================
// SECTION: Recording Reporter
// ============================================================================

/// Reporter that records outcomes for assertions.
#[derive(Default)]
struct RecordingReporter {
    successes: Vec<String>,
    failures: Vec<(String, String)>,
    summary: Option<(usize, usize)>,
}

impl Reporter for RecordingReporter {
    fn record_success(&mut self, name: &str) {
        self.successes.push(name.to_string());
    }

    fn record_failure(&mut self, name: &str, reason: &str) {
        self.failures.push((name.to_string(), reason.to_string()));
    }

    fn record_summary(&mut self, failed: usize, total: usize) {
        self.summary = Some((failed, total));
    }
}

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Builds a string map from literal pairs.
fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

/// Runs a suite over the scripted transport with an empty environment.
fn run_suite(
    suite: Suite,
    transport: &ScriptedTransport,
    reporter: &mut RecordingReporter,
) -> RunSummary {
    let plan = SuitePlan::compile(suite);
    let env: BTreeMap<String, String> = BTreeMap::new();
    SuiteRunner::new(transport, &env, "http://svc.test").run(&plan, reporter)
}

// ============================================================================
// SECTION: Output Propagation
// ============================================================================

#[test]
fn captured_outputs_feed_later_contracts() {
    let suite = Suite {
        globals: BTreeMap::new(),
        contracts: vec![
            Contract {
                name: "login".to_string(),
                path: "/login".to_string(),
                method: "POST".to_string(),
                expected_status: 200,
                outputs: map(&[("token", "JSON.auth.token")]),
                ..Contract::default()
            },
            Contract {
                name: "profile".to_string(),
                path: "/profile".to_string(),
                method: "GET".to_string(),
                headers: map(&[("Authorization", "Bearer ::token::")]),
                expected_status: 200,
                ..Contract::default()
            },
        ],
    };
    let transport = ScriptedTransport::new(vec![
        Canned::ok(r#"{"auth":{"token":"abc123"}}"#),
        Canned::ok(r#"{"name":"someone"}"#),
    ]);
    let mut reporter = RecordingReporter::default();

    let summary = run_suite(suite, &transport, &mut reporter);

    assert_eq!(summary, RunSummary { failed: 0, total: 2 });
    assert!(summary.passed());
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, "http://svc.test/login");
    assert_eq!(requests[1].headers.get("Authorization").map(String::as_str), Some("Bearer abc123"));
    assert_eq!(reporter.successes, vec!["login".to_string(), "profile".to_string()]);
}

#[test]
fn seed_globals_resolve_from_the_first_contract() {
    let suite = Suite {
        globals: map(&[("tenant", "acme")]),
        contracts: vec![Contract {
            name: "list".to_string(),
            path: "/tenants/::tenant::/items".to_string(),
            method: "GET".to_string(),
            ..Contract::default()
        }],
    };
    let transport = ScriptedTransport::new(vec![Canned::ok("[]")]);
    let mut reporter = RecordingReporter::default();

    let summary = run_suite(suite, &transport, &mut reporter);

    assert!(summary.passed());
    assert_eq!(transport.requests()[0].url, "http://svc.test/tenants/acme/items");
}

#[test]
fn failed_capture_commits_no_outputs() {
    // The first contract's capture fails on one of two extractions; the
    // second contract must not see the value that did extract.
    let suite = Suite {
        globals: BTreeMap::new(),
        contracts: vec![
            Contract {
                name: "seed".to_string(),
                path: "/seed".to_string(),
                method: "GET".to_string(),
                outputs: map(&[("good", "JSON.present"), ("bad", "JSON.absent")]),
                ..Contract::default()
            },
            Contract {
                name: "consume".to_string(),
                path: "/items/::good::".to_string(),
                method: "GET".to_string(),
                ..Contract::default()
            },
        ],
    };
    let transport = ScriptedTransport::new(vec![
        Canned::ok(r#"{"present":"value"}"#),
        Canned::ok("{}"),
    ]);
    let mut reporter = RecordingReporter::default();

    let summary = run_suite(suite, &transport, &mut reporter);

    assert_eq!(summary.failed, 2);
    // The second contract fails during resolution, before any send.
    assert_eq!(transport.requests().len(), 1);
    let reasons: Vec<&str> = reporter.failures.iter().map(|(_, r)| r.as_str()).collect();
    assert!(reasons[0].contains("not present"), "unexpected reason: {}", reasons[0]);
    assert!(reasons[1].contains("good"), "unexpected reason: {}", reasons[1]);
}

// ============================================================================
// SECTION: Failure Isolation
// ============================================================================

#[test]
fn one_failure_does_not_stop_the_run() {
    let contract = |name: &str, status: u16| Contract {
        name: name.to_string(),
        path: format!("/{name}"),
        method: "GET".to_string(),
        expected_status: status,
        ..Contract::default()
    };
    let suite = Suite {
        globals: BTreeMap::new(),
        contracts: vec![
            contract("first", 200),
            contract("second", 200),
            contract("third", 200),
        ],
    };
    let transport = ScriptedTransport::new(vec![
        Canned::status(200),
        Canned::status(500),
        Canned::status(200),
    ]);
    let mut reporter = RecordingReporter::default();

    let summary = run_suite(suite, &transport, &mut reporter);

    assert_eq!(summary, RunSummary { failed: 1, total: 3 });
    assert_eq!(transport.requests().len(), 3);
    assert_eq!(reporter.successes, vec!["first".to_string(), "third".to_string()]);
    assert_eq!(reporter.failures.len(), 1);
    assert_eq!(reporter.failures[0].0, "second");
    assert_eq!(reporter.summary, Some((1, 3)));
}

#[test]
fn transport_failure_is_contract_scoped() {
    let suite = Suite {
        globals: BTreeMap::new(),
        contracts: vec![
            Contract {
                name: "unreachable".to_string(),
                path: "/a".to_string(),
                method: "GET".to_string(),
                ..Contract::default()
            },
            Contract {
                name: "reachable".to_string(),
                path: "/b".to_string(),
                method: "GET".to_string(),
                ..Contract::default()
            },
        ],
    };
    // No canned response for the first contract; the transport errors.
    let transport = ScriptedTransport::new(Vec::new());
    let mut reporter = RecordingReporter::default();

    let summary = run_suite(suite, &transport, &mut reporter);

    assert_eq!(summary.failed, 2);
    assert_eq!(summary.total, 2);
    assert_eq!(reporter.failures.len(), 2);
}

// ============================================================================
// SECTION: Compilation Failures
// ============================================================================

#[test]
fn compile_failure_sends_no_request() {
    let suite = Suite {
        globals: BTreeMap::new(),
        contracts: vec![
            Contract {
                name: "bad-extractor".to_string(),
                path: "/a".to_string(),
                method: "GET".to_string(),
                outputs: map(&[("value", "XML.foo")]),
                ..Contract::default()
            },
            Contract {
                name: "fine".to_string(),
                path: "/b".to_string(),
                method: "GET".to_string(),
                ..Contract::default()
            },
        ],
    };
    let transport = ScriptedTransport::new(vec![Canned::ok("{}")]);
    let mut reporter = RecordingReporter::default();

    let summary = run_suite(suite, &transport, &mut reporter);

    assert_eq!(summary, RunSummary { failed: 1, total: 2 });
    // Only the well-formed contract reached the transport.
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://svc.test/b");
    assert_eq!(reporter.failures[0].0, "bad-extractor");
    assert!(reporter.failures[0].1.contains("not parsable"));
}

#[test]
fn malformed_body_pattern_fails_at_compile_time() {
    let suite = Suite {
        globals: BTreeMap::new(),
        contracts: vec![Contract {
            name: "bad-pattern".to_string(),
            path: "/a".to_string(),
            method: "GET".to_string(),
            expected_body: vec!["r/[unclosed".to_string()],
            ..Contract::default()
        }],
    };
    let transport = ScriptedTransport::new(vec![Canned::ok("{}")]);
    let mut reporter = RecordingReporter::default();

    let summary = run_suite(suite, &transport, &mut reporter);

    assert_eq!(summary.failed, 1);
    assert!(transport.requests().is_empty());
    assert!(reporter.failures[0].1.contains("does not compile"));
}

// ============================================================================
// SECTION: Expectation Coverage
// ============================================================================

#[test]
fn undeclared_expectations_accept_any_response() {
    let suite = Suite {
        globals: BTreeMap::new(),
        contracts: vec![Contract {
            name: "fire-and-forget".to_string(),
            path: "/ping".to_string(),
            method: "GET".to_string(),
            ..Contract::default()
        }],
    };
    let transport = ScriptedTransport::new(vec![Canned::status(500)]);
    let mut reporter = RecordingReporter::default();

    assert!(run_suite(suite, &transport, &mut reporter).passed());
}

#[test]
fn legacy_singular_body_expectation_is_honored() {
    let suite = Suite {
        globals: BTreeMap::new(),
        contracts: vec![Contract {
            name: "legacy".to_string(),
            path: "/status".to_string(),
            method: "GET".to_string(),
            expected_body_single: "\"ok\":true".to_string(),
            ..Contract::default()
        }],
    };
    let transport = ScriptedTransport::new(vec![Canned::ok(r#"{"ok":false}"#)]);
    let mut reporter = RecordingReporter::default();

    let summary = run_suite(suite, &transport, &mut reporter);

    assert_eq!(summary.failed, 1);
    assert!(reporter.failures[0].1.contains("not found in the body"));
}
