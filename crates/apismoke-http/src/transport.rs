// crates/apismoke-http/src/transport.rs
// ============================================================================
// Module: Apismoke Reqwest Transport
// Description: Blocking HTTP transport with configurable timeout and
// redirect policy.
// Purpose: Turn resolved contract requests into wire requests and hand back
// single-read responses.
// Dependencies: apismoke-core, reqwest, url
// ============================================================================

//! ## Overview
//! [`ReqwestTransport`] builds a blocking client once and reuses it for
//! every contract in a run. Method names are upper-cased before parsing;
//! invalid methods, URLs, or header names are request-construction errors,
//! distinct from send failures. The response's status and headers are
//! extracted eagerly while the body stays behind a reader so the executor
//! can buffer it exactly once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use apismoke_core::HttpRequest;
use apismoke_core::HttpTransport;
use apismoke_core::TransportError;
use apismoke_core::TransportResponse;
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the blocking HTTP client.
///
/// # Invariants
/// - `timeout_ms` applies to the full request lifecycle; an exceeded
///   deadline is reported as a send failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Follow redirects up to the client default hop limit.
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: "apismoke/0.1".to_string(),
            follow_redirects: true,
        }
    }
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Blocking transport implementing the core's HTTP capability.
pub struct ReqwestTransport {
    /// Shared client used for every outbound request.
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a client built from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] when the client cannot be built.
    pub fn new(config: &HttpClientConfig) -> Result<Self, TransportError> {
        let redirect = if config.follow_redirects { Policy::default() } else { Policy::none() };
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(redirect)
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))?;
        Ok(Self {
            client,
        })
    }

    /// Creates a transport over a caller-provided client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError> {
        let method = Method::from_bytes(request.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| {
                TransportError::Request(format!("invalid http method: {}", request.method))
            })?;
        let url = Url::parse(&request.url)
            .map_err(|_| TransportError::Request(format!("invalid url: {}", request.url)))?;
        let headers = build_headers(&request.headers)?;

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .body(request.body.clone())
            .send()
            .map_err(|err| TransportError::Send(err.to_string()))?;

        let status = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect();
        Ok(TransportResponse {
            status,
            headers: response_headers,
            body: Box::new(response),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts resolved header templates into a wire header map.
fn build_headers(
    headers: &std::collections::BTreeMap<String, String>,
) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TransportError::Request(format!("invalid header name: {name}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| TransportError::Request(format!("invalid header value for {name}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
