//! Core check trait and result types

use serde::Serialize;

use crate::client::{CallOutcome, HttpClient};
use crate::session::Session;

/// Maximum length of the response snippet stored in a result
pub const SNIPPET_MAX: usize = 200;

/// Snippet recorded for checks skipped for lack of an auth token
pub const SKIP_SNIPPET: &str = "SKIPPED - No auth token";

/// Result of a single endpoint check
///
/// `status_code` 0 means no HTTP status was obtained: transport failure,
/// timeout, or a skipped check. Results are immutable once created and
/// appended to the report in call order.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Path relative to the base URL
    pub endpoint: String,
    /// HTTP verb
    pub method: String,
    /// Human-readable label
    pub description: String,
    /// HTTP status code, or 0 for transport failure/timeout/skip
    pub status_code: u16,
    /// Response body truncated to 200 characters
    pub response_snippet: String,
    /// Elapsed wall-clock time in milliseconds
    pub elapsed_ms: u64,
}

impl CheckResult {
    /// Builds a result from a completed (or transport-failed) call
    pub fn completed(
        endpoint: impl Into<String>,
        method: impl Into<String>,
        description: impl Into<String>,
        outcome: &CallOutcome,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            description: description.into(),
            status_code: outcome.status,
            response_snippet: snippet(&outcome.body),
            elapsed_ms: outcome.elapsed_ms,
        }
    }

    /// Builds the synthetic result for a check skipped without a network
    /// call
    pub fn skipped(
        endpoint: impl Into<String>,
        method: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            description: description.into(),
            status_code: 0,
            response_snippet: SKIP_SNIPPET.to_string(),
            elapsed_ms: 0,
        }
    }

    /// True for a 4xx/5xx response; only these count toward the exit code
    pub fn is_failure(&self) -> bool {
        self.status_code >= 400
    }

    /// True for a completed sub-400 response
    pub fn is_pass(&self) -> bool {
        self.status_code > 0 && self.status_code < 400
    }

    /// True when the check was skipped for lack of an auth token
    pub fn is_skip(&self) -> bool {
        self.status_code == 0 && self.response_snippet == SKIP_SNIPPET
    }

    /// True when the transport produced no status (failure or timeout)
    pub fn is_unreachable(&self) -> bool {
        self.status_code == 0 && !self.is_skip()
    }
}

/// Truncates a response body to the stored snippet length, on a char
/// boundary
fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_MAX).collect()
}

/// Trait for one planned endpoint check
pub trait EndpointCheck {
    /// Human-readable label printed as the check runs
    fn description(&self) -> &str;

    /// Performs the check; never panics or returns an error, every
    /// outcome is encoded in the result
    fn run(&self, client: &HttpClient, session: &mut Session) -> CheckResult;

    /// Whether a non-200 outcome aborts the whole run
    fn fatal(&self) -> bool {
        false
    }
}
