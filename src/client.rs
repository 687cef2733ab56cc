//! Blocking HTTP transport for endpoint checks
//!
//! Wraps a `reqwest` blocking client so every check gets the status code,
//! response body, and elapsed time as structured fields. Transport
//! failures never escape as errors; they are mapped onto a status code of
//! zero with a diagnostic body, which is what the report records.

use std::time::{Duration, Instant};

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use thiserror::Error;
use url::Url;

/// Errors constructing the client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Failure taxonomy for a single dispatched request
#[derive(Debug, Error)]
enum CallError {
    #[error("Request timeout")]
    Timeout,
    #[error("Error: {0}")]
    Transport(String),
}

/// Outcome of one HTTP call
///
/// `status` is 0 when the transport failed or timed out; `body` then
/// carries the diagnostic text instead of a response payload. The body is
/// un-truncated so callers can still parse it (e.g. token extraction).
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub status: u16,
    pub body: String,
    pub elapsed_ms: u64,
}

/// Blocking HTTP client bound to a fixed base URL
pub struct HttpClient {
    inner: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client for the given base URL with a per-request timeout
    /// and a connect timeout acting as the safety margin for unreachable
    /// hosts
    pub fn new(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ClientError> {
        Url::parse(base_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let inner = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Performs one call against `path` (relative to the base URL)
    ///
    /// A timeout yields status 0 with the body "Request timeout" and the
    /// elapsed time pegged to the configured timeout bound; any other
    /// transport failure yields status 0 with the transport's diagnostic
    /// text.
    pub fn execute(
        &self,
        method: Method,
        path: &str,
        auth: Option<&str>,
        body: Option<String>,
    ) -> CallOutcome {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();

        match self.dispatch(method, &url, auth, body) {
            Ok((status, body)) => CallOutcome {
                status,
                body,
                elapsed_ms: started.elapsed().as_millis() as u64,
            },
            Err(CallError::Timeout) => CallOutcome {
                status: 0,
                body: CallError::Timeout.to_string(),
                elapsed_ms: self.timeout.as_millis() as u64,
            },
            Err(err) => CallOutcome {
                status: 0,
                body: err.to_string(),
                elapsed_ms: started.elapsed().as_millis() as u64,
            },
        }
    }

    fn dispatch(
        &self,
        method: Method,
        url: &str,
        auth: Option<&str>,
        body: Option<String>,
    ) -> Result<(u16, String), CallError> {
        let mut request = self
            .inner
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(auth) = auth {
            request = request.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(classify)?;

        Ok((status, body))
    }
}

fn classify(err: reqwest::Error) -> CallError {
    if err.is_timeout() {
        CallError::Timeout
    } else {
        CallError::Transport(err.to_string())
    }
}
