//! Backend health endpoint check

use reqwest::Method;

use crate::client::HttpClient;
use crate::session::Session;
use crate::smoke::check::{CheckResult, EndpointCheck};

const ENDPOINT: &str = "/health";

/// Checks that the backend answers its public health endpoint
///
/// This is the only fatal check: anything but HTTP 200 aborts the run
/// before the remaining checks execute.
pub struct HealthCheck;

impl HealthCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointCheck for HealthCheck {
    fn description(&self) -> &str {
        "Health check endpoint"
    }

    fn run(&self, client: &HttpClient, _session: &mut Session) -> CheckResult {
        let outcome = client.execute(Method::GET, ENDPOINT, None, None);
        CheckResult::completed(ENDPOINT, "GET", self.description(), &outcome)
    }

    fn fatal(&self) -> bool {
        true
    }
}
