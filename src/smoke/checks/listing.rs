//! Authenticated list-endpoint checks

use reqwest::Method;

use crate::client::HttpClient;
use crate::session::Session;
use crate::smoke::check::{CheckResult, EndpointCheck};

/// Checks an authenticated GET list endpoint
///
/// Gated on the session token: without one, the check records its
/// synthetic skip result and performs no network call, so the report
/// still carries one entry per planned check.
pub struct ListingCheck {
    endpoint: String,
    description: String,
}

impl ListingCheck {
    pub fn new(endpoint: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            description: description.into(),
        }
    }
}

impl EndpointCheck for ListingCheck {
    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self, client: &HttpClient, session: &mut Session) -> CheckResult {
        match session.bearer() {
            Some(auth) => {
                let outcome = client.execute(Method::GET, &self.endpoint, Some(&auth), None);
                CheckResult::completed(&self.endpoint, "GET", &self.description, &outcome)
            }
            None => CheckResult::skipped(&self.endpoint, "GET", &self.description),
        }
    }
}
