//! Session bootstrap via the login endpoint

use reqwest::Method;
use tracing::{info, warn};

use crate::client::HttpClient;
use crate::session::{self, Session};
use crate::smoke::check::{CheckResult, EndpointCheck};

const ENDPOINT: &str = "/auth/login";

/// Performs the one unauthenticated login POST and stores the returned
/// access token in the session
///
/// A missing token, malformed body, or non-200 status leaves the session
/// unauthenticated with a warning; dependent checks are then skipped, not
/// failed.
pub struct LoginCheck {
    email: String,
    password: String,
}

impl LoginCheck {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl EndpointCheck for LoginCheck {
    fn description(&self) -> &str {
        "Login endpoint"
    }

    fn run(&self, client: &HttpClient, session: &mut Session) -> CheckResult {
        let payload = serde_json::json!({
            "email": self.email,
            "password": self.password,
        })
        .to_string();

        let outcome = client.execute(Method::POST, ENDPOINT, None, Some(payload));

        if outcome.status == 200 {
            let preview: String = outcome.body.chars().take(100).collect();
            match session::extract_access_token(&outcome.body) {
                Ok(Some(token)) => {
                    session.authenticate(token);
                    info!("access token obtained");
                }
                Ok(None) => {
                    warn!(body = %preview, "login succeeded but no access token in response");
                }
                Err(err) => {
                    warn!(error = %err, body = %preview, "could not parse login response");
                }
            }
        } else {
            warn!(
                status = outcome.status,
                "login failed, authenticated endpoints will be skipped"
            );
        }

        CheckResult::completed(ENDPOINT, "POST", self.description(), &outcome)
    }
}
