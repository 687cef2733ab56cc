//! Smoke-check system for verifying a running backend
//!
//! This module provides the check plan and its orchestration:
//! - Sequential execution of a fixed set of endpoint checks
//! - Session chaining (login once, reuse the bearer token)
//! - Ordered JSON reporting with a failure-derived exit code
//! - Best-effort backend log harvesting on failure
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use api_smoke::client::HttpClient;
//! use api_smoke::config::SmokeConfig;
//! use api_smoke::smoke::{self, RunOutcome};
//!
//! let config = SmokeConfig::default();
//! let client = HttpClient::new(
//!     &config.target.base_url,
//!     Duration::from_millis(config.http.timeout_ms),
//!     Duration::from_millis(config.http.connect_timeout_ms),
//! )
//! .unwrap();
//!
//! match smoke::standard_checks(&config.target).run(&client) {
//!     RunOutcome::Completed(report) => println!("{}", smoke::format_report(&report)),
//!     RunOutcome::Aborted { check } => eprintln!("health check failed: {}", check.status_code),
//! }
//! ```

pub mod check;
pub mod checks;
pub mod harvest;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, EndpointCheck, SKIP_SNIPPET};
pub use harvest::LogHarvester;
pub use reporter::{format_report, print_report, write_report};
pub use runner::{RunOutcome, SmokeReport, SmokeRunner};

use crate::config::TargetConfig;

/// Builds the standard check plan: health, login, then the three
/// authenticated list endpoints, in that order
pub fn standard_checks(target: &TargetConfig) -> SmokeRunner {
    SmokeRunner::new()
        .add_check(checks::HealthCheck::new())
        .add_check(checks::LoginCheck::new(&target.email, &target.password))
        .add_check(checks::ListingCheck::new("/deals", "Get deals list"))
        .add_check(checks::ListingCheck::new("/pipelines", "Get pipelines list"))
        .add_check(checks::ListingCheck::new("/contacts", "Get contacts list"))
}
