//! API smoke-test runner
//!
//! Exercises a running REST backend with a fixed, sequential set of
//! checks (health, login, authenticated list endpoints), records status
//! and timing per check, and writes a JSON report plus an optional
//! harvested backend error log.

/// HTTP transport - blocking client with timeouts and failure mapping
pub mod client;

/// Layered configuration (defaults, files, environment)
pub mod config;

/// Bearer-token session state obtained from login
pub mod session;

/// Smoke-check system - planned checks, runner, reporting, log harvest
pub mod smoke;
