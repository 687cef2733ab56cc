//! Sequential runner orchestrating the check plan

use crate::client::HttpClient;
use crate::session::Session;

use super::check::{CheckResult, EndpointCheck};

/// Results from a completed smoke run
#[derive(Debug)]
pub struct SmokeReport {
    /// Individual check results in call order
    pub results: Vec<CheckResult>,
    /// Total number of checks recorded
    pub total: usize,
    /// Checks that completed with a sub-400 status
    pub passed: usize,
    /// Checks that completed with a 4xx/5xx status
    pub failed: usize,
    /// Checks skipped for lack of an auth token
    pub skipped: usize,
    /// Checks that produced no HTTP status (transport failure or timeout)
    pub unreachable: usize,
}

impl SmokeReport {
    /// Aggregates ordered results into a report with outcome counters
    pub fn from_results(results: Vec<CheckResult>) -> Self {
        let mut passed = 0;
        let mut failed = 0;
        let mut skipped = 0;
        let mut unreachable = 0;

        for result in &results {
            if result.is_failure() {
                failed += 1;
            } else if result.is_pass() {
                passed += 1;
            } else if result.is_skip() {
                skipped += 1;
            } else {
                unreachable += 1;
            }
        }

        let total = results.len();

        Self {
            results,
            total,
            passed,
            failed,
            skipped,
            unreachable,
        }
    }

    /// Returns true if no check failed with a 4xx/5xx status
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    /// The failing checks, in call order
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|result| result.is_failure())
    }

    /// The process exit code: the number of 4xx/5xx checks
    ///
    /// Skipped and unreachable checks do not count.
    pub fn exit_code(&self) -> i32 {
        self.failed as i32
    }
}

/// Terminal state of a run
#[derive(Debug)]
pub enum RunOutcome {
    /// A fatal check did not return 200; no further checks executed and
    /// no report is produced
    Aborted { check: CheckResult },
    /// All planned checks recorded a result
    Completed(SmokeReport),
}

/// Orchestrates running endpoint checks sequentially and collecting
/// results
///
/// Checks run strictly in insertion order; each blocks until it
/// completes or times out. The only short-circuit is a fatal check
/// failing.
pub struct SmokeRunner {
    checks: Vec<Box<dyn EndpointCheck>>,
}

impl SmokeRunner {
    /// Creates a new runner with no checks
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Adds a check to the plan
    pub fn add_check<C: EndpointCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs all registered checks against the client
    ///
    /// Exactly one result is recorded per planned check, unless a fatal
    /// check fails, in which case the run aborts immediately.
    pub fn run(self, client: &HttpClient) -> RunOutcome {
        let mut session = Session::new();
        let mut results = Vec::with_capacity(self.checks.len());

        for check in self.checks {
            println!("Testing: {}", check.description());
            let result = check.run(client, &mut session);

            if result.is_skip() {
                println!("  SKIPPED: No auth token available");
            } else {
                println!(
                    "  Status: {}, Elapsed: {}ms",
                    result.status_code, result.elapsed_ms
                );
            }

            if check.fatal() && result.status_code != 200 {
                return RunOutcome::Aborted { check: result };
            }

            results.push(result);
        }

        RunOutcome::Completed(SmokeReport::from_results(results))
    }
}

impl Default for SmokeRunner {
    fn default() -> Self {
        Self::new()
    }
}
