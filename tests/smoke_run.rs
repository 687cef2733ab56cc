//! Integration tests for the smoke runner against a mock backend

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use api_smoke::client::HttpClient;
use api_smoke::config::TargetConfig;
use api_smoke::smoke::{self, RunOutcome, SKIP_SNIPPET, SmokeReport};

const EMAIL: &str = "admin@example.com";
const PASSWORD: &str = "admin123";

fn target_for(server: &MockServer) -> TargetConfig {
    TargetConfig {
        base_url: server.url("/api"),
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
    }
}

fn client_for(server: &MockServer, timeout_ms: u64) -> HttpClient {
    HttpClient::new(
        &server.url("/api"),
        Duration::from_millis(timeout_ms),
        Duration::from_millis(timeout_ms),
    )
    .expect("client should build")
}

fn completed(outcome: RunOutcome) -> SmokeReport {
    match outcome {
        RunOutcome::Completed(report) => report,
        RunOutcome::Aborted { check } => {
            panic!("run aborted on {} with status {}", check.endpoint, check.status_code)
        }
    }
}

fn mock_health(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/api/health");
        then.status(200).body(r#"{"status":"ok"}"#);
    });
}

fn mock_login(server: &MockServer, body: serde_json::Value) {
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .json_body(json!({"email": EMAIL, "password": PASSWORD}));
        then.status(200).json_body(body);
    });
}

#[test]
fn full_pass_run_records_five_results_in_call_order() {
    let server = MockServer::start();
    mock_health(&server);
    mock_login(&server, json!({"access_token": "tok-1"}));

    let mut listing_mocks = Vec::new();
    for path in ["/api/deals", "/api/pipelines", "/api/contacts"] {
        listing_mocks.push(server.mock(|when, then| {
            when.method(GET)
                .path(path)
                .header("Authorization", "Bearer tok-1");
            then.status(200).body("[]");
        }));
    }

    let report = completed(
        smoke::standard_checks(&target_for(&server)).run(&client_for(&server, 5000)),
    );

    let endpoints: Vec<&str> = report.results.iter().map(|r| r.endpoint.as_str()).collect();
    assert_eq!(
        endpoints,
        vec!["/health", "/auth/login", "/deals", "/pipelines", "/contacts"]
    );
    assert_eq!(report.total, 5);
    assert_eq!(report.passed, 5);
    assert_eq!(report.exit_code(), 0);
    assert!(report.is_clean());

    for mock in &listing_mocks {
        mock.assert();
    }
}

#[test]
fn missing_access_token_skips_all_dependent_checks() {
    let server = MockServer::start();
    mock_health(&server);
    mock_login(&server, json!({"user": {"email": EMAIL}}));

    let deals = server.mock(|when, then| {
        when.method(GET).path("/api/deals");
        then.status(200).body("[]");
    });

    let report = completed(
        smoke::standard_checks(&target_for(&server)).run(&client_for(&server, 5000)),
    );

    assert_eq!(report.total, 5);
    assert_eq!(report.skipped, 3);
    for result in &report.results[2..] {
        assert_eq!(result.status_code, 0);
        assert_eq!(result.response_snippet, SKIP_SNIPPET);
        assert_eq!(result.elapsed_ms, 0);
    }
    // Login returned 200, so nothing failed; the skips keep the exit clean.
    assert_eq!(report.exit_code(), 0);
    assert_eq!(deals.hits(), 0);
}

#[test]
fn unparseable_login_body_skips_dependents_without_failing() {
    let server = MockServer::start();
    mock_health(&server);
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200).body("<html>not json</html>");
    });

    let report = completed(
        smoke::standard_checks(&target_for(&server)).run(&client_for(&server, 5000)),
    );

    assert_eq!(report.total, 5);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn rejected_login_counts_as_failure_and_skips_dependents() {
    let server = MockServer::start();
    mock_health(&server);
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(401).json_body(json!({"error": "invalid credentials"}));
    });

    let report = completed(
        smoke::standard_checks(&target_for(&server)).run(&client_for(&server, 5000)),
    );

    assert_eq!(report.total, 5);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn failed_health_check_aborts_before_any_other_check() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/health");
        then.status(500).body("boom");
    });
    let login = server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200).json_body(json!({"access_token": "tok-1"}));
    });

    let outcome = smoke::standard_checks(&target_for(&server)).run(&client_for(&server, 5000));

    match outcome {
        RunOutcome::Aborted { check } => {
            assert_eq!(check.endpoint, "/health");
            assert_eq!(check.status_code, 500);
        }
        RunOutcome::Completed(_) => panic!("expected the run to abort"),
    }
    assert_eq!(login.hits(), 0);
}

#[test]
fn unreachable_backend_aborts_with_status_zero() {
    // Reserve a port, then close the listener so the connection is refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let target = TargetConfig {
        base_url: format!("http://{addr}/api"),
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
    };
    let client = HttpClient::new(
        &target.base_url,
        Duration::from_millis(500),
        Duration::from_millis(500),
    )
    .unwrap();

    match smoke::standard_checks(&target).run(&client) {
        RunOutcome::Aborted { check } => {
            assert_eq!(check.status_code, 0);
            assert!(check.response_snippet.starts_with("Error: "));
        }
        RunOutcome::Completed(_) => panic!("expected the run to abort"),
    }
}

#[test]
fn timed_out_check_is_pegged_to_the_bound_and_does_not_abort_the_rest() {
    let server = MockServer::start();
    mock_health(&server);
    mock_login(&server, json!({"access_token": "tok-1"}));
    server.mock(|when, then| {
        when.method(GET).path("/api/deals");
        then.status(200).body("[]").delay(Duration::from_millis(2000));
    });
    for path in ["/api/pipelines", "/api/contacts"] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body("[]");
        });
    }

    let report = completed(
        smoke::standard_checks(&target_for(&server)).run(&client_for(&server, 300)),
    );

    let deals = &report.results[2];
    assert_eq!(deals.endpoint, "/deals");
    assert_eq!(deals.status_code, 0);
    assert_eq!(deals.response_snippet, "Request timeout");
    assert_eq!(deals.elapsed_ms, 300);

    // The remaining checks still ran to completion.
    assert_eq!(report.results[3].status_code, 200);
    assert_eq!(report.results[4].status_code, 200);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.unreachable, 1);
}

#[test]
fn exit_code_equals_the_number_of_failing_checks() {
    let server = MockServer::start();
    mock_health(&server);
    mock_login(&server, json!({"access_token": "tok-1"}));
    server.mock(|when, then| {
        when.method(GET).path("/api/deals");
        then.status(500).body("internal error");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/pipelines");
        then.status(404).body("not found");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/contacts");
        then.status(200).body("[]");
    });

    let report = completed(
        smoke::standard_checks(&target_for(&server)).run(&client_for(&server, 5000)),
    );

    assert_eq!(report.exit_code(), 2);
    let failing: Vec<&str> = report.failures().map(|f| f.endpoint.as_str()).collect();
    assert_eq!(failing, vec!["/deals", "/pipelines"]);
}

#[test]
fn long_bodies_are_truncated_but_still_parsed_for_the_token() {
    let server = MockServer::start();
    mock_health(&server);

    // A login body well past the snippet cap, token buried at the end.
    let padding = "x".repeat(400);
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200)
            .json_body(json!({"filler": padding, "access_token": "tok-long"}));
    });

    let deals = server.mock(|when, then| {
        when.method(GET)
            .path("/api/deals")
            .header("Authorization", "Bearer tok-long");
        then.status(200).body("[]");
    });
    for path in ["/api/pipelines", "/api/contacts"] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body("[]");
        });
    }

    let report = completed(
        smoke::standard_checks(&target_for(&server)).run(&client_for(&server, 5000)),
    );

    let login = &report.results[1];
    assert_eq!(login.response_snippet.chars().count(), 200);
    assert_eq!(deals.hits(), 1);
    assert_eq!(report.skipped, 0);
}

#[test]
fn written_report_matches_the_recorded_run() {
    let server = MockServer::start();
    mock_health(&server);
    mock_login(&server, json!({"access_token": "tok-1"}));
    for path in ["/api/deals", "/api/pipelines", "/api/contacts"] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body("[]");
        });
    }

    let report = completed(
        smoke::standard_checks(&target_for(&server)).run(&client_for(&server, 5000)),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smoke_test.json");
    smoke::write_report(&report, &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = value.as_array().unwrap();

    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["endpoint"], "/health");
    assert_eq!(entries[0]["method"], "GET");
    assert_eq!(entries[1]["endpoint"], "/auth/login");
    assert_eq!(entries[1]["method"], "POST");
    assert_eq!(entries[4]["endpoint"], "/contacts");
    for entry in entries {
        assert!(entry["status_code"].is_u64());
        assert!(entry["elapsed_ms"].is_u64());
        assert!(entry["description"].is_string());
        assert!(entry["response_snippet"].is_string());
    }
}
