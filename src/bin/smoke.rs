//! CLI entry point for the smoke-test runner

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use api_smoke::client::HttpClient;
use api_smoke::config::SmokeConfig;
use api_smoke::smoke::{self, LogHarvester, RunOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "smoke",
    version,
    about = "Sequential smoke test for a running backend API"
)]
struct Cli {
    #[arg(long, help = "Configuration profile (default: SMOKE_PROFILE or 'local')")]
    profile: Option<String>,
    #[arg(long, help = "Override the target API base URL")]
    base_url: Option<String>,
    #[arg(long, help = "Override the JSON report path")]
    report: Option<PathBuf>,
    #[arg(long, help = "Override the harvested error log path")]
    error_log: Option<PathBuf>,
    #[arg(long, help = "Override the per-request timeout in milliseconds")]
    timeout_ms: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            error!("smoke run failed: {err:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = match cli.profile.as_deref() {
        Some(profile) => SmokeConfig::load(profile)?,
        None => SmokeConfig::load_from_env()?,
    };

    if let Some(base_url) = cli.base_url {
        config.target.base_url = base_url;
    }
    if let Some(report) = cli.report {
        config.report.results_path = report;
    }
    if let Some(error_log) = cli.error_log {
        config.report.error_log_path = error_log;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.http.timeout_ms = timeout_ms;
        config.http.connect_timeout_ms = config.http.connect_timeout_ms.min(timeout_ms);
    }
    config.validate()?;

    info!(
        profile = %config.profile,
        base_url = %config.target.base_url,
        "starting smoke test"
    );

    let client = HttpClient::new(
        &config.target.base_url,
        Duration::from_millis(config.http.timeout_ms),
        Duration::from_millis(config.http.connect_timeout_ms),
    )?;

    match smoke::standard_checks(&config.target).run(&client) {
        RunOutcome::Aborted { check } => {
            error!(
                status = check.status_code,
                endpoint = %check.endpoint,
                "health check failed, aborting"
            );
            Ok(1)
        }
        RunOutcome::Completed(report) => {
            smoke::print_report(&report);
            smoke::write_report(&report, &config.report.results_path)?;
            info!(path = %config.report.results_path.display(), "results saved");

            if !report.is_clean() {
                info!("attempting to capture backend error logs");
                let harvester = LogHarvester::new(&config.logs);
                if harvester.harvest(&config.report.error_log_path) {
                    info!(
                        path = %config.report.error_log_path.display(),
                        "backend logs saved"
                    );
                }
            }

            Ok(report.exit_code())
        }
    }
}
