//! Formatting, console output, and report persistence

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::check::CheckResult;
use super::runner::SmokeReport;

/// Formats a smoke report as a pretty table with a summary
pub fn format_report(report: &SmokeReport) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Endpoint", "Method", "Status", "Elapsed", "Description"]);

    for result in &report.results {
        let elapsed_str = format!("{}ms", result.elapsed_ms);
        builder.push_record([
            result.endpoint.as_str(),
            result.method.as_str(),
            &status_label(result),
            &elapsed_str,
            &result.description,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = String::new();
    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&format_summary(report));

    output
}

/// Formats the summary section of the report
fn format_summary(report: &SmokeReport) -> String {
    let mut summary = String::new();

    summary.push_str(&format!("\n{}\n", "Summary".bold().underline()));
    summary.push_str(&format!("  Total checks: {}\n", report.total));
    summary.push_str(&format!("  {} Passed: {}\n", "✓".green(), report.passed));

    if report.skipped > 0 {
        summary.push_str(&format!("  {} Skipped: {}\n", "⚠".yellow(), report.skipped));
    }

    if report.unreachable > 0 {
        summary.push_str(&format!(
            "  {} Unreachable: {}\n",
            "⚠".yellow(),
            report.unreachable
        ));
    }

    if report.failed > 0 {
        summary.push_str(&format!("  {} Failed: {}\n", "✗".red(), report.failed));
    }

    summary.push('\n');
    if report.is_clean() {
        summary.push_str(&format!("  {}\n", "Overall: PASS".green().bold()));
    } else {
        summary.push_str(&format!(
            "  {}\n",
            format!(
                "WARNING: {} endpoint(s) returned 4xx/5xx status codes",
                report.failed
            )
            .red()
            .bold()
        ));
        summary.push_str("  Failed endpoints:\n");
        for failure in report.failures() {
            summary.push_str(&format!(
                "    - {} ({}): {}\n",
                failure.endpoint, failure.method, failure.status_code
            ));
        }
    }

    summary
}

/// Renders the status column with the outcome coloring
fn status_label(result: &CheckResult) -> String {
    if result.is_skip() {
        "SKIPPED".yellow().to_string()
    } else if result.is_unreachable() {
        "0".yellow().to_string()
    } else if result.is_failure() {
        result.status_code.to_string().red().to_string()
    } else {
        result.status_code.to_string().green().to_string()
    }
}

/// Prints a smoke report to stdout
pub fn print_report(report: &SmokeReport) {
    println!("{}", format_report(report));
}

/// Writes the ordered results as pretty-printed JSON, overwriting any
/// prior report at the same path
pub fn write_report(report: &SmokeReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&report.results)
        .context("failed to serialize check results")?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory {}", parent.display()))?;
    }

    fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    Ok(())
}
