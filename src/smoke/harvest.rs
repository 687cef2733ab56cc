//! Best-effort backend log harvesting
//!
//! Invoked only when checks failed. Tries the system journal reader
//! first, bounded by a short timeout, then falls back to tailing the
//! first candidate log file found. Every failure here is swallowed;
//! harvesting is diagnostic and never changes the exit code.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::LogConfig;

const READER_TIMEOUT: Duration = Duration::from_secs(2);
const READER_POLL: Duration = Duration::from_millis(50);

/// Collects recent backend error-log lines from the journal or from
/// known log file locations
pub struct LogHarvester {
    journal_unit: String,
    candidates: Vec<PathBuf>,
    tail_lines: usize,
}

impl LogHarvester {
    pub fn new(config: &LogConfig) -> Self {
        Self {
            journal_unit: config.journal_unit.clone(),
            candidates: config.candidates.clone(),
            tail_lines: config.tail_lines,
        }
    }

    /// Attempts to capture backend logs and write them to `dest`
    ///
    /// Returns true if something was written. All failure modes degrade
    /// to a warning and `false`.
    pub fn harvest(&self, dest: &Path) -> bool {
        let captured = self
            .read_journal()
            .or_else(|| self.tail_first_candidate());

        match captured {
            Some(text) => self.persist(dest, &text),
            None => {
                warn!("could not capture backend error logs");
                false
            }
        }
    }

    /// Runs the journal reader for the configured unit, killing it if it
    /// exceeds the timeout
    fn read_journal(&self) -> Option<String> {
        let spawned = Command::new("journalctl")
            .arg(format!("--user-unit={}", self.journal_unit))
            .args(["-n", &self.tail_lines.to_string(), "--no-pager"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(err) => {
                debug!(error = %err, "journal reader unavailable");
                return None;
            }
        };

        let deadline = Instant::now() + READER_TIMEOUT;
        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => break,
                Ok(Some(status)) => {
                    debug!(code = ?status.code(), "journal reader exited with an error");
                    return None;
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        warn!("journal reader timed out");
                        let _ = child.kill();
                        let _ = child.wait();
                        return None;
                    }
                    thread::sleep(READER_POLL);
                }
                Err(err) => {
                    warn!(error = %err, "could not poll journal reader");
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
            }
        }

        let mut output = String::new();
        child.stdout.take()?.read_to_string(&mut output).ok()?;
        if output.trim().is_empty() {
            None
        } else {
            Some(output)
        }
    }

    /// Tails the first candidate log file that exists
    fn tail_first_candidate(&self) -> Option<String> {
        let path = self.candidates.iter().find(|path| path.exists())?;

        match fs::read_to_string(path) {
            Ok(content) => {
                let lines: Vec<&str> = content.lines().collect();
                let start = lines.len().saturating_sub(self.tail_lines);
                let mut tail = lines[start..].join("\n");
                tail.push('\n');
                debug!(path = %path.display(), "tailed candidate log file");
                Some(tail)
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "could not read candidate log file");
                None
            }
        }
    }

    fn persist(&self, dest: &Path, text: &str) -> bool {
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
            && let Err(err) = fs::create_dir_all(parent)
        {
            warn!(error = %err, path = %parent.display(), "could not create error log directory");
            return false;
        }

        match fs::write(dest, text) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, path = %dest.display(), "could not write harvested logs");
                false
            }
        }
    }
}
