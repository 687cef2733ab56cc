//! Runner configuration
//!
//! Supports multiple profiles (local, staging, ...) with different
//! targets and report locations.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Target backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Base URL of the API, e.g. `http://localhost:3001/api`
    pub base_url: String,
    /// Login email for the session bootstrap
    pub email: String,
    /// Login password for the session bootstrap
    pub password: String,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request wall-clock timeout in milliseconds
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds; must not exceed `timeout_ms`
    pub connect_timeout_ms: u64,
}

/// Output file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Where the JSON check report is written
    pub results_path: PathBuf,
    /// Where harvested backend error logs are written
    pub error_log_path: PathBuf,
}

/// Backend log harvesting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// systemd user unit queried via journalctl
    pub journal_unit: String,
    /// Fallback log files scanned when the journal reader yields nothing
    pub candidates: Vec<PathBuf>,
    /// Number of trailing lines to keep from a harvested log
    pub tail_lines: usize,
}

/// Smoke-runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeConfig {
    /// The active profile (local, staging, etc.)
    pub profile: String,
    /// Target backend
    pub target: TargetConfig,
    /// HTTP transport settings
    pub http: HttpConfig,
    /// Report output settings
    pub report: ReportConfig,
    /// Log harvesting settings
    pub logs: LogConfig,
}

impl SmokeConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Sources are layered in the following order:
    /// 1. Built-in reference defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{profile}.toml (profile-specific overrides)
    /// 4. Environment variables with prefix SMOKE_ (e.g. SMOKE_HTTP__TIMEOUT_MS=2000)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Self::reference())?;
        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            // Use __ as separator for nested fields (e.g. SMOKE_TARGET__BASE_URL)
            .add_source(
                Environment::with_prefix("SMOKE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration using the SMOKE_PROFILE environment variable,
    /// defaulting to "local" if not set
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("SMOKE_PROFILE").unwrap_or_else(|_| "local".to_string());
        Self::load(&profile)
    }

    /// Checks the timeout invariants: the request timeout is positive and
    /// the connect timeout never exceeds it
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "http.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.http.connect_timeout_ms > self.http.timeout_ms {
            return Err(ConfigError::Message(format!(
                "http.connect_timeout_ms ({}) must not exceed http.timeout_ms ({})",
                self.http.connect_timeout_ms, self.http.timeout_ms
            )));
        }
        Ok(())
    }

    /// The reference configuration: local backend, admin credentials,
    /// reports under `reports/`
    pub fn reference() -> Self {
        Self {
            profile: "local".to_string(),
            target: TargetConfig {
                base_url: "http://localhost:3001/api".to_string(),
                email: "admin@example.com".to_string(),
                password: "admin123".to_string(),
            },
            http: HttpConfig {
                timeout_ms: 5000,
                connect_timeout_ms: 2000,
            },
            report: ReportConfig {
                results_path: PathBuf::from("reports/smoke_test.json"),
                error_log_path: PathBuf::from("reports/backend_errors.log"),
            },
            logs: LogConfig {
                journal_unit: "backend".to_string(),
                candidates: vec![
                    PathBuf::from("crm-backend/logs/error.log"),
                    PathBuf::from("crm-backend/npm-debug.log"),
                    PathBuf::from("crm-backend/dist/logs/error.log"),
                ],
                tail_lines: 200,
            },
        }
    }
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self::reference()
    }
}
