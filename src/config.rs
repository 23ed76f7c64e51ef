//! Monitor configuration.
//!
//! All tunable parameters for the traffic light. Values come from the
//! defaults below, optionally overridden by a JSON file and then by
//! command-line flags / `TRAFFICLIGHT_*` environment variables (see
//! `main.rs`). [`MonitorConfig::validate`] runs once at startup; a
//! failure there is the only fatal configuration error.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;

/// Path of the Jenkins JSON API below the server base URL.
pub const API_PATH: &str = "/api/json";

/// What the poll loop does when the status source cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchFailurePolicy {
    /// Blink the fallback and try again on the next refresh.
    #[default]
    Retry,
    /// Stop the loop on the first failed fetch.
    Exit,
}

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Status source ---
    /// Jenkins base URL, e.g. `http://ci.example.com:8080`
    pub server: String,
    /// Name of the job to monitor (matched case-insensitively)
    pub job: String,
    /// Seconds between status fetches
    pub refresh_rate_secs: u32,
    /// Upper bound for a single fetch (seconds)
    pub fetch_timeout_secs: u64,
    /// Behaviour when a fetch fails
    pub on_fetch_failure: FetchFailurePolicy,

    // --- Output device ---
    /// Port I/O character device
    pub port_device: String,
    /// Parallel-port data register address
    pub port_address: u16,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            job: String::new(),
            refresh_rate_secs: 30,
            fetch_timeout_secs: 10,
            on_fetch_failure: FetchFailurePolicy::Retry,

            port_device: pins::PORT_DEVICE.to_owned(),
            port_address: pins::DATA_REGISTER,
        }
    }
}

impl MonitorConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file_error = |reason: String| ConfigError::File {
            path: path.display().to_string(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| file_error(e.to_string()))
    }

    /// Reject settings the monitor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.job.trim().is_empty() {
            return Err(ConfigError::MissingJob);
        }
        if self.server.trim().is_empty() {
            return Err(ConfigError::MissingServer);
        }
        if !(self.server.starts_with("http://") || self.server.starts_with("https://")) {
            return Err(ConfigError::InvalidServer(self.server.clone()));
        }
        if self.refresh_rate_secs == 0 {
            return Err(ConfigError::Zero("refresh rate"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Zero("fetch timeout"));
        }
        Ok(())
    }

    /// Full status URL: the server base URL plus [`API_PATH`].
    /// A single trailing `/` on the base is dropped.
    pub fn status_url(&self) -> String {
        let base = self.server.strip_suffix('/').unwrap_or(&self.server);
        format!("{base}{API_PATH}")
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
