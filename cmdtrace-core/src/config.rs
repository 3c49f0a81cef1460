//! Configuration management for `cmdtrace-core`.
//!
//! Holds the fixed constants of the telemetry contract and the small,
//! immutable [`TelemetryConfig`] passed by reference to the collaborators.
//! A config can be loaded from YAML; missing fields fall back to defaults.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Key used for a group the host reports without a name.
pub const DEFAULT_ROOT_NAME: &str = "cmdtrace";

/// Production application id of the analytics project.
pub const HEAP_APPID_PROD: &str = "2388822444";

/// Analytics tracking endpoint.
pub const HEAP_ENDPOINT: &str = "https://heapanalytics.com/api/track";

/// Environment variable that redirects events to a development app id.
pub const APP_ID_ENV: &str = "HEAP_APPID_DEV";

/// Environment variable that overrides the tracking endpoint.
pub const ENDPOINT_ENV: &str = "CMDTRACE_ENDPOINT";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// URL events are POSTed to.
    pub endpoint: String,
    pub app_id: String,
    /// Name of the host program; prefixes the reported command and keys the
    /// unnamed root group.
    pub program_name: String,
    pub timeout_secs: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: HEAP_ENDPOINT.to_string(),
            app_id: HEAP_APPID_PROD.to_string(),
            program_name: DEFAULT_ROOT_NAME.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TelemetryConfig {
    /// Loads a config from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading telemetry config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: TelemetryConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Applies [`APP_ID_ENV`] and [`ENDPOINT_ENV`] from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(app_id) = lookup(APP_ID_ENV).filter(|v| !v.is_empty()) {
            debug!("Overriding app id from {}.", APP_ID_ENV);
            self.app_id = app_id;
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.is_empty()) {
            debug!("Overriding endpoint from {}: {}", ENDPOINT_ENV, endpoint);
            self.endpoint = endpoint;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
