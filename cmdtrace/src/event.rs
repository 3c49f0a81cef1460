// cmdtrace/src/event.rs
//! The analytics event payload and its properties.
//!
//! Identifying fields are hashed here; command arguments arrive already
//! masked.

use chrono::Utc;
use cmdtrace_core::{hash_identity, TelemetryConfig};
use serde::Serialize;

use crate::metadata::ProjectMetadata;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

pub const ANONYMOUS_USER: &str = "anonymous";

/// Name of the generic event sent alongside the per-command one.
pub const GENERIC_EVENT_NAME: &str = "CLI command";

pub const TELEMETRY_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventProperties {
    pub username: String,
    pub command: String,
    pub package_name: String,
    pub project_name: String,
    pub project_version: String,
    pub telemetry_version: String,
    pub os: String,
    pub arch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_command: Option<String>,
}

impl EventProperties {
    /// Builds the properties of a run. `username` is hashed, or reported as
    /// [`ANONYMOUS_USER`] when it could not be determined.
    pub fn new(
        program_name: &str,
        masked_args: &[String],
        metadata: &ProjectMetadata,
        username: Option<&str>,
    ) -> Self {
        Self {
            username: username.map_or_else(|| ANONYMOUS_USER.to_string(), hash_identity),
            command: command_line(program_name, masked_args),
            package_name: hash_identity(&metadata.package_name),
            project_name: hash_identity(&metadata.project_name),
            project_version: metadata.project_version.clone(),
            telemetry_version: TELEMETRY_VERSION.to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            main_command: None,
        }
    }

    pub fn with_main_command(mut self, main_command: impl Into<String>) -> Self {
        self.main_command = Some(main_command.into());
        self
    }
}

/// `"<program> <args...>"`, or just the program name without arguments.
pub fn command_line(program_name: &str, masked_args: &[String]) -> String {
    if masked_args.is_empty() {
        program_name.to_string()
    } else {
        format!("{} {}", program_name, masked_args.join(" "))
    }
}

/// First masked token, or the program name when nothing was typed.
pub fn main_command(program_name: &str, masked_args: &[String]) -> String {
    masked_args
        .first()
        .cloned()
        .unwrap_or_else(|| program_name.to_string())
}

pub fn per_command_event_name(main_command: &str) -> String {
    format!("Command run: {}", main_command)
}

/// Body POSTed to the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryEvent {
    pub app_id: String,
    pub identity: String,
    pub event: String,
    pub timestamp: String,
    pub properties: EventProperties,
}

impl TelemetryEvent {
    pub fn new(
        config: &TelemetryConfig,
        event: impl Into<String>,
        identity: impl Into<String>,
        properties: EventProperties,
    ) -> Self {
        Self {
            app_id: config.app_id.clone(),
            identity: identity.into(),
            event: event.into(),
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            properties,
        }
    }
}
