//! errors.rs - Error types for the telemetry collaborators.
//!
//! None of these ever reach the host command. The hook logs them as warnings
//! and skips the send.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// Failure to determine a piece of host identity (hostname, username).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LookupError {
    #[error("Could not determine the {0}")]
    NotFound(&'static str),
}

/// Failure while delivering an event to the analytics endpoint.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint rejected the event. Response code returned: {status}, Response reason: {reason}")]
    Rejected { status: u16, reason: String },

    #[error("Failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),
}
