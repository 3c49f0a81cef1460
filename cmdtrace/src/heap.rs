// cmdtrace/src/heap.rs
//! Delivery of events to the analytics tracking endpoint.

use cmdtrace_core::TelemetryConfig;
use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::errors::TelemetryError;
use crate::event::TelemetryEvent;

/// Sends one event. Implementations must not retry.
pub trait EventSender {
    fn send(&self, event: &TelemetryEvent) -> Result<(), TelemetryError>;
}

/// Blocking HTTP client for the tracking API.
pub struct HeapClient {
    client: Client,
    endpoint: String,
}

impl HeapClient {
    pub fn new(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("cmdtrace/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EventSender for HeapClient {
    fn send(&self, event: &TelemetryEvent) -> Result<(), TelemetryError> {
        debug!("Sending event '{}' to {}", event.event, self.endpoint);
        let response = self.client.post(&self.endpoint).json(event).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TelemetryError::Rejected {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }
        Ok(())
    }
}
