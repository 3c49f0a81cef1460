// cmdtrace/src/identity.rs
//! Host identity lookups. The raw values are only ever used as hash input.

use std::env;

use sysinfo::System;

use crate::errors::LookupError;

/// Overrides the machine hostname. Only meant for tests.
pub const HOSTNAME_OVERRIDE_ENV: &str = "CMDTRACE_HOSTNAME";

/// Source of the identifying fields reported in hashed form.
pub trait HostIdentity {
    fn hostname(&self) -> Result<String, LookupError>;
    fn username(&self) -> Result<String, LookupError>;
}

/// Reads identity from the operating system and the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIdentity;

fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl HostIdentity for SystemIdentity {
    fn hostname(&self) -> Result<String, LookupError> {
        if let Some(name) = first_env(&[HOSTNAME_OVERRIDE_ENV]) {
            return Ok(name);
        }
        System::host_name()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(LookupError::NotFound("hostname"))
    }

    fn username(&self) -> Result<String, LookupError> {
        first_env(&["USER", "USERNAME", "LOGNAME"]).ok_or(LookupError::NotFound("username"))
    }
}
