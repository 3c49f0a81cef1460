// cmdtrace/src/consent.rs
//! One-time user consent, persisted next to the project in `.telemetry`.
//!
//! The file holds a single YAML mapping, `consent: true` or `consent: false`.
//! A missing or unusable file triggers the prompt, and the answer is written
//! back so the user is asked only once.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, warn};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub const TELEMETRY_FILE_NAME: &str = ".telemetry";

pub const CONSENT_MESSAGE: &str = "As an open-source project, we collect usage analytics. \n\
We cannot see nor store information contained in a project. \n\
Only command and option names are reported; every value you type is masked. \n\
Do you opt into usage analytics?";

pub const OPTED_IN_MESSAGE: &str = "You have opted into product usage analytics.";

#[derive(Debug, Serialize, Deserialize)]
struct ConsentFile {
    consent: bool,
}

/// Asks the user for consent.
pub trait ConsentPrompt {
    /// Returns `None` when no answer can be obtained, e.g. without a terminal.
    fn confirm(&self, message: &str) -> Option<bool>;
}

/// Prompts on stdout and reads a `y/N` answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl ConsentPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> Option<bool> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            debug!("stdin is not a terminal, not asking for telemetry consent.");
            return None;
        }

        print!("{} [y/N]: ", message);
        io::stdout().flush().ok()?;

        let mut answer = String::new();
        stdin.lock().read_line(&mut answer).ok()?;
        let answer = answer.trim().to_lowercase();
        Some(answer == "y" || answer == "yes")
    }
}

pub fn telemetry_file_path(project_path: &Path) -> PathBuf {
    project_path.join(TELEMETRY_FILE_NAME)
}

/// Reads a recorded answer. `None` if the file is missing or does not hold
/// a mapping with a boolean `consent`.
pub fn read_consent(telemetry_file_path: &Path) -> Option<bool> {
    let text = match fs::read_to_string(telemetry_file_path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("Failed to read {}: {}", telemetry_file_path.display(), e);
            return None;
        }
    };

    let value: serde_yaml::Value = match serde_yaml::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            debug!("Telemetry file {} is not valid YAML: {}", telemetry_file_path.display(), e);
            return None;
        }
    };

    value.as_mapping()?.get("consent")?.as_bool()
}

/// Records `consent` in the telemetry file, replacing whatever it held.
pub fn write_consent(telemetry_file_path: &Path, consent: bool) -> Result<()> {
    let yaml = serde_yaml::to_string(&ConsentFile { consent })
        .context("Failed to serialize consent")?;
    fs::write(telemetry_file_path, yaml)
        .with_context(|| format!("Failed to write {}", telemetry_file_path.display()))
}

/// Returns the recorded consent of the project, asking `prompt` when none
/// is recorded yet.
pub fn check_for_telemetry_consent(project_path: &Path, prompt: &dyn ConsentPrompt) -> bool {
    let path = telemetry_file_path(project_path);
    match read_consent(&path) {
        Some(consent) => consent,
        None => confirm_consent(&path, prompt),
    }
}

fn confirm_consent(telemetry_file_path: &Path, prompt: &dyn ConsentPrompt) -> bool {
    let Some(consent) = prompt.confirm(CONSENT_MESSAGE) else {
        return false;
    };

    if let Err(e) = write_consent(telemetry_file_path, consent) {
        warn!("Could not record telemetry consent: {:#}", e);
    }
    if consent {
        eprintln!("{}", OPTED_IN_MESSAGE.green());
    }
    consent
}
