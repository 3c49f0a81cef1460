// cmdtrace/src/commands/consent.rs
use anyhow::Result;
use log::info;
use std::path::Path;

use crate::cli::ConsentCommand;
use crate::consent::{read_consent, telemetry_file_path, write_consent};

/// Shows or records the consent of the project at `project_dir`.
pub fn run_consent(cmd: &ConsentCommand, project_dir: &Path) -> Result<String> {
    let path = telemetry_file_path(project_dir);
    match cmd {
        ConsentCommand::Show => Ok(match read_consent(&path) {
            Some(true) => "consent: given".to_string(),
            Some(false) => "consent: refused".to_string(),
            None => "consent: not recorded".to_string(),
        }),
        ConsentCommand::Grant => {
            write_consent(&path, true)?;
            info!("Recorded consent in {}", path.display());
            Ok("You have opted into product usage analytics.".to_string())
        }
        ConsentCommand::Revoke => {
            write_consent(&path, false)?;
            info!("Recorded refusal in {}", path.display());
            Ok("You have opted out of product usage analytics.".to_string())
        }
    }
}
