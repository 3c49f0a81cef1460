// cmdtrace/src/main.rs
//! cmdtrace entry point.
//!
//! Runs the telemetry hook against this binary's own command tree before clap
//! gets a chance to exit, so `--version`, help and usage errors are reported
//! too. Then dispatches the subcommand.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cmdtrace::cli::{Cli, Commands};
use cmdtrace::commands::{consent::run_consent, mask::run_mask, structure::run_structure};
use cmdtrace::{command_tree, logger, ProjectMetadata, SystemHooks};
use cmdtrace_core::TelemetryConfig;
use log::{warn, LevelFilter};

fn main() -> Result<()> {
    let command_args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = Cli::try_parse();

    match &parsed {
        Ok(cli) if cli.quiet => logger::init_logger(Some(LevelFilter::Off)),
        Ok(cli) if cli.debug => logger::init_logger(Some(LevelFilter::Debug)),
        _ => logger::init_logger(None),
    }

    let cli_ref = parsed.as_ref().ok();
    let config = load_config(cli_ref.and_then(|cli| cli.config.as_deref())).with_env_overrides();

    let project_dir = match cli_ref.and_then(|cli| cli.project_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };

    let tree = command_tree(&Cli::command());

    let metadata = ProjectMetadata::discover(&project_dir).unwrap_or_else(|e| {
        warn!("Could not read project metadata: {:#}", e);
        None
    });

    match SystemHooks::system(config.clone()) {
        Ok(hooks) => {
            hooks.before_command_run(metadata.as_ref(), &command_args, Some(&tree));
        }
        Err(e) => warn!("Telemetry disabled for this run: {}", e),
    }

    // Help, version and usage errors end here, after the hook has run.
    let cli = match parsed {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let output = match &cli.command {
        Commands::Mask(cmd) => run_mask(cmd, &tree, &config.program_name)?,
        Commands::Structure(cmd) => run_structure(cmd, &tree, &config.program_name)?,
        Commands::Consent(cmd) => run_consent(cmd, &project_dir)?,
    };
    println!("{}", output);

    Ok(())
}

/// Telemetry configuration never stops the host command: an unreadable file
/// falls back to the defaults.
fn load_config(path: Option<&Path>) -> TelemetryConfig {
    match path {
        Some(path) => TelemetryConfig::load_from_file(path).unwrap_or_else(|e| {
            warn!("Ignoring telemetry config {}: {:#}", path.display(), e);
            TelemetryConfig::default()
        }),
        None => TelemetryConfig::default(),
    }
}
