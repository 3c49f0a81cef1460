//! This file defines the command-line interface (CLI) for the cmdtrace application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "cmdtrace",
    version = env!("CARGO_PKG_VERSION"),
    about = "Privacy-preserving usage analytics for command-line tools",
    long_about = "cmdtrace reports which commands and options of a CLI are used without ever disclosing the values a user types. Arguments are masked against the CLI's own command vocabulary before anything leaves the machine, and nothing is sent until the user has opted in for the project.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Project directory holding the manifest and the `.telemetry` consent file.
    #[arg(long = "project-dir", value_name = "DIR", global = true, help = "Project directory (defaults to the current directory).")]
    pub project_dir: Option<PathBuf>,

    /// Path to a telemetry configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", global = true, env = "CMDTRACE_CONFIG", help = "Path to a telemetry configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `cmdtrace` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the masked form of the given arguments.
    #[command(about = "Print the masked form of the given arguments, as it would be reported.")]
    Mask(MaskCommand),

    /// Prints the flattened command structure of this CLI.
    #[command(about = "Print the flattened command structure of this CLI.")]
    Structure(StructureCommand),

    /// Inspects or records the telemetry consent of the project.
    #[command(subcommand, about = "Inspect or record the telemetry consent of the project.")]
    Consent(ConsentCommand),
}

/// Arguments for the `mask` command.
#[derive(Parser, Debug)]
pub struct MaskCommand {
    /// Use the syntax-only heuristic instead of this CLI's vocabulary.
    #[arg(long, help = "Mask by syntax alone, without the command vocabulary.")]
    pub heuristic: bool,

    /// The arguments to mask, as they would be typed after the program name.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the `structure` command.
#[derive(Parser, Debug)]
pub struct StructureCommand {
    /// Map each command to its rendered help text instead of its options.
    #[arg(long = "help-text", help = "Map each command to its help text instead of its options.")]
    pub help_text: bool,

    #[arg(long, value_enum, default_value = "json", help = "Output format.")]
    pub format: OutputFormat,
}

/// Subcommands for the `consent` command.
#[derive(Subcommand, Debug)]
pub enum ConsentCommand {
    #[command(about = "Show the recorded consent.")]
    Show,
    #[command(about = "Opt into usage analytics for this project.")]
    Grant,
    #[command(about = "Opt out of usage analytics for this project.")]
    Revoke,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}
