// cmdtrace/src/commands/structure.rs
use anyhow::{Context, Result};
use cmdtrace_core::{flatten_with_root, CommandTree};

use crate::cli::{OutputFormat, StructureCommand};

/// Renders the flattened structure of `tree` in the requested format.
pub fn run_structure(cmd: &StructureCommand, tree: &CommandTree, program_name: &str) -> Result<String> {
    let structure = flatten_with_root(tree, cmd.help_text, program_name);
    match cmd.format {
        OutputFormat::Json => serde_json::to_string_pretty(&structure).context("Failed to render structure as JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(&structure).context("Failed to render structure as YAML"),
    }
}
