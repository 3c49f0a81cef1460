// cmdtrace/src/commands/mask.rs
use anyhow::Result;
use cmdtrace_core::{build_vocabulary, flatten_with_root, mask_heuristic, mask_with_vocabulary, CommandTree};
use log::debug;

use crate::cli::MaskCommand;

/// Masks `cmd.args` and returns the masked tokens joined by spaces.
pub fn run_mask(cmd: &MaskCommand, tree: &CommandTree, program_name: &str) -> Result<String> {
    let masked = if cmd.heuristic {
        mask_heuristic(&cmd.args)
    } else {
        let vocabulary = build_vocabulary(&flatten_with_root(tree, false, program_name));
        debug!("Masking {} argument(s) against {} known tokens.", cmd.args.len(), vocabulary.len());
        mask_with_vocabulary(&vocabulary, &cmd.args)
    };
    Ok(masked.join(" "))
}
