// cmdtrace/src/host.rs
//! Adapts a `clap::Command` hierarchy into a [`CommandTree`].
//!
//! A clap command with subcommands becomes a [`Group`]; a leaf becomes a
//! [`Command`] carrying every `-s`/`--long` spelling of its arguments
//! (aliases included) and its help text rendered by clap itself.

use clap::Command as ClapCommand;
use cmdtrace_core::{Command, CommandTree, Group};
use log::debug;

/// Help template that puts the usage line first.
const USAGE_FIRST_TEMPLATE: &str = "{usage-heading} {usage}\n\n{all-args}{after-help}";

/// Builds a [`CommandTree`] from a clap command.
///
/// The command is built on a copy first, so clap's generated `help`
/// subcommand, `-h/--help`, `-V/--version` and propagated global arguments
/// all show up exactly as the parser would accept them.
pub fn command_tree(root: &ClapCommand) -> CommandTree {
    let mut root = root.clone();
    root.build();
    let tree = adapt(&root);
    debug!("Adapted clap command '{}' into a command tree.", root.get_name());
    tree
}

fn adapt(cmd: &ClapCommand) -> CommandTree {
    if cmd.has_subcommands() {
        let mut group = Group::new(cmd.get_name());
        for sub in cmd.get_subcommands() {
            group.add_child(adapt(sub));
        }
        group.into()
    } else {
        Command::new(cmd.get_name())
            .with_options(option_strings(cmd))
            .with_help(render_help(cmd))
            .into()
    }
}

fn option_strings(cmd: &ClapCommand) -> Vec<String> {
    let mut options = Vec::new();
    for arg in cmd.get_arguments().filter(|a| !a.is_positional()) {
        let shorts = arg.get_short().into_iter().chain(arg.get_all_short_aliases().unwrap_or_default());
        options.extend(shorts.map(|s| format!("-{}", s)));

        let longs = arg.get_long().into_iter().chain(arg.get_all_aliases().unwrap_or_default());
        options.extend(longs.map(|l| format!("--{}", l)));
    }
    options
}

fn render_help(cmd: &ClapCommand) -> String {
    let mut cmd = cmd.clone().help_template(USAGE_FIRST_TEMPLATE);
    cmd.render_help().to_string()
}
