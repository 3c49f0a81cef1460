// cmdtrace/src/logger.rs
//! Logger initialisation for the `cmdtrace` binary and embedding hosts.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialises `env_logger` writing to stderr.
///
/// With `None` the level comes from `RUST_LOG` (default `warn`). An explicit
/// level overrides `RUST_LOG`. Calling this more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr);
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
