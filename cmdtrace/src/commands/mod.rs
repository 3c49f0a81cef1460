// cmdtrace/src/commands/mod.rs
pub mod consent;
pub mod mask;
pub mod structure;
