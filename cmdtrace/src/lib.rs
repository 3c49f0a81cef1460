// cmdtrace/src/lib.rs
//! # cmdtrace
//!
//! The collaborator side of cmdtrace: everything around the masking core that
//! touches the outside world. It adapts a `clap` command into the core's
//! command tree, keeps the per-project consent file, formats and hashes the
//! analytics event and delivers it over HTTP from the `before_command_run`
//! hook. A host CLI calls [`hooks::TelemetryHooks::before_command_run`] once
//! before dispatching.

pub mod cli;
pub mod commands;
pub mod consent;
pub mod errors;
pub mod event;
pub mod heap;
pub mod hooks;
pub mod host;
pub mod identity;
pub mod logger;
pub mod metadata;

pub use hooks::{HookOutcome, SystemHooks, TelemetryHooks};
pub use host::command_tree;
pub use metadata::ProjectMetadata;
