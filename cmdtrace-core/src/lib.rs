// cmdtrace-core/src/lib.rs
//! # cmdtrace Core Library
//!
//! `cmdtrace-core` provides the platform-independent logic behind cmdtrace's
//! usage analytics: it turns a host CLI's command hierarchy into a vocabulary
//! of known tokens and uses it to redact the arguments a user typed before
//! anything is reported.
//!
//! The library performs no I/O on the masking path. Tree, structure,
//! vocabulary and masked output are rebuilt for every invocation.
//!
//! ## Modules
//!
//! * `tree`: The abstract [`CommandTree`] received from the host framework.
//! * `structure`: Flattens a tree into a nested [`StructureMap`].
//! * `vocabulary`: Builds the [`Vocabulary`] of safe tokens from a structure.
//! * `masking`: The vocabulary-based and the syntax-only argument maskers.
//! * `identity`: SHA-512 hashing of identifying fields.
//! * `config`: Contract constants and [`TelemetryConfig`].
//! * `errors`: The [`CoreError`] type for input validation.
//!
//! ## Usage Example
//!
//! ```rust
//! use cmdtrace_core::{flatten, build_vocabulary, mask_with_vocabulary, Command, Group, MASK};
//!
//! let tree = Group::unnamed()
//!     .with_child(Command::new("run").with_options(["-p", "--pipeline"]))
//!     .into();
//!
//! let vocabulary = build_vocabulary(&flatten(&tree, false));
//! let masked = mask_with_vocabulary(&vocabulary, &["run", "--pipeline=secret_pipe"]);
//! assert_eq!(masked, vec!["run", "--pipeline", MASK]);
//! ```
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod errors;
pub mod identity;
pub mod masking;
pub mod structure;
pub mod tree;
pub mod vocabulary;

/// Re-exports the contract constants and runtime configuration.
pub use config::{
    TelemetryConfig,
    APP_ID_ENV,
    DEFAULT_ROOT_NAME,
    ENDPOINT_ENV,
    HEAP_APPID_PROD,
    HEAP_ENDPOINT,
};

pub use errors::CoreError;

pub use identity::hash_identity;

/// Re-exports both maskers and the redaction sentinel.
pub use masking::{mask_cli, mask_heuristic, mask_with_vocabulary, MASK};

pub use structure::{
    flatten,
    flatten_with_root,
    recursive_items,
    structure_from_json,
    structure_from_value,
    structure_from_yaml,
    StructureMap,
    StructureNode,
};

pub use tree::{Command, CommandTree, Group};

pub use vocabulary::{build_vocabulary, Vocabulary, SEED_TOKENS};
