//! errors.rs - Custom error types for the cmdtrace-core library.
//!
//! Masking itself never fails: unknown tokens degrade to the redaction sentinel.
//! The variants here cover the input-validation boundary only, i.e. structure
//! documents handed to the library from outside. Configuration loading reports
//! through `anyhow` with context instead.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by the `cmdtrace-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// A structure document contained a value that is neither a mapping,
    /// a string nor null.
    #[error("Invalid command structure: {0}")]
    InvalidStructure(String),
}
