//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for cargo-workspace-mcp operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Errors raised while building or querying the workspace model.
///
/// These describe broken invariants in the metadata handed to the model, not
/// ordinary "not found" answers, which are always plain `Option`s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    /// A package received no origin during classification.
    #[error("origin is undefined for package '{package}'")]
    UndefinedOrigin { package: String },

    /// A crate name supplied by a caller contains characters cargo never emits.
    #[error(
        "invalid crate name '{name}': must contain only alphanumeric characters, hyphens, and underscores"
    )]
    InvalidCrateName { name: String },
}
