//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for application-level operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the binary and tool handlers.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading a catalog fails.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catalog document is not valid JSON or does not match the catalog shape.
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// A script-form catalog did not contain a `callback({...})` invocation.
    #[error("Script catalog has no callback wrapper around the JSON payload")]
    MissingWrapper,
}

/// Error returned by a search request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// No catalog has been loaded yet. Callers should retry once one is available.
    #[error("Search catalog is not loaded yet")]
    NotReady,
    /// The catalog failed to load, so no search can run until a new load succeeds.
    #[error("Search catalog failed to load: {0}")]
    LoadFailed(String),
}
