//! Catalog loading from disk.
//!
//! Two serialized forms exist: a plain JSON document (`index.json`) and a
//! script form (`search-index.js`) that wraps the same JSON in a callback
//! invocation so pages opened from `file://` can load it without a request.

use super::types::Catalog;
use crate::error::LoadError;
use std::borrow::Cow;
use std::path::Path;

impl Catalog {
    /// Parse a catalog from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a catalog from its script form, e.g. `callback({...});`.
    pub fn from_script_str(script: &str) -> Result<Self, LoadError> {
        Self::from_json_str(unwrap_callback(script)?)
    }

    /// Parse either form, deciding by content rather than file name.
    pub fn from_any_str(source: &str) -> Result<Self, LoadError> {
        if source.trim_start().starts_with('{') {
            Self::from_json_str(source)
        } else {
            Self::from_script_str(source)
        }
    }
}

/// Extract the JSON payload between the first `(` and the last `)`.
fn unwrap_callback(script: &str) -> Result<&str, LoadError> {
    let start = script.find('(').ok_or(LoadError::MissingWrapper)?;
    let end = script.rfind(')').ok_or(LoadError::MissingWrapper)?;
    if end <= start {
        return Err(LoadError::MissingWrapper);
    }
    Ok(&script[start + 1..end])
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let start = std::time::Instant::now();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = Catalog::from_any_str(&source)?;

    let stats = catalog.stats();
    tracing::info!(
        "Loaded catalog from {}: {} types, {} methods, {} constants in {:?}",
        path.display(),
        stats.types,
        stats.methods,
        stats.constants,
        start.elapsed()
    );

    Ok(catalog)
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
