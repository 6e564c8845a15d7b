use crate::catalog::expand_tilde;
use crate::worker::CatalogState;
use rmcp::schemars;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadCatalogRequest {
    /// Path to a catalog file: `index.json` or the script form `search-index.js`
    pub path: String,
}

/// Load (or replace) the searched catalog.
pub async fn handle_load_catalog(
    state: &Arc<CatalogState>,
    request: LoadCatalogRequest,
) -> Result<String, String> {
    let path = PathBuf::from(expand_tilde(&request.path).into_owned());
    let stats = state
        .load(&path)
        .await
        .map_err(|e| format!("{:#}", e))?;

    Ok(format!(
        "Loaded catalog {}\n• {} types\n• {} methods\n• {} constants",
        path.display(),
        stats.types,
        stats.methods,
        stats.constants
    ))
}
