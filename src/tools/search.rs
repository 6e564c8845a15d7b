//! Search handler for the loaded catalog.

use crate::format::{DisplayRecord, render_text};
use crate::worker::{CatalogState, CatalogStatus};
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Output format for search results.
///
/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search terms separated by spaces. Prefix a term with `#` for instance
    /// methods, `.` for class methods, constructors and macros, or use `::`
    /// to match namespace segments (e.g. `HTTP::Client`, `Client:`).
    pub query: String,
    /// Maximum number of results to return (default: all displayed results)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Output format: text (default) or json
    #[serde(default)]
    pub format: OutputFormat,
}

/// Run a search, waiting for an in-flight catalog load if there is one.
pub async fn handle_search(
    state: &Arc<CatalogState>,
    request: SearchRequest,
) -> Result<String, String> {
    if let CatalogStatus::Empty = state.status() {
        return Err("No catalog loaded.\n\n\
             Use load_catalog with the path to an index.json or search-index.js file."
            .to_string());
    }

    let mut records = state
        .search_when_ready(&request.query)
        .await
        .map_err(|e| e.to_string())?;
    let total = records.len();
    if let Some(limit) = request.limit {
        records.truncate(limit);
    }

    match request.format {
        OutputFormat::Json => serde_json::to_string_pretty(&records)
            .map_err(|e| format!("Failed to serialize results: {}", e)),
        OutputFormat::Text => Ok(format_search_results(&records, total, &request.query)),
    }
}

fn format_search_results(records: &[DisplayRecord], total: usize, query: &str) -> String {
    if records.is_empty() {
        let mut msg = format!("No results found for '{}'.\n\n", query);
        msg.push_str("Search tips:\n");
        msg.push_str("• Terms match names, argument names, and documentation text\n");
        msg.push_str("• Use '#name' for instance methods and '.name' for class methods\n");
        msg.push_str("• Use 'Outer::Inner' or 'Inner:' to match namespace segments\n");
        return msg;
    }

    let mut output = if records.len() < total {
        format!(
            "Search results for '{}' ({} of {}):\n\n",
            query,
            records.len(),
            total
        )
    } else {
        format!("Search results for '{}':\n\n", query)
    };
    output.push_str(&render_text(records));
    output
}
