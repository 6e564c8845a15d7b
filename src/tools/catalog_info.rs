use crate::worker::{CatalogState, CatalogStatus};
use std::fmt::Write as _;

/// Describe the current catalog and its load status.
pub fn handle_catalog_info(state: &CatalogState) -> String {
    match state.status() {
        CatalogStatus::Empty => "No catalog loaded. Use load_catalog to load one.".to_string(),
        CatalogStatus::Loading { path } => {
            format!("Catalog {} is loading; searches will wait for it.", path.display())
        }
        CatalogStatus::Failed { path, error } => {
            format!("Catalog {} failed to load: {}", path.display(), error)
        }
        CatalogStatus::Ready { path, engine } => {
            let catalog = engine.catalog();
            let stats = catalog.stats();
            let config = state.config();

            let mut output = format!("Catalog: {}\n", path.display());
            if !catalog.repository_name.is_empty() {
                let _ = writeln!(output, "Repository: {}", catalog.repository_name);
            }
            let _ = writeln!(
                output,
                "Entities: {} types, {} methods, {} constants",
                stats.types, stats.methods, stats.constants
            );
            let _ = writeln!(output, "Max results: {}", config.max_results);
            if !config.base_path.is_empty() {
                let _ = writeln!(output, "Base path: {}", config.base_path);
            }
            output
        }
    }
}
