use anyhow::{Context as _, Result, anyhow};
use catalog_search::cli::{Cli, Command};
use catalog_search::format::render_text;
use catalog_search::server::CatalogServer;
use catalog_search::worker::{CatalogState, spawn_catalog_load};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the MCP protocol or query output
    catalog_search::tracing::init_with(cli.log_format);

    let state = Arc::new(CatalogState::new(cli.catalog.search_config()));

    match cli.command {
        Command::Serve => serve(state, cli.catalog.index_path()).await,
        Command::Query { terms, json, limit } => {
            let index = cli
                .catalog
                .index_path()
                .ok_or_else(|| anyhow!("No catalog given. Pass --index or set CATALOG_SEARCH_INDEX."))?;
            state.load(&index).await?;

            let mut records = state
                .search(&terms.join(" "))
                .context("Catalog is not searchable")?;
            if let Some(limit) = limit {
                records.truncate(limit);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                eprintln!("No results found for '{}'.", terms.join(" "));
            } else {
                print!("{}", render_text(&records));
            }
            Ok(())
        }
    }
}

async fn serve(state: Arc<CatalogState>, index: Option<std::path::PathBuf>) -> Result<()> {
    tracing::info!("Starting catalog-search MCP server");

    if let Some(index) = index {
        spawn_catalog_load(state.clone(), index);
    }

    let server = CatalogServer::with_state(state);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
