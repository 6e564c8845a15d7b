use crate::catalog::expand_tilde;
use crate::config::{DEFAULT_CACHE_SIZE, SearchConfig};
use crate::format::MAX_RESULTS_DISPLAY;
use crate::tracing::LogFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Ranked search over a generated documentation catalog
#[derive(Debug, Parser)]
#[command(name = "catalog-search", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t, env = "CATALOG_SEARCH_LOG_FORMAT")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Catalog file to load (index.json or search-index.js)
    #[arg(long, global = true, env = "CATALOG_SEARCH_INDEX")]
    pub index: Option<String>,

    /// Prefix joined onto every result link
    #[arg(long, global = true, default_value = "", env = "CATALOG_SEARCH_BASE_PATH")]
    pub base_path: String,

    /// Maximum number of results per query
    #[arg(long, global = true, default_value_t = MAX_RESULTS_DISPLAY, env = "CATALOG_SEARCH_MAX_RESULTS")]
    pub max_results: usize,

    /// Number of memoized queries (0 disables the memo)
    #[arg(long, global = true, default_value_t = DEFAULT_CACHE_SIZE, env = "CATALOG_SEARCH_CACHE_SIZE")]
    pub cache_size: usize,
}

impl CatalogArgs {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            base_path: self.base_path.clone(),
            max_results: self.max_results,
            cache_size: self.cache_size,
        }
    }

    /// The catalog path with a leading `~` expanded.
    pub fn index_path(&self) -> Option<PathBuf> {
        self.index
            .as_deref()
            .map(|index| PathBuf::from(expand_tilde(index).into_owned()))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the catalog over MCP on stdio
    Serve,
    /// Run one query and print the results
    Query {
        /// Query terms
        #[arg(required = true)]
        terms: Vec<String>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
        /// Print at most this many results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}
