//! MCP server exposing catalog search as tools.

use crate::config::SearchConfig;
use crate::schema::inline_schema_for_type;
use crate::tools::{
    LoadCatalogRequest, SearchRequest, handle_catalog_info, handle_load_catalog, handle_search,
};
use crate::worker::CatalogState;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for documentation catalog queries
#[derive(Clone)]
pub struct CatalogServer {
    /// Shared catalog state (load status and search engine)
    state: Arc<CatalogState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for CatalogServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl CatalogServer {
    /// Create a server with no catalog loaded.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_state(Arc::new(CatalogState::new(config)))
    }

    /// Create a server around existing state, e.g. one with a load already in flight.
    pub fn with_state(state: Arc<CatalogState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    pub fn catalog_state(&self) -> &Arc<CatalogState> {
        &self.state
    }

    #[tool(
        description = "Load a documentation catalog (index.json, or the search-index.js script form) and make it the catalog that search queries run against. Replaces any previously loaded catalog."
    )]
    async fn load_catalog(
        &self,
        Parameters(request): Parameters<LoadCatalogRequest>,
    ) -> std::result::Result<String, String> {
        handle_load_catalog(&self.state, request).await
    }

    #[tool(
        description = "Search the loaded catalog for types, methods, constructors, macros and constants. An entity is returned when any space-separated term matches its name, a namespace segment, an argument name or its owner's documentation. Results are ranked with types first, then by where the terms appear in names, then by how many distinct terms matched.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).await
    }

    #[tool(description = "Show which catalog is loaded, its load status and entity counts.")]
    async fn catalog_info(&self) -> std::result::Result<String, String> {
        Ok(handle_catalog_info(&self.state))
    }
}

#[tool_handler]
impl ServerHandler for CatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "catalog-search: ranked search over a generated documentation catalog. \
                 Use load_catalog with an index.json path unless one was given at startup, \
                 then search with terms such as 'map', '#each', '.new' or 'HTTP::Client'."
                    .to_string(),
            )
    }
}
