//! Ranked free-text search over a pre-built documentation catalog.
//!
//! A [`Catalog`] is a tree of documented types with their methods, constants
//! and nested types. [`SearchEngine::search`] parses a query, walks the tree,
//! ranks the matches and returns display-ready [`DisplayRecord`]s.
//! [`CatalogState`] wraps an engine for servers that load their catalog in the
//! background, and [`server::CatalogServer`] exposes it over MCP.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod schema;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;
pub mod worker;

pub use catalog::{Catalog, CatalogStats, load_catalog};
pub use config::SearchConfig;
pub use engine::SearchEngine;
pub use error::{LoadError, SearchError};
pub use format::{BasePath, DisplayRecord, LinkResolver};
pub use search::{Hit, HitKind, MatchedField, Query};
pub use worker::{CatalogState, CatalogStatus};
