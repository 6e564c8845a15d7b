//! Shared catalog state and background loading.
//!
//! A server starts before its catalog is available. [`CatalogState`] tracks
//! the load lifecycle so that callers can tell "not loaded yet" apart from
//! "no matches", and can wait for an in-flight load instead of failing.

use crate::catalog::{CatalogStats, load_catalog};
use crate::config::SearchConfig;
use crate::engine::SearchEngine;
use crate::error::{Result, SearchError};
use crate::format::DisplayRecord;
use anyhow::Context as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Where the catalog is in its load lifecycle.
#[derive(Debug, Clone)]
pub enum CatalogStatus {
    /// Nothing has been requested yet.
    Empty,
    Loading { path: PathBuf },
    Ready {
        path: PathBuf,
        engine: Arc<SearchEngine>,
    },
    Failed { path: PathBuf, error: String },
}

impl CatalogStatus {
    fn is_settled(&self) -> bool {
        matches!(self, Self::Ready { .. } | Self::Failed { .. })
    }

    fn engine(&self) -> std::result::Result<Arc<SearchEngine>, SearchError> {
        match self {
            Self::Ready { engine, .. } => Ok(engine.clone()),
            Self::Failed { error, .. } => Err(SearchError::LoadFailed(error.clone())),
            Self::Empty | Self::Loading { .. } => Err(SearchError::NotReady),
        }
    }
}

/// Holder of the current search engine, shared between tool handlers.
#[derive(Debug)]
pub struct CatalogState {
    config: SearchConfig,
    status: watch::Sender<CatalogStatus>,
    /// Bumped by every load; only the latest load may settle the status.
    generation: AtomicU64,
}

impl CatalogState {
    pub fn new(config: SearchConfig) -> Self {
        let (status, _) = watch::channel(CatalogStatus::Empty);
        Self {
            config,
            status,
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Snapshot of the current load status.
    pub fn status(&self) -> CatalogStatus {
        self.status.borrow().clone()
    }

    /// The loaded engine, or why there is none.
    pub fn engine(&self) -> std::result::Result<Arc<SearchEngine>, SearchError> {
        self.status.borrow().engine()
    }

    /// Search the loaded catalog without waiting.
    ///
    /// Returns [`SearchError::NotReady`] while no catalog is loaded, which is
    /// distinct from an empty result.
    pub fn search(&self, raw: &str) -> std::result::Result<Vec<DisplayRecord>, SearchError> {
        Ok(self.engine()?.search(raw))
    }

    /// Search once the current load settles.
    ///
    /// Waits for an in-flight (or future) load to finish. If no load is ever
    /// started this does not return, so callers that cannot wait indefinitely
    /// should check [`status`](Self::status) first.
    pub async fn search_when_ready(
        &self,
        raw: &str,
    ) -> std::result::Result<Vec<DisplayRecord>, SearchError> {
        let mut rx = self.status.subscribe();
        let engine = rx
            .wait_for(CatalogStatus::is_settled)
            .await
            .map_err(|_| SearchError::NotReady)?
            .engine()?;
        Ok(engine.search(raw))
    }

    /// Load a catalog file and make it the searched catalog.
    ///
    /// Parsing runs on the blocking pool. Searches issued meanwhile report
    /// not-ready or wait, depending on the method used. When loads overlap,
    /// the most recently started one decides the status.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<CatalogStats> {
        let path = path.as_ref().to_path_buf();
        let generation = self.begin_load(&path);
        tracing::debug!("Loading catalog from {} (load {})", path.display(), generation);

        let task_path = path.clone();
        let loaded = tokio::task::spawn_blocking(move || load_catalog(&task_path))
            .await
            .context("Catalog load task failed")
            .and_then(|result| result.map_err(anyhow::Error::from));

        match loaded {
            Ok(catalog) => {
                let stats = catalog.stats();
                let engine = SearchEngine::new(Arc::new(catalog), &self.config);
                self.settle(
                    generation,
                    CatalogStatus::Ready {
                        path,
                        engine: Arc::new(engine),
                    },
                );
                Ok(stats)
            }
            Err(e) => {
                self.settle(
                    generation,
                    CatalogStatus::Failed {
                        path: path.clone(),
                        error: format!("{:#}", e),
                    },
                );
                Err(e).with_context(|| format!("Failed to load catalog {}", path.display()))
            }
        }
    }

    fn begin_load(&self, path: &Path) -> u64 {
        let mut generation = 0;
        self.status.send_modify(|status| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *status = CatalogStatus::Loading {
                path: path.to_path_buf(),
            };
        });
        generation
    }

    /// Publish the outcome of load `generation` unless a newer load has started.
    fn settle(&self, generation: u64, outcome: CatalogStatus) -> bool {
        let published = self.status.send_if_modified(|status| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *status = outcome;
            true
        });
        if !published {
            tracing::debug!("Discarding outcome of superseded load {}", generation);
        }
        published
    }
}

/// Start loading a catalog in the background.
///
/// Failures are logged and recorded in the state; the returned handle can be
/// awaited but need not be.
pub fn spawn_catalog_load(state: Arc<CatalogState>, path: PathBuf) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match state.load(&path).await {
            Ok(stats) => tracing::info!(
                "Background load of {} finished ({} types)",
                path.display(),
                stats.types
            ),
            Err(e) => tracing::warn!("Background catalog load failed: {:#}", e),
        }
    })
}
