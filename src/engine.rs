//! The search entry point over one loaded catalog.

use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::format::{BasePath, DisplayRecord, LinkResolver, format_records};
use crate::search::{Hit, Query, collect_hits, rank_hits};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

type Memo = Mutex<LruCache<Vec<String>, Arc<[DisplayRecord]>>>;

/// Immutable catalog handle plus the query pipeline.
///
/// Results for a query depend only on its terms, so formatted records are
/// memoized per term sequence. A memo hit is indistinguishable from a fresh run.
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    links: Box<dyn LinkResolver>,
    max_results: usize,
    memo: Option<Memo>,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("repository", &self.catalog.repository_name)
            .field("max_results", &self.max_results)
            .field("memoized", &self.memo.as_ref().map(|m| lock(m).len()))
            .finish()
    }
}

fn lock(memo: &Memo) -> std::sync::MutexGuard<'_, LruCache<Vec<String>, Arc<[DisplayRecord]>>> {
    // The memo holds finished values only, so a poisoned lock is still consistent.
    memo.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SearchEngine {
    /// Create an engine that resolves links against `config.base_path`.
    pub fn new(catalog: Arc<Catalog>, config: &SearchConfig) -> Self {
        Self::with_resolver(catalog, config, BasePath::new(config.base_path.clone()))
    }

    /// Create an engine with a custom link resolver; `config.base_path` is ignored.
    pub fn with_resolver(
        catalog: Arc<Catalog>,
        config: &SearchConfig,
        links: impl LinkResolver + 'static,
    ) -> Self {
        Self {
            catalog,
            links: Box::new(links),
            max_results: config.max_results,
            memo: NonZeroUsize::new(config.cache_size).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Run a query and return its display records, best first.
    ///
    /// An empty or whitespace-only query returns no records.
    pub fn search(&self, raw: &str) -> Vec<DisplayRecord> {
        self.search_shared(raw).to_vec()
    }

    /// Like [`search`](Self::search), sharing the memoized records instead of cloning them.
    pub fn search_shared(&self, raw: &str) -> Arc<[DisplayRecord]> {
        let query = Query::parse(raw);
        if query.is_empty() {
            return Arc::from(Vec::new());
        }

        if let Some(memo) = &self.memo
            && let Some(records) = lock(memo).get(query.terms())
        {
            tracing::debug!("Memo hit for query {:?}", query.original());
            return records.clone();
        }

        let records: Arc<[DisplayRecord]> = self.run(&query).into();

        if let Some(memo) = &self.memo {
            lock(memo).put(query.terms().to_vec(), records.clone());
        }
        records
    }

    /// Ranked, filtered hits before truncation and formatting.
    pub fn ranked_hits(&self, raw: &str) -> Vec<Hit> {
        let query = Query::parse(raw);
        rank_hits(collect_hits(&self.catalog.program, &query), &query)
    }

    fn run(&self, query: &Query) -> Vec<DisplayRecord> {
        let started = Instant::now();
        let hits = collect_hits(&self.catalog.program, query);
        let collected = hits.len();
        let ranked = rank_hits(hits, query);
        let records = format_records(&ranked, query, self.max_results, self.links.as_ref());

        tracing::debug!(
            "Query {:?}: {} hits, {} after ranking, {} shown in {:?}",
            query.original(),
            collected,
            ranked.len(),
            records.len(),
            started.elapsed()
        );
        records
    }
}
