//! Search engine configuration.

use crate::format::MAX_RESULTS_DISPLAY;

/// Default number of memoized queries per engine.
pub const DEFAULT_CACHE_SIZE: usize = 64;

/// Settings shared by every search against one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Prefix joined onto every stored link to form a navigable address.
    pub base_path: String,
    /// Maximum number of records returned for one query.
    pub max_results: usize,
    /// Number of queries whose formatted results are memoized. `0` disables the memo.
    pub cache_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            max_results: MAX_RESULTS_DISPLAY,
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}
