#![forbid(unsafe_code)]

//! LRU suggestion cache.
//!
//! Ranking is a pure function of the normalized query and the index (its
//! registry, category filter, and cap), so entries are keyed by `(index id,
//! normalized query)`. Raw queries differing only in case, accents, or
//! surrounding whitespace share an entry.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use rustc_hash::FxBuildHasher;

use crate::normalize::normalize;
use crate::search::{SearchIndex, Suggestion};

/// Default cache capacity.
pub const DEFAULT_SEARCH_CACHE_CAPACITY: usize = 128;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Memoized [`SearchIndex::rank`].
#[derive(Debug)]
pub struct SuggestionCache {
    cache: LruCache<(u64, String), Arc<[Suggestion]>, FxBuildHasher>,
    hits: u64,
    misses: u64,
}

impl SuggestionCache {
    /// Create a cache. A zero capacity is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::with_hasher(capacity, FxBuildHasher),
            hits: 0,
            misses: 0,
        }
    }

    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_SEARCH_CACHE_CAPACITY)
    }

    /// Cached suggestions for `query`, ranking on a miss.
    ///
    /// Empty queries short-circuit without touching the cache.
    pub fn get_or_rank(&mut self, index: &SearchIndex, query: &str) -> Arc<[Suggestion]> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return Arc::from(Vec::new());
        }

        let key = (index.id(), normalized);
        if let Some(hit) = self.cache.get(&key) {
            self.hits += 1;
            return Arc::clone(hit);
        }

        self.misses += 1;
        let ranked: Arc<[Suggestion]> = index.rank_normalized(&key.1).into();
        self.cache.put(key, Arc::clone(&ranked));
        ranked
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
