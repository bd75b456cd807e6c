#![forbid(unsafe_code)]

//! Layout memoization.
//!
//! Geometry is a pure function of the container width and the registry, so
//! the cache keys on exactly those: the width's bit pattern (after
//! sanitizing) and the registry's process-unique version. Entries are shared
//! as `Arc` so hosts can hold a snapshot across frames.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use ptable_core::CellRegistry;
use rustc_hash::FxBuildHasher;

use crate::{GridGeometry, LayoutEngine};

/// Default number of widths kept.
pub const DEFAULT_LAYOUT_CACHE_CAPACITY: usize = 16;

/// Statistics about layout cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutCacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    pub capacity: usize,
}

impl LayoutCacheStats {
    /// Hit rate in `0.0..=1.0`.
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

type Key = (u64, u64);

/// LRU cache in front of a [`LayoutEngine`].
#[derive(Debug)]
pub struct LayoutCache {
    engine: LayoutEngine,
    cache: LruCache<Key, Arc<GridGeometry>, FxBuildHasher>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    /// Create a cache. A zero capacity is treated as one.
    #[must_use]
    pub fn new(engine: LayoutEngine, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            engine,
            cache: LruCache::with_hasher(capacity, FxBuildHasher),
            hits: 0,
            misses: 0,
        }
    }

    #[must_use]
    pub fn with_default_capacity(engine: LayoutEngine) -> Self {
        Self::new(engine, DEFAULT_LAYOUT_CACHE_CAPACITY)
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Cached geometry for `(width, registry)`, computing on a miss.
    pub fn get_or_compute(
        &mut self,
        container_width_px: f64,
        registry: &CellRegistry,
    ) -> Arc<GridGeometry> {
        let width = LayoutEngine::sanitize_width(container_width_px);
        let key = (width.to_bits(), registry.version());

        if let Some(geometry) = self.cache.get(&key) {
            self.hits += 1;
            return Arc::clone(geometry);
        }

        self.misses += 1;
        let geometry = Arc::new(self.engine.compute(width, registry));
        self.cache.put(key, Arc::clone(&geometry));
        geometry
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn stats(&self) -> LayoutCacheStats {
        LayoutCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }
}
