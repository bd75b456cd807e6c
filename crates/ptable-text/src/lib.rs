#![forbid(unsafe_code)]

//! Text handling for the periodic catalog.
//!
//! - [`normalize()`] - case and diacritic folding for search keys
//! - [`SearchIndex`] - ranked, capped product suggestions
//! - [`SuggestionCache`] - LRU memo over ranked suggestions
//! - [`symbol_segments`] - text/subscript runs for chemical symbols
//!
//! # Example
//! ```
//! use ptable_core::sample;
//! use ptable_text::{SearchIndex, SuggestionCache, normalize};
//!
//! assert_eq!(normalize("Ácido Sulfúrico"), normalize("acido sulfurico"));
//!
//! let catalog = sample::catalog().unwrap();
//! let index = SearchIndex::for_catalog(&catalog, 7);
//! let mut cache = SuggestionCache::new(64);
//!
//! let top = cache.get_or_rank(&index, "sulf");
//! assert_eq!(top[0].label, "Ácido Sulfúrico");
//! ```

pub mod cache;
pub mod normalize;
pub mod search;
pub mod segments;

pub use cache::{CacheStats, DEFAULT_SEARCH_CACHE_CAPACITY, SuggestionCache};
pub use normalize::normalize;
pub use search::{DEFAULT_MAX_SUGGESTIONS, MatchEvidence, PickHandle, SearchIndex, Suggestion};
pub use segments::{SymbolRun, SymbolRuns, symbol_segments};
