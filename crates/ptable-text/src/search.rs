#![forbid(unsafe_code)]

//! Ranked product search.
//!
//! A [`SearchIndex`] pre-normalizes every searchable cell once, so ranking a
//! query is a linear scan over short strings. A cell qualifies when its
//! `"{symbol} {name} {meta}"` key contains the query; qualifying cells are
//! scored by where the query matched:
//!
//! | Evidence          | Bonus |
//! |-------------------|-------|
//! | symbol prefix     | +4    |
//! | name prefix       | +3    |
//! | symbol substring  | +2    |
//! | name substring    | +1    |
//!
//! Results are sorted by score (stable, so ties keep registry order) and
//! capped.
//!
//! # Example
//! ```
//! use ptable_core::{Cell, CellRegistry, CategoryRegistry};
//! use ptable_text::SearchIndex;
//!
//! let cells = CellRegistry::new(vec![
//!     Cell::product(2, 2, "An", "Analina", "bg-[#8EACCD]"),
//!     Cell::product(2, 3, "Na", "Sodio", "bg-[#90C3F9]"),
//! ])
//! .unwrap();
//! let index = SearchIndex::new(&cells, &CategoryRegistry::default(), 7);
//!
//! let ranked = index.rank("na");
//! assert_eq!(ranked[0].label, "Sodio");
//! assert_eq!(ranked[1].label, "Analina");
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use ptable_core::{Catalog, CategoryRegistry, Cell, CellId, CellRegistry};
use serde::Serialize;

use crate::normalize::normalize;

/// Default cap on returned suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 7;

bitflags! {
    /// Which bonuses fired for a suggestion.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct MatchEvidence: u8 {
        const SYMBOL_PREFIX   = 0b0001;
        const NAME_PREFIX     = 0b0010;
        const SYMBOL_CONTAINS = 0b0100;
        const NAME_CONTAINS   = 0b1000;
    }
}

impl MatchEvidence {
    /// Additive score of the fired bonuses.
    #[must_use]
    pub fn score(self) -> u8 {
        let mut score = 0;
        if self.contains(Self::SYMBOL_PREFIX) {
            score += 4;
        }
        if self.contains(Self::NAME_PREFIX) {
            score += 3;
        }
        if self.contains(Self::SYMBOL_CONTAINS) {
            score += 2;
        }
        if self.contains(Self::NAME_CONTAINS) {
            score += 1;
        }
        score
    }
}

/// Opaque reference from a suggestion back to its cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PickHandle(CellId);

impl PickHandle {
    /// The cell this handle resolves to.
    #[inline]
    pub fn cell_id(&self) -> &CellId {
        &self.0
    }

    #[inline]
    pub fn into_cell_id(self) -> CellId {
        self.0
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub handle: PickHandle,
    /// Name when present, otherwise the symbol.
    pub label: String,
    /// Symbol when the label is a name, otherwise the meta badge.
    pub detail: Option<String>,
    pub score: u8,
    pub evidence: MatchEvidence,
}

#[derive(Debug, Clone)]
struct Entry {
    id: CellId,
    symbol: String,
    name: String,
    haystack: String,
    label: String,
    detail: Option<String>,
}

impl Entry {
    fn from_cell(cell: &Cell) -> Self {
        let symbol = if cell.symbol.is_empty() {
            cell.id.tag()
        } else {
            cell.symbol.as_str()
        };
        let name = cell.name().unwrap_or("");
        let meta = cell.meta().unwrap_or("");

        let (label, detail) = match cell.name() {
            Some(name) => (name.to_string(), Some(symbol.to_string())),
            None => (symbol.to_string(), cell.meta().map(str::to_string)),
        };

        Self {
            id: cell.id.clone(),
            symbol: normalize(symbol),
            name: normalize(name),
            haystack: normalize(&format!("{symbol} {name} {meta}")),
            label,
            detail,
        }
    }

    fn evidence(&self, query: &str) -> Option<MatchEvidence> {
        if !self.haystack.contains(query) {
            return None;
        }
        let mut evidence = MatchEvidence::empty();
        evidence.set(MatchEvidence::SYMBOL_PREFIX, self.symbol.starts_with(query));
        evidence.set(MatchEvidence::NAME_PREFIX, self.name.starts_with(query));
        evidence.set(MatchEvidence::SYMBOL_CONTAINS, self.symbol.contains(query));
        evidence.set(MatchEvidence::NAME_CONTAINS, self.name.contains(query));
        Some(evidence)
    }

    fn suggestion(&self, evidence: MatchEvidence) -> Suggestion {
        Suggestion {
            handle: PickHandle(self.id.clone()),
            label: self.label.clone(),
            detail: self.detail.clone(),
            score: evidence.score(),
            evidence,
        }
    }
}

static NEXT_INDEX_ID: AtomicU64 = AtomicU64::new(1);

/// Pre-normalized search keys for one cell registry.
///
/// Every constructed index gets a process-unique [`id`](Self::id); clones
/// share it because they rank identically.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<Entry>,
    max_suggestions: usize,
    version: u64,
    id: u64,
}

impl SearchIndex {
    /// Index the searchable cells of `cells` (spacers and category headers
    /// excluded), keeping at most `max_suggestions` results per query.
    pub fn new(cells: &CellRegistry, categories: &CategoryRegistry, max_suggestions: usize) -> Self {
        let entries: Vec<Entry> = cells
            .product_cells(categories)
            .map(Entry::from_cell)
            .collect();
        tracing::debug!(
            entries = entries.len(),
            version = cells.version(),
            "search index built"
        );
        Self {
            entries,
            max_suggestions: max_suggestions.max(1),
            version: cells.version(),
            id: NEXT_INDEX_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn for_catalog(catalog: &Catalog, max_suggestions: usize) -> Self {
        Self::new(&catalog.cells, &catalog.categories, max_suggestions)
    }

    /// Version of the registry this index was built from.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Identity of this index: registry, category filter, and cap together.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank cells against a raw query.
    ///
    /// An empty query (after normalization) yields no suggestions.
    #[must_use]
    pub fn rank(&self, query: &str) -> Vec<Suggestion> {
        self.rank_normalized(&normalize(query))
    }

    /// Rank against an already normalized query.
    #[must_use]
    pub fn rank_normalized(&self, query: &str) -> Vec<Suggestion> {
        if query.is_empty() {
            return Vec::new();
        }
        let _span = tracing::trace_span!("search_rank", query_len = query.len()).entered();

        let mut scored: Vec<(&Entry, MatchEvidence)> = self
            .entries
            .iter()
            .filter_map(|entry| entry.evidence(query).map(|ev| (entry, ev)))
            .collect();
        // `sort_by` is stable: equal scores keep registry order.
        scored.sort_by(|a, b| b.1.score().cmp(&a.1.score()));
        scored.truncate(self.max_suggestions);

        tracing::trace!(results = scored.len(), "ranked");
        scored
            .into_iter()
            .map(|(entry, evidence)| entry.suggestion(evidence))
            .collect()
    }

    /// Top-ranked suggestion, if any.
    #[must_use]
    pub fn top(&self, query: &str) -> Option<Suggestion> {
        self.rank(query).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptable_core::sample;

    fn index(cells: Vec<Cell>) -> SearchIndex {
        let reg = CellRegistry::new(cells).unwrap();
        SearchIndex::new(&reg, &CategoryRegistry::builtin(), DEFAULT_MAX_SUGGESTIONS)
    }

    #[test]
    fn empty_query_yields_nothing() {
        let idx = index(vec![Cell::product(2, 2, "Na", "Sodio", "x")]);
        assert!(idx.rank("").is_empty());
        assert!(idx.rank("   ").is_empty());
    }

    #[test]
    fn symbol_prefix_dominates() {
        let idx = index(vec![
            Cell::product(2, 2, "An", "Analina", "x"),
            Cell::product(2, 3, "Na", "Sodio", "x"),
        ]);
        let ranked = idx.rank("na");
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].label, "Sodio");
        assert_eq!(ranked[0].score, 6);
        assert_eq!(
            ranked[0].evidence,
            MatchEvidence::SYMBOL_PREFIX | MatchEvidence::SYMBOL_CONTAINS
        );
        assert_eq!(ranked[1].label, "Analina");
        assert_eq!(ranked[1].score, 1);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn ties_keep_registry_order() {
        let idx = index(vec![
            Cell::product(2, 2, "B", "Zeta acida", "x"),
            Cell::product(2, 3, "C", "Beta acida", "x"),
            Cell::product(2, 4, "D", "Gamma acida", "x"),
        ]);
        let labels: Vec<_> = idx.rank("acida").into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Zeta acida", "Beta acida", "Gamma acida"]);
    }

    #[test]
    fn accent_insensitive_on_both_sides() {
        let idx = index(vec![Cell::product(2, 2, "HCl", "Ácido Clorhídrico", "x")]);
        assert_eq!(idx.rank("acido clorh").len(), 1);
        assert_eq!(idx.rank("ÁCIDO").len(), 1);
    }

    #[test]
    fn meta_only_match_scores_zero_but_qualifies() {
        let idx = index(vec![
            Cell::product(2, 2, "NaOH", "Soda Cáustica", "x").with_meta("Escamas"),
        ]);
        let ranked = idx.rank("escamas");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 0);
        assert!(ranked[0].evidence.is_empty());
    }

    #[test]
    fn capped_at_max() {
        let cells = (0..12)
            .map(|i| Cell::product(2, 2 + i, format!("X{i}"), format!("Sal {i}"), "x"))
            .collect();
        let ranked = index(cells).rank("sal");
        assert_eq!(ranked.len(), DEFAULT_MAX_SUGGESTIONS);
        assert_eq!(ranked[0].label, "Sal 0");
    }

    #[test]
    fn labels_and_details() {
        let reg = CellRegistry::new(vec![
            Cell::product(2, 2, "NaCl", "Cloruro de Sodio", "x"),
            Cell::header(2, 3, "Misc", "x").with_meta("varios"),
        ])
        .unwrap();
        let idx = SearchIndex::new(&reg, &CategoryRegistry::builtin(), 7);
        let named = idx.top("nacl").unwrap();
        assert_eq!(named.label, "Cloruro de Sodio");
        assert_eq!(named.detail.as_deref(), Some("NaCl"));
        assert_eq!(named.handle.cell_id(), &CellId::new(2, 2, "NaCl"));

        let unnamed = idx.top("misc").unwrap();
        assert_eq!(unnamed.label, "Misc");
        assert_eq!(unnamed.detail.as_deref(), Some("varios"));
    }

    #[test]
    fn headers_and_spacers_are_not_indexed() {
        let catalog = sample::catalog().unwrap();
        let idx = SearchIndex::for_catalog(&catalog, 7);
        assert_eq!(idx.len(), 10);
        assert!(idx.rank("ayd").is_empty());
        assert_eq!(idx.version(), catalog.cells.version());
    }

    #[test]
    fn sodium_query_on_sample() {
        let catalog = sample::catalog().unwrap();
        let idx = SearchIndex::for_catalog(&catalog, 7);
        let labels: Vec<_> = idx.rank("na").into_iter().map(|s| s.label).collect();
        // "carbonato" adds a name hit on top of the symbol prefix.
        assert_eq!(
            labels,
            vec![
                "Carbonato de Sodio",
                "Soda Cáustica",
                "Cloruro de Sodio",
                "Acetona"
            ]
        );
    }
}
