#![forbid(unsafe_code)]

//! Category definitions.
//!
//! Membership is expressed through shared background references rather than
//! per-cell category pointers: a cell belongs to a category when its
//! background reference is listed by the category, or when its symbol equals
//! the category key (the header tile).

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::cell::Cell;
use crate::error::CatalogError;

/// Key of the sentinel category that matches every cell.
pub const ALL_CATEGORY_KEY: &str = "all";

/// Display colours owned by the painter. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPalette {
    pub dot: String,
    pub border: String,
    pub soft_background: String,
    pub text: String,
}

/// A named grouping of cells sharing a visual background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub key: String,
    pub label: String,
    pub palette: CategoryPalette,
    pub background_refs: Vec<String>,
}

impl Category {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            palette: CategoryPalette::default(),
            background_refs: Vec::new(),
        }
    }

    /// Set the owned background references (builder).
    pub fn with_backgrounds<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.background_refs = refs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the palette (builder).
    pub fn with_palette(mut self, palette: CategoryPalette) -> Self {
        self.palette = palette;
        self
    }

    #[inline]
    pub fn is_all(&self) -> bool {
        self.key == ALL_CATEGORY_KEY
    }

    /// Whether `cell` belongs to this category.
    ///
    /// The sentinel matches everything. Otherwise either the background
    /// reference or the header symbol must match.
    pub fn contains(&self, cell: &Cell) -> bool {
        self.is_all() || self.owns_background(&cell.background_ref) || cell.symbol == self.key
    }

    pub fn owns_background(&self, background_ref: &str) -> bool {
        self.background_refs.iter().any(|r| r == background_ref)
    }
}

/// Immutable, ordered table of categories. The sentinel is always first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Build a registry, enforcing the sentinel and unique keys.
    ///
    /// A missing sentinel is synthesised; a sentinel found elsewhere in the
    /// list is moved to the front. Relative order of the rest is kept.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut seen = FxHashSet::default();
        for category in &categories {
            if category.key.is_empty() {
                return Err(CatalogError::EmptyCategoryKey);
            }
            if !seen.insert(category.key.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.key.clone()));
            }
        }

        let (mut ordered, rest): (Vec<_>, Vec<_>) =
            categories.into_iter().partition(Category::is_all);
        if ordered.is_empty() {
            ordered.push(Category::new(ALL_CATEGORY_KEY, "All"));
        }
        ordered.extend(rest);
        Ok(Self {
            categories: ordered,
        })
    }

    /// The built-in distributor categories (see [`crate::builtin`]).
    pub fn builtin() -> Self {
        Self {
            categories: crate::builtin::categories(),
        }
    }

    /// All categories, sentinel first.
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys of every real category (the sentinel excluded).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .filter(|c| !c.is_all())
            .map(|c| c.key.as_str())
    }

    /// Whether `symbol` names a real category (used to hide header tiles
    /// from search results).
    pub fn is_category_key(&self, symbol: &str) -> bool {
        symbol != ALL_CATEGORY_KEY && self.contains_key(symbol)
    }

    /// Membership test for an arbitrary key.
    ///
    /// Unknown keys still match header tiles whose symbol equals the key.
    pub fn matches(&self, key: &str, cell: &Cell) -> bool {
        if key == ALL_CATEGORY_KEY {
            return true;
        }
        match self.get(key) {
            Some(category) => category.contains(cell),
            None => cell.symbol == key,
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Never true: the sentinel is always present.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            categories: vec![Category::new(ALL_CATEGORY_KEY, "All")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acids() -> Category {
        Category::new("AyD", "Ácidos y derivados").with_backgrounds(["bg-[#8FC3FA]", "bg-[#BBDAFC]"])
    }

    #[test]
    fn sentinel_synthesised_when_missing() {
        let reg = CategoryRegistry::new(vec![acids()]).unwrap();
        assert_eq!(reg.len(), 2);
        assert!(reg.all()[0].is_all());
        assert_eq!(reg.all()[1].key, "AyD");
    }

    #[test]
    fn sentinel_moved_to_front() {
        let reg =
            CategoryRegistry::new(vec![acids(), Category::new(ALL_CATEGORY_KEY, "Todos")]).unwrap();
        assert_eq!(reg.all()[0].label, "Todos");
        assert_eq!(reg.keys().collect::<Vec<_>>(), vec!["AyD"]);
    }

    #[test]
    fn duplicate_keys_rejected() {
        let err = CategoryRegistry::new(vec![acids(), acids()]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCategory("AyD".into()));
    }

    #[test]
    fn membership_by_background_or_symbol() {
        let cat = acids();
        let product = Cell::product(3, 2, "HCl", "Ácido Clorhídrico", "bg-[#BBDAFC]");
        let header = Cell::header(2, 2, "AyD", "bg-[#123456]");
        let other = Cell::product(3, 3, "NaOH", "Soda Cáustica", "bg-[#90C3F9]");
        assert!(cat.contains(&product));
        assert!(cat.contains(&header));
        assert!(!cat.contains(&other));
    }

    #[test]
    fn unknown_key_matches_only_symbol() {
        let reg = CategoryRegistry::new(vec![acids()]).unwrap();
        let header = Cell::header(2, 2, "XYZ", "bg-[#8FC3FA]");
        let product = Cell::product(3, 2, "HCl", "Ácido Clorhídrico", "bg-[#8FC3FA]");
        assert!(reg.matches("XYZ", &header));
        assert!(!reg.matches("XYZ", &product));
        assert!(reg.matches(ALL_CATEGORY_KEY, &product));
    }

    #[test]
    fn builtin_has_sentinel_first() {
        let reg = CategoryRegistry::builtin();
        assert!(reg.all()[0].is_all());
        assert!(reg.is_category_key("AyD"));
        assert!(!reg.is_category_key(ALL_CATEGORY_KEY));
    }
}
