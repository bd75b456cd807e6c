#![forbid(unsafe_code)]

//! JSON catalog documents.
//!
//! A document is the static configuration table supplied by the host:
//!
//! ```json
//! {
//!   "spacerRef": "bg-transparent",
//!   "categories": [{ "key": "AyD", "label": "Ácidos", "backgroundRefs": ["bg-[#8FC3FA]"] }],
//!   "cells": [{ "row": 3, "col": 2, "symbol": "HCl", "name": "Ácido Clorhídrico",
//!               "backgroundRef": "bg-[#8FC3FA]" }]
//! }
//! ```
//!
//! Loading classifies every cell into a [`CellKind`] exactly once: a cell
//! painted with the spacer reference is a spacer, a cell with a non-empty
//! name is a product, anything else is a category header. When
//! `categories` is omitted the built-in table is used.

use serde::Deserialize;

use crate::category::{Category, CategoryPalette, CategoryRegistry};
use crate::cell::{Cell, CellDetails, CellId, CellKind, Footprint};
use crate::error::CatalogError;
use crate::registry::CellRegistry;

/// Background reference that marks transparent filler cells.
pub const DEFAULT_SPACER_REF: &str = "bg-transparent";

fn one() -> u16 {
    1
}

/// Top-level document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(default)]
    pub spacer_ref: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<CategorySpec>>,
    #[serde(default)]
    pub cells: Vec<CellSpec>,
}

/// Raw cell record as written in configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSpec {
    pub row: u16,
    pub col: u16,
    #[serde(default = "one")]
    pub col_span: u16,
    #[serde(default = "one")]
    pub row_span: u16,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub structure: Option<String>,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub cell_image_ref: Option<String>,
    #[serde(default)]
    pub background_ref: String,
    /// Identity tag used when `symbol` is empty.
    #[serde(default)]
    pub index: Option<u32>,
}

/// Raw category record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpec {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub dot: String,
    #[serde(default)]
    pub border: String,
    #[serde(default)]
    pub soft_background: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub background_refs: Vec<String>,
}

impl CategorySpec {
    fn into_category(self) -> Category {
        let label = if self.label.is_empty() {
            self.key.clone()
        } else {
            self.label
        };
        Category::new(self.key, label)
            .with_palette(CategoryPalette {
                dot: self.dot,
                border: self.border,
                soft_background: self.soft_background,
                text: self.text,
            })
            .with_backgrounds(self.background_refs)
    }
}

impl CellSpec {
    fn into_cell(self, position: usize, spacer_ref: &str) -> Cell {
        let tag = if !self.symbol.is_empty() {
            self.symbol.clone()
        } else if let Some(index) = self.index {
            index.to_string()
        } else {
            position.to_string()
        };

        let name = self.name.filter(|n| !n.trim().is_empty());
        let kind = if self.background_ref == spacer_ref {
            CellKind::Spacer
        } else if let Some(name) = name {
            CellKind::Product { name }
        } else {
            CellKind::CategoryHeader
        };

        Cell {
            id: CellId::new(self.row, self.col, tag),
            footprint: Footprint::new(self.row, self.col).with_span(self.col_span, self.row_span),
            symbol: self.symbol,
            background_ref: self.background_ref,
            kind,
            details: CellDetails {
                meta: self.meta.filter(|m| !m.is_empty()),
                usage: self.usage.filter(|u| !u.is_empty()),
                structure: self.structure.filter(|s| !s.is_empty()),
                image_ref: self.image_ref.filter(|i| !i.is_empty()),
                cell_image_ref: self.cell_image_ref.filter(|i| !i.is_empty()),
            },
        }
    }
}

/// Both registries, loaded together.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub cells: CellRegistry,
    pub categories: CategoryRegistry,
}

impl Catalog {
    pub fn new(cells: CellRegistry, categories: CategoryRegistry) -> Self {
        Self { cells, categories }
    }

    /// Build both registries from a parsed document.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        let spacer_ref = doc
            .spacer_ref
            .unwrap_or_else(|| DEFAULT_SPACER_REF.to_string());

        let categories = match doc.categories {
            Some(specs) => {
                CategoryRegistry::new(specs.into_iter().map(CategorySpec::into_category).collect())?
            }
            None => CategoryRegistry::builtin(),
        };

        let cells = doc
            .cells
            .into_iter()
            .enumerate()
            .map(|(position, spec)| spec.into_cell(position, &spacer_ref))
            .collect();
        let cells = CellRegistry::new(cells)?;

        tracing::debug!(
            cells = cells.len(),
            categories = categories.len(),
            "catalog loaded"
        );
        Ok(Self { cells, categories })
    }

    /// Parse and load a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Searchable cells (see [`CellRegistry::product_cells`]).
    pub fn product_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.product_cells(&self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "categories": [
            { "key": "all", "label": "Todos" },
            { "key": "AyD", "label": "Ácidos", "backgroundRefs": ["bg-[#8FC3FA]"] }
        ],
        "cells": [
            { "row": 2, "col": 2, "symbol": "AyD", "backgroundRef": "bg-[#8FC3FA]" },
            { "row": 3, "col": 2, "symbol": "HCl", "name": "Ácido Clorhídrico",
              "backgroundRef": "bg-[#8FC3FA]", "meta": "33%" },
            { "row": 3, "col": 3, "colSpan": 4, "backgroundRef": "bg-transparent" },
            { "row": 4, "col": 2, "symbol": "X", "name": "", "backgroundRef": "bg-[#000000]" }
        ]
    }"#;

    #[test]
    fn kinds_are_classified_once() {
        let catalog = Catalog::from_json(DOC).unwrap();
        let kinds: Vec<_> = catalog
            .cells
            .all_cells()
            .iter()
            .map(|c| match c.kind {
                CellKind::Product { .. } => "product",
                CellKind::CategoryHeader => "header",
                CellKind::Spacer => "spacer",
            })
            .collect();
        // Empty names count as absent.
        assert_eq!(kinds, vec!["header", "product", "spacer", "header"]);
    }

    #[test]
    fn spans_default_to_one_and_tags_fall_back_to_position() {
        let catalog = Catalog::from_json(DOC).unwrap();
        let cells = catalog.cells.all_cells();
        assert_eq!(cells[1].footprint.col_span, 1);
        assert_eq!(cells[2].footprint.col_span, 4);
        assert_eq!(cells[2].id.to_string(), "3-3-2");
        assert_eq!(cells[1].meta(), Some("33%"));
    }

    #[test]
    fn product_cells_hide_headers() {
        let catalog = Catalog::from_json(DOC).unwrap();
        let symbols: Vec<_> = catalog.product_cells().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["HCl", "X"]);
    }

    #[test]
    fn missing_categories_use_builtin_table() {
        let catalog = Catalog::from_json(r#"{ "cells": [] }"#).unwrap();
        assert_eq!(catalog.categories.len(), 15);
        assert_eq!(catalog.categories.all()[0].label, "Todos");
    }

    #[test]
    fn custom_spacer_ref() {
        let json = r#"{ "spacerRef": "gap",
            "cells": [{ "row": 2, "col": 2, "symbol": "A", "name": "A", "backgroundRef": "gap" }] }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert!(catalog.cells.all_cells()[0].is_spacer());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Catalog::from_json(r#"{ "cells": [{ "row": "x" }] }"#),
            Err(CatalogError::Parse(_))
        ));
    }
}
