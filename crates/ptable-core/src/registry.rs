#![forbid(unsafe_code)]

//! Immutable cell table.
//!
//! The registry validates footprints once at construction and is read-only
//! afterwards. Each instance carries a process-unique [`version`] so derived
//! results (layout, suggestions) can be memoized against it.
//!
//! [`version`]: CellRegistry::version

use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::category::CategoryRegistry;
use crate::cell::{Cell, CellId};
use crate::error::CatalogError;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Largest occupied column and row, spans included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extents {
    pub max_col: u16,
    pub max_row: u16,
}

impl Extents {
    /// The degenerate grid used when there are no cells.
    pub const MINIMUM: Extents = Extents {
        max_col: 2,
        max_row: 2,
    };
}

/// Ordered, validated cell records.
#[derive(Debug, Clone)]
pub struct CellRegistry {
    cells: Vec<Cell>,
    version: u64,
}

impl CellRegistry {
    /// Validate and freeze a cell list.
    ///
    /// Rejects zero spans, spans running past the coordinate range, cells in
    /// the reserved label row/column, duplicate identities, and overlapping
    /// footprints. Configuration order is kept.
    pub fn new(cells: Vec<Cell>) -> Result<Self, CatalogError> {
        let mut ids = FxHashSet::default();

        for (idx, cell) in cells.iter().enumerate() {
            let fp = cell.footprint;
            if fp.row_span == 0 || fp.col_span == 0 {
                return Err(CatalogError::ZeroSpan {
                    cell: cell.id.clone(),
                });
            }
            if !fp.in_range() {
                return Err(CatalogError::SpanOutOfRange {
                    cell: cell.id.clone(),
                });
            }
            if fp.row < 2 || fp.col < 2 {
                return Err(CatalogError::ReservedSlot {
                    cell: cell.id.clone(),
                });
            }
            if !ids.insert(&cell.id) {
                return Err(CatalogError::DuplicateCell(cell.id.clone()));
            }
            // Pairwise: boards hold a few hundred cells at most.
            for earlier in &cells[..idx] {
                if let Some((row, col)) = earlier.footprint.first_shared_slot(&fp) {
                    return Err(CatalogError::Overlap {
                        first: earlier.id.clone(),
                        second: cell.id.clone(),
                        row,
                        col,
                    });
                }
            }
        }

        let version = NEXT_VERSION.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(cells = cells.len(), version, "cell registry built");
        Ok(Self { cells, version })
    }

    /// A registry with no cells.
    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Every cell, in configuration order.
    #[inline]
    pub fn all_cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Searchable cells: no spacers and no category header tiles.
    ///
    /// Headers are excluded by symbol, so a header whose symbol is not a
    /// known category key stays searchable.
    pub fn product_cells<'a>(
        &'a self,
        categories: &'a CategoryRegistry,
    ) -> impl Iterator<Item = &'a Cell> + 'a {
        self.cells
            .iter()
            .filter(move |c| !c.is_spacer() && !categories.is_category_key(&c.symbol))
    }

    /// Cells that get painted and numbered (everything except spacers).
    pub fn content_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| !c.is_spacer())
    }

    /// Grid extents over all cells; [`Extents::MINIMUM`] when empty.
    pub fn extents(&self) -> Extents {
        if self.cells.is_empty() {
            return Extents::MINIMUM;
        }
        self.cells.iter().fold(
            Extents {
                max_col: 0,
                max_row: 0,
            },
            |acc, cell| Extents {
                max_col: acc.max_col.max(cell.footprint.last_col()),
                max_row: acc.max_row.max(cell.footprint.last_row()),
            },
        )
    }

    pub fn get(&self, id: &CellId) -> Option<&Cell> {
        self.cells.iter().find(|c| &c.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Process-unique identifier of this registry instance.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Default for CellRegistry {
    fn default() -> Self {
        Self::empty()
    }
}
