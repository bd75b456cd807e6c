#![forbid(unsafe_code)]

//! Responsive geometry for the catalog grid.
//!
//! - [`LayoutEngine`] - pure `(width, registry) -> GridGeometry` solver
//! - [`cache`] - LRU memo keyed by width and registry version
//!
//! # Sizing
//!
//! The board reserves row 1 and column 1 for axis labels, so content starts
//! at grid coordinate 2. Cell size scales with the container but is clamped
//! to a legible range; label gutters scale with the cell but never drop
//! below a floor.
//!
//! ```
//! use ptable_core::{Cell, CellRegistry};
//! use ptable_layout::LayoutEngine;
//!
//! let registry = CellRegistry::new(vec![
//!     Cell::product(2, 2, "HCl", "Ácido Clorhídrico", "bg-[#BBDAFC]"),
//!     Cell::product(2, 3, "NaOH", "Soda Cáustica", "bg-[#90C3F9]"),
//! ])
//! .unwrap();
//!
//! let geometry = LayoutEngine::default().compute(1024.0, &registry);
//! assert_eq!(geometry.cell_size, 110.0);
//! assert_eq!(geometry.cells[0].display_index, 1);
//! ```

pub mod cache;

use ptable_core::{CatalogConfig, Cell, CellId, CellRegistry, Extents, PxPoint, PxRect};
use rustc_hash::FxHashMap;
use serde::Serialize;

pub use cache::{LayoutCache, LayoutCacheStats};

/// Minimum width of the row-label gutter.
pub const MIN_INDEX_WIDTH: f64 = 22.0;
/// Minimum height of the column-label gutter.
pub const MIN_INDEX_HEIGHT: f64 = 18.0;
/// Below this cell size labels use the compact font and offsets.
pub const COMPACT_CELL_SIZE: f64 = 70.0;

const INDEX_WIDTH_RATIO: f64 = 0.2;
const INDEX_HEIGHT_RATIO: f64 = 0.16;
const ROW_LABEL_INSET: f64 = 6.0;

/// Pixel placement of one painted cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellGeometry {
    pub id: CellId,
    pub rect: PxRect,
    /// 1-based ordinal by ascending `(row, col)`.
    pub display_index: u32,
}

/// A row or column index label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabel {
    /// Grid column (for column labels) or row (for row labels).
    pub index: u16,
    /// First covering row (column labels) or column (row labels).
    pub anchor: u16,
    pub text: String,
    /// Centre-bottom of a column label, right-middle of a row label.
    pub position: PxPoint,
}

/// Full geometry snapshot for one container width.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridGeometry {
    pub container_width: f64,
    pub cell_size: f64,
    pub idx_width: f64,
    pub idx_height: f64,
    pub grid_width: f64,
    pub grid_height: f64,
    pub extents: Extents,
    /// Non-spacer cells in display-index order.
    pub cells: Vec<CellGeometry>,
    pub column_labels: Vec<AxisLabel>,
    pub row_labels: Vec<AxisLabel>,
    pub label_font_px: f64,
    /// Preview panel area over the empty upper middle of the board.
    pub panel: PxRect,
    #[serde(skip)]
    by_id: FxHashMap<CellId, usize>,
}

impl GridGeometry {
    /// Geometry of a cell by identity. Spacers have none.
    pub fn cell(&self, id: &CellId) -> Option<&CellGeometry> {
        self.by_id.get(id).map(|&i| &self.cells[i])
    }

    pub fn display_index(&self, id: &CellId) -> Option<u32> {
        self.cell(id).map(|g| g.display_index)
    }

    #[inline]
    pub fn is_compact(&self) -> bool {
        self.cell_size < COMPACT_CELL_SIZE
    }
}

/// Pure layout solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    min_usable_width: f64,
    container_gutter: f64,
    min_cell_size: f64,
    max_cell_size: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            min_usable_width: config.min_usable_width,
            container_gutter: config.container_gutter,
            min_cell_size: config.min_cell_size,
            max_cell_size: config.max_cell_size,
        }
    }

    /// Non-finite and negative widths count as zero.
    #[inline]
    pub fn sanitize_width(width_px: f64) -> f64 {
        if width_px.is_finite() && width_px > 0.0 {
            width_px
        } else {
            0.0
        }
    }

    /// Width available to the board after the gutter, floored.
    pub fn usable_width(&self, container_width_px: f64) -> f64 {
        let width = Self::sanitize_width(container_width_px);
        (width - self.container_gutter).max(self.min_usable_width)
    }

    /// Edge length of one grid slot.
    pub fn cell_size(&self, container_width_px: f64, extents: Extents) -> f64 {
        let columns = f64::from(extents.max_col.saturating_sub(1).max(1));
        (self.usable_width(container_width_px) / columns)
            .max(self.min_cell_size)
            .min(self.max_cell_size)
    }

    /// Compute the full geometry snapshot.
    pub fn compute(&self, container_width_px: f64, registry: &CellRegistry) -> GridGeometry {
        let container_width = Self::sanitize_width(container_width_px);
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "grid_layout",
            width = container_width,
            cells = registry.len(),
            version = registry.version()
        )
        .entered();

        let extents = registry.extents();
        let cs = self.cell_size(container_width, extents);
        let idx_width = (cs * INDEX_WIDTH_RATIO).max(MIN_INDEX_WIDTH);
        let idx_height = (cs * INDEX_HEIGHT_RATIO).max(MIN_INDEX_HEIGHT);
        let grid_width = idx_width + f64::from(extents.max_col.saturating_sub(1)) * cs;
        let grid_height = idx_height + f64::from(extents.max_row.saturating_sub(1)) * cs;

        let mut content: Vec<&Cell> = registry.content_cells().collect();
        content.sort_by_key(|c| (c.footprint.row, c.footprint.col));

        let mut cells = Vec::with_capacity(content.len());
        let mut by_id = FxHashMap::default();
        for (i, cell) in content.iter().enumerate() {
            let fp = cell.footprint;
            let rect = PxRect::new(
                idx_width + (f64::from(fp.col) - 2.0) * cs,
                idx_height + (f64::from(fp.row) - 2.0) * cs,
                f64::from(fp.col_span) * cs,
                f64::from(fp.row_span) * cs,
            );
            by_id.insert(cell.id.clone(), i);
            cells.push(CellGeometry {
                id: cell.id.clone(),
                rect,
                display_index: (i + 1) as u32,
            });
        }

        let compact = cs < COMPACT_CELL_SIZE;
        let column_offset = if compact { 18.0 } else { 20.0 };

        let column_labels = (2..=extents.max_col)
            .filter_map(|col| {
                let top_row = content
                    .iter()
                    .filter(|c| c.footprint.covers_col(col))
                    .map(|c| c.footprint.row)
                    .min()?;
                Some(AxisLabel {
                    index: col,
                    anchor: top_row,
                    text: (col - 1).to_string(),
                    position: PxPoint::new(
                        idx_width + (f64::from(col) - 2.0) * cs + cs / 2.0,
                        (idx_height + (f64::from(top_row) - 2.0) * cs - column_offset).max(0.0),
                    ),
                })
            })
            .collect();

        let row_labels = (2..=extents.max_row)
            .filter_map(|row| {
                let left_col = content
                    .iter()
                    .filter(|c| c.footprint.covers_row(row))
                    .map(|c| c.footprint.col)
                    .min()?;
                Some(AxisLabel {
                    index: row,
                    anchor: left_col,
                    text: (row - 1).to_string(),
                    position: PxPoint::new(
                        idx_width + (f64::from(left_col) - 2.0) * cs - ROW_LABEL_INSET,
                        idx_height + (f64::from(row) - 2.0) * cs + cs / 2.0,
                    ),
                })
            })
            .collect();

        let panel = PxRect::new(
            idx_width + 2.5 * cs,
            idx_height + (3.0 * cs - 1.5 * cs) / 2.0,
            10.0 * cs,
            1.5 * cs,
        );

        GridGeometry {
            container_width,
            cell_size: cs,
            idx_width,
            idx_height,
            grid_width,
            grid_height,
            extents,
            cells,
            column_labels,
            row_labels,
            label_font_px: if compact { 11.0 } else { 13.0 },
            panel,
            by_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptable_core::sample;

    fn two_wide() -> CellRegistry {
        CellRegistry::new(vec![
            Cell::product(2, 2, "HCl", "Ácido Clorhídrico", "bg-[#BBDAFC]"),
            Cell::product(3, 2, "NaOH", "Soda Cáustica", "bg-[#90C3F9]").with_span(2, 1),
        ])
        .unwrap()
    }

    #[test]
    fn cell_size_clamps_both_ways() {
        let engine = LayoutEngine::default();
        let reg = sample::catalog().unwrap().cells;
        // 18 content columns: 320 / 18 < 56.
        assert_eq!(engine.compute(100.0, &reg).cell_size, 56.0);
        // 4000 - 24 over 18 columns > 110.
        assert_eq!(engine.compute(4000.0, &reg).cell_size, 110.0);
        let mid = engine.compute(24.0 + 18.0 * 80.0, &reg);
        assert_eq!(mid.cell_size, 80.0);
    }

    #[test]
    fn invalid_widths_clamp_to_minimum() {
        let engine = LayoutEngine::default();
        assert_eq!(engine.usable_width(f64::NAN), 320.0);
        assert_eq!(engine.usable_width(-50.0), 320.0);
        assert_eq!(engine.usable_width(f64::INFINITY), 320.0);
        assert_eq!(engine.compute(f64::NAN, &two_wide()).container_width, 0.0);
    }

    #[test]
    fn positions_offset_by_two() {
        let geo = LayoutEngine::default().compute(500.0, &two_wide());
        // usable 476 over 2 columns -> 238, clamped to 110.
        let cs = 110.0;
        assert_eq!(geo.cell_size, cs);
        assert_eq!(geo.idx_width, 22.0);
        assert_eq!(geo.idx_height, 18.0);
        let naoh = geo.cell(&CellId::new(3, 2, "NaOH")).unwrap();
        assert_eq!(naoh.rect, PxRect::new(22.0, 18.0 + cs, 2.0 * cs, cs));
        assert_eq!(geo.grid_width, 22.0 + 2.0 * cs);
        assert_eq!(geo.grid_height, 18.0 + 2.0 * cs);
    }

    #[test]
    fn gutters_scale_with_large_cells() {
        let engine = LayoutEngine::new(&CatalogConfig {
            max_cell_size: 200.0,
            ..CatalogConfig::default()
        });
        let geo = engine.compute(1000.0, &two_wide());
        assert_eq!(geo.cell_size, 200.0);
        assert_eq!(geo.idx_width, 40.0);
        assert_eq!(geo.idx_height, 32.0);
    }

    #[test]
    fn labels_follow_first_covering_cell() {
        let reg = CellRegistry::new(vec![
            Cell::product(3, 2, "A", "A", "x"),
            Cell::product(2, 3, "B", "B", "x").with_span(1, 2),
            Cell::spacer(2, 5, "bg-transparent"),
        ])
        .unwrap();
        let geo = LayoutEngine::default().compute(800.0, &reg);
        let cols: Vec<_> = geo
            .column_labels
            .iter()
            .map(|l| (l.index, l.anchor, l.text.as_str()))
            .collect();
        // Column 4 is empty and column 5 only holds a spacer.
        assert_eq!(cols, vec![(2, 3, "1"), (3, 2, "2")]);
        let rows: Vec<_> = geo
            .row_labels
            .iter()
            .map(|l| (l.index, l.anchor, l.text.as_str()))
            .collect();
        assert_eq!(rows, vec![(2, 3, "1"), (3, 2, "2")]);
    }

    #[test]
    fn label_positions_and_font() {
        let reg = sample::catalog().unwrap().cells;
        let geo = LayoutEngine::default().compute(100.0, &reg);
        let cs = geo.cell_size;
        assert_eq!(cs, 56.0);
        assert!(geo.is_compact());
        assert_eq!(geo.label_font_px, 11.0);
        let col2 = &geo.column_labels[0];
        assert_eq!(col2.position.x, geo.idx_width + cs / 2.0);
        // idx_height - 18 == 0 for the floor gutter.
        assert_eq!(col2.position.y, 0.0);
        let row3 = &geo.row_labels[1];
        assert_eq!(row3.position.x, geo.idx_width - 6.0);
        assert_eq!(row3.position.y, geo.idx_height + cs + cs / 2.0);
    }

    #[test]
    fn display_indices_follow_row_then_col() {
        let reg = sample::catalog().unwrap().cells;
        let geo = LayoutEngine::default().compute(1280.0, &reg);
        let order: Vec<_> = geo.cells.iter().map(|c| c.id.tag().to_string()).collect();
        assert_eq!(order[0], "AyD");
        assert_eq!(order[1], "AySA");
        assert_eq!(order[2], "H2SO4");
        assert_eq!(geo.cells.len(), 14);
        assert_eq!(geo.display_index(&CellId::new(6, 4, "KOH")), Some(14));
        assert_eq!(geo.display_index(&CellId::new(4, 4, "900")), None);
    }

    #[test]
    fn empty_registry_is_degenerate() {
        let geo = LayoutEngine::default().compute(1024.0, &CellRegistry::empty());
        assert_eq!(geo.extents, Extents::MINIMUM);
        assert_eq!(geo.cell_size, 110.0);
        assert!(geo.cells.is_empty());
        assert!(geo.column_labels.is_empty());
    }

    #[test]
    fn panel_geometry() {
        let geo = LayoutEngine::default().compute(4000.0, &two_wide());
        let cs = geo.cell_size;
        assert_eq!(geo.panel.x, geo.idx_width + 2.5 * cs);
        assert_eq!(geo.panel.y, geo.idx_height + 0.75 * cs);
        assert_eq!(geo.panel.width, 10.0 * cs);
        assert_eq!(geo.panel.height, 1.5 * cs);
    }

    #[test]
    fn compute_is_deterministic() {
        let reg = sample::catalog().unwrap().cells;
        let engine = LayoutEngine::default();
        assert_eq!(engine.compute(900.0, &reg), engine.compute(900.0, &reg));
    }
}
