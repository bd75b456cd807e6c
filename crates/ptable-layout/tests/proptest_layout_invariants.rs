//! Property-based invariant tests for grid layout.
//!
//! 1. Cell size stays within the configured bounds for any width.
//! 2. Rectangles of distinct cells never overlap.
//! 3. Display indices are a permutation of `1..=n` in `(row, col)` order.
//! 4. Every cell rectangle fits inside the grid.

use ptable_core::{Cell, CellRegistry, PxRect};
use ptable_layout::LayoutEngine;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn width_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1000.0f64..5000.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(0.0),
    ]
}

/// Random cells; conflicting lists are filtered by the registry.
fn registry_strategy() -> impl Strategy<Value = CellRegistry> {
    prop::collection::vec((2u16..=20, 2u16..=10, 1u16..=3, 1u16..=2, any::<bool>()), 0..25)
        .prop_map(|specs| {
            let mut accepted: Vec<Cell> = Vec::new();
            for (col, row, cs, rs, spacer) in specs {
                let cell = if spacer {
                    Cell::spacer(row, col, "bg-transparent")
                } else {
                    Cell::product(row, col, format!("P{row}x{col}"), "Producto", "bg-[#90C3F9]")
                }
                .with_span(cs, rs);
                let clash = accepted
                    .iter()
                    .any(|c| c.footprint.overlaps(&cell.footprint));
                if !clash {
                    accepted.push(cell);
                }
            }
            CellRegistry::new(accepted).unwrap()
        })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Cell size bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cell_size_within_bounds(width in width_strategy(), reg in registry_strategy()) {
        let geo = LayoutEngine::default().compute(width, &reg);
        prop_assert!((56.0..=110.0).contains(&geo.cell_size), "cell size {}", geo.cell_size);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. No overlap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rects_never_overlap(width in 0.0f64..3000.0, reg in registry_strategy()) {
        let geo = LayoutEngine::default().compute(width, &reg);
        let shrink = |r: PxRect| PxRect::new(r.x + 1e-6, r.y + 1e-6, r.width - 2e-6, r.height - 2e-6);
        for (i, a) in geo.cells.iter().enumerate() {
            for b in &geo.cells[i + 1..] {
                prop_assert!(
                    !shrink(a.rect).overlaps(&shrink(b.rect)),
                    "{} overlaps {}", a.id, b.id
                );
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Display index permutation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn display_index_is_sorted_permutation(width in 0.0f64..3000.0, reg in registry_strategy()) {
        let engine = LayoutEngine::default();
        let geo = engine.compute(width, &reg);
        let n = reg.content_cells().count();
        prop_assert_eq!(geo.cells.len(), n);

        let indices: Vec<u32> = geo.cells.iter().map(|c| c.display_index).collect();
        let expected: Vec<u32> = (1..=n as u32).collect();
        prop_assert_eq!(indices, expected);

        let keys: Vec<(u16, u16)> = geo.cells.iter().map(|c| (c.id.row(), c.id.col())).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));

        // Stable across recomputation.
        prop_assert_eq!(engine.compute(width, &reg).cells, geo.cells);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Cells fit the grid
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cells_fit_inside_grid(width in 0.0f64..3000.0, reg in registry_strategy()) {
        let geo = LayoutEngine::default().compute(width, &reg);
        let eps = 1e-6;
        for cell in &geo.cells {
            prop_assert!(cell.rect.x >= geo.idx_width - eps);
            prop_assert!(cell.rect.y >= geo.idx_height - eps);
            prop_assert!(cell.rect.right() <= geo.grid_width + eps);
            prop_assert!(cell.rect.bottom() <= geo.grid_height + eps);
        }
    }
}
