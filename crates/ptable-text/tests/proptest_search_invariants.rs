//! Property-based invariant tests for normalization and ranking.
//!
//! 1. Normalization is idempotent.
//! 2. Normalization ignores case and the stripped accent block.
//! 3. Ranked results are sorted by score, capped, and each one qualifies.
//! 4. Equal scores keep registry order.
//! 5. Segmentation is lossless.

use ptable_core::{CategoryRegistry, Cell, CellRegistry};
use ptable_text::{SearchIndex, normalize, symbol_segments};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const WORD: &str = "[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ0-9 %]{0,24}";

fn strip_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

fn registry_strategy() -> impl Strategy<Value = CellRegistry> {
    prop::collection::vec(("[A-Z][a-z0-9]{0,3}", "[a-zñó ]{1,12}"), 0..20).prop_map(|items| {
        let cells = items
            .into_iter()
            .enumerate()
            .map(|(i, (sym, name))| Cell::product(2, 2 + i as u16, sym, name, "bg-[#90C3F9]"))
            .collect();
        CellRegistry::new(cells).unwrap()
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Normalization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_idempotent(s in WORD) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_ignores_case_and_accents(s in WORD) {
        prop_assert_eq!(normalize(&s), normalize(&strip_accents(&s).to_uppercase()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Ranking
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ranking_sorted_capped_and_qualifying(reg in registry_strategy(), q in "[a-zñ]{1,3}") {
        let index = SearchIndex::new(&reg, &CategoryRegistry::default(), 7);
        let ranked = index.rank(&q);
        let nq = normalize(&q);

        prop_assert!(ranked.len() <= 7);
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        for s in &ranked {
            let cell = reg.get(s.handle.cell_id()).unwrap();
            let hay = normalize(&format!("{} {} ", cell.symbol, cell.name().unwrap_or("")));
            prop_assert!(hay.contains(&nq));
            prop_assert_eq!(s.score, s.evidence.score());
        }
    }

    #[test]
    fn ties_preserve_registry_order(reg in registry_strategy(), q in "[a-z]{1,2}") {
        let index = SearchIndex::new(&reg, &CategoryRegistry::default(), 50);
        let ranked = index.rank(&q);
        for w in ranked.windows(2) {
            if w[0].score == w[1].score {
                prop_assert!(w[0].handle.cell_id().col() < w[1].handle.cell_id().col());
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Segmentation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segments_concatenate_back(s in "[A-Za-z0-9()·]{0,16}") {
        let runs = symbol_segments(&s);
        let joined: String = runs.iter().map(|r| r.as_str()).collect();
        prop_assert_eq!(joined, s.clone());
        prop_assert!(runs.windows(2).all(|w| w[0].is_subscript() != w[1].is_subscript()));
    }
}
