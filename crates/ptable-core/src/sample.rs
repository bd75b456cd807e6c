#![forbid(unsafe_code)]

//! Bundled sample catalog.
//!
//! A small slice of the distributor board: four category headers, ten
//! products, and one wide spacer. Shared by tests, benches, and the harness.

use crate::document::Catalog;
use crate::error::CatalogError;

/// Raw JSON of the sample catalog. Categories come from the built-in table.
pub const SAMPLE_CATALOG_JSON: &str = include_str!("../fixtures/sample_catalog.json");

/// Load the sample catalog.
pub fn catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_json(SAMPLE_CATALOG_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Extents;

    #[test]
    fn sample_loads() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.cells.len(), 15);
        assert_eq!(catalog.cells.content_cells().count(), 14);
        assert_eq!(catalog.product_cells().count(), 10);
        assert_eq!(
            catalog.cells.extents(),
            Extents {
                max_col: 19,
                max_row: 6
            }
        );
    }
}
