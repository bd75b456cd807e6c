#![forbid(unsafe_code)]

//! Core model for the periodic catalog grid.
//!
//! - [`cell`] - cell records, identities, and the tagged [`CellKind`]
//! - [`category`] - category definitions and the [`CategoryRegistry`]
//! - [`registry`] - the immutable [`CellRegistry`] and grid [`Extents`]
//! - [`document`] - JSON catalog documents and the loaded [`Catalog`]
//! - [`config`] - tunables with `PTABLE_*` environment overrides
//! - [`color`] - background reference to hex colour extraction
//! - [`geometry`] - pixel-space rectangles consumed by the painter
//!
//! Both registries are built once from static configuration and never
//! mutated afterwards. Everything derived from them (layout, search results,
//! highlight flags) lives in the downstream crates.

pub mod builtin;
pub mod category;
pub mod cell;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod registry;

#[cfg(any(test, feature = "sample-data"))]
pub mod sample;

pub use category::{ALL_CATEGORY_KEY, Category, CategoryPalette, CategoryRegistry};
pub use cell::{Cell, CellDetails, CellId, CellKind, Footprint};
pub use color::{DEFAULT_FALLBACK_COLOR, HexColor, extract_hex_color};
pub use config::{CatalogConfig, CatalogConfigError, CatalogConfigParse};
pub use document::{Catalog, CatalogDocument, CategorySpec, CellSpec, DEFAULT_SPACER_REF};
pub use error::CatalogError;
pub use geometry::{PxPoint, PxRect};
pub use registry::{CellRegistry, Extents};
