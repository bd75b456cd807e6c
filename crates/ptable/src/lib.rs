#![forbid(unsafe_code)]

//! Periodic catalog grid public facade.
//!
//! Re-exports the common types from the internal crates, a top-level
//! [`Error`], and a small prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use ptable_core::{
    ALL_CATEGORY_KEY, Catalog, CatalogConfig, CatalogConfigError, CatalogDocument, CatalogError,
    Category, CategoryRegistry, Cell, CellId, CellKind, CellRegistry, Extents, HexColor, PxPoint,
    PxRect,
};

// --- Layout re-exports -----------------------------------------------------

pub use ptable_layout::{CellGeometry, GridGeometry, LayoutCache, LayoutEngine};

// --- Text re-exports -------------------------------------------------------

pub use ptable_text::{MatchEvidence, SearchIndex, Suggestion, SuggestionCache, normalize};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use ptable_runtime::{
    CatalogFrame, CatalogMsg, CatalogView, FocusEvent, FocusState, HighlightFlags,
    ManualWidthSource, ViewMode, WidthSource,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for catalog hosts.
#[derive(Debug)]
pub enum Error {
    /// The catalog document could not be loaded.
    Catalog(CatalogError),
    /// One or more configuration values were rejected.
    Config(Vec<CatalogConfigError>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Config(errors) => {
                f.write_str("invalid configuration")?;
                for (i, err) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Config(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
        }
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<Vec<CatalogConfigError>> for Error {
    fn from(errors: Vec<CatalogConfigError>) -> Self {
        Self::Config(errors)
    }
}

/// Standard result type for ptable APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Read `PTABLE_*` overrides, failing on any diagnostic.
pub fn config_from_env() -> Result<CatalogConfig> {
    strict(CatalogConfig::from_env_with_diagnostics())
}

fn strict(parse: ptable_core::CatalogConfigParse) -> Result<CatalogConfig> {
    if parse.errors.is_empty() {
        Ok(parse.config)
    } else {
        Err(Error::Config(parse.errors))
    }
}

/// Load a catalog document and wrap it in a ready view.
#[cfg(feature = "runtime")]
pub fn open(json: &str, config: CatalogConfig) -> Result<CatalogView> {
    let catalog = Catalog::from_json(json)?;
    Ok(CatalogView::new(catalog, config))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Catalog, CatalogConfig, Cell, CellId, CellRegistry, Error, GridGeometry, LayoutEngine,
        Result, SearchIndex, Suggestion,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{CatalogFrame, CatalogMsg, CatalogView, FocusState, ViewMode};

    pub use crate::{core, layout, text};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use ptable_core as core;
pub use ptable_layout as layout;
#[cfg(feature = "runtime")]
pub use ptable_runtime as runtime;
pub use ptable_text as text;
