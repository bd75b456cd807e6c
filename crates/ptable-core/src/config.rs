#![forbid(unsafe_code)]

//! Tunables for layout, search, and caching.
//!
//! Defaults reproduce the catalog page. Every field can be overridden from a
//! `PTABLE_*` environment variable; parse failures are collected as
//! diagnostics instead of aborting, and the default is kept for that field.
//!
//! | Variable                   | Field                   | Default   |
//! |----------------------------|-------------------------|-----------|
//! | `PTABLE_MIN_USABLE_WIDTH`  | `min_usable_width`      | 320       |
//! | `PTABLE_CONTAINER_GUTTER`  | `container_gutter`      | 24        |
//! | `PTABLE_MIN_CELL_SIZE`     | `min_cell_size`         | 56        |
//! | `PTABLE_MAX_CELL_SIZE`     | `max_cell_size`         | 110       |
//! | `PTABLE_MAX_SUGGESTIONS`   | `max_suggestions`       | 7         |
//! | `PTABLE_FALLBACK_COLOR`    | `fallback_color`        | `#f0f0f0` |
//! | `PTABLE_LAYOUT_CACHE`      | `layout_cache_capacity` | 16        |
//! | `PTABLE_SEARCH_CACHE`      | `search_cache_capacity` | 128       |

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::color::{DEFAULT_FALLBACK_COLOR, HexColor};

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Floor for the usable board width in pixels.
    pub min_usable_width: f64,
    /// Horizontal space subtracted from the container width.
    pub container_gutter: f64,
    /// Smallest cell edge in pixels.
    pub min_cell_size: f64,
    /// Largest cell edge in pixels.
    pub max_cell_size: f64,
    /// Cap on ranked suggestions.
    pub max_suggestions: usize,
    /// Photo-mode colour when a background reference has no hex code.
    pub fallback_color: HexColor,
    /// Entries kept by the layout memo.
    pub layout_cache_capacity: usize,
    /// Entries kept by the suggestion memo.
    pub search_cache_capacity: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            min_usable_width: 320.0,
            container_gutter: 24.0,
            min_cell_size: 56.0,
            max_cell_size: 110.0,
            max_suggestions: 7,
            fallback_color: DEFAULT_FALLBACK_COLOR,
            layout_cache_capacity: 16,
            search_cache_capacity: 128,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct CatalogConfigParse {
    pub config: CatalogConfig,
    pub errors: Vec<CatalogConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl CatalogConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for CatalogConfigError {}

impl CatalogConfig {
    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> CatalogConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> CatalogConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse config through an arbitrary variable lookup.
    pub fn from_env_with<F>(mut get: F) -> CatalogConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = CatalogConfig::default();
        let mut errors = Vec::new();

        read_number(
            &mut get,
            "PTABLE_MIN_USABLE_WIDTH",
            "min_usable_width",
            &mut config.min_usable_width,
            &mut errors,
        );
        read_number(
            &mut get,
            "PTABLE_CONTAINER_GUTTER",
            "container_gutter",
            &mut config.container_gutter,
            &mut errors,
        );
        read_number(
            &mut get,
            "PTABLE_MIN_CELL_SIZE",
            "min_cell_size",
            &mut config.min_cell_size,
            &mut errors,
        );
        read_number(
            &mut get,
            "PTABLE_MAX_CELL_SIZE",
            "max_cell_size",
            &mut config.max_cell_size,
            &mut errors,
        );
        read_number(
            &mut get,
            "PTABLE_MAX_SUGGESTIONS",
            "max_suggestions",
            &mut config.max_suggestions,
            &mut errors,
        );
        read_number(
            &mut get,
            "PTABLE_LAYOUT_CACHE",
            "layout_cache_capacity",
            &mut config.layout_cache_capacity,
            &mut errors,
        );
        read_number(
            &mut get,
            "PTABLE_SEARCH_CACHE",
            "search_cache_capacity",
            &mut config.search_cache_capacity,
            &mut errors,
        );
        if let Some(raw) = get("PTABLE_FALLBACK_COLOR") {
            match HexColor::parse(raw.trim()) {
                Some(color) => config.fallback_color = color,
                None => errors.push(CatalogConfigError::new(
                    "fallback_color",
                    raw,
                    "expected #rrggbb",
                )),
            }
        }

        if let Err(mut violations) = config.validate() {
            errors.append(&mut violations);
            config = CatalogConfig::default();
        }

        CatalogConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<CatalogConfigError>> {
        let mut errors = Vec::new();
        validate_positive("min_usable_width", self.min_usable_width, &mut errors);
        validate_positive("min_cell_size", self.min_cell_size, &mut errors);
        validate_positive("max_cell_size", self.max_cell_size, &mut errors);
        if !self.container_gutter.is_finite() || self.container_gutter < 0.0 {
            errors.push(CatalogConfigError::new(
                "container_gutter",
                self.container_gutter.to_string(),
                "must be a finite, non-negative number",
            ));
        }
        if self.min_cell_size > self.max_cell_size {
            errors.push(CatalogConfigError::new(
                "min_cell_size",
                self.min_cell_size.to_string(),
                "must not exceed max_cell_size",
            ));
        }
        if self.max_suggestions == 0 {
            errors.push(CatalogConfigError::new(
                "max_suggestions",
                "0",
                "must be at least 1",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn read_number<F, T>(
    get: &mut F,
    var: &'static str,
    field: &'static str,
    slot: &mut T,
    errors: &mut Vec<CatalogConfigError>,
) where
    F: FnMut(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = get(var) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => errors.push(CatalogConfigError::new(field, raw, "expected a number")),
    }
}

fn validate_positive(field: &'static str, value: f64, errors: &mut Vec<CatalogConfigError>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(CatalogConfigError::new(
            field,
            value.to_string(),
            "must be a finite, positive number",
        ));
    }
}
