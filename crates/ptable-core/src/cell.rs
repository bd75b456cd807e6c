#![forbid(unsafe_code)]

//! Cell records and identities.
//!
//! A cell is either a product, a category header, or a transparent spacer.
//! The kind is decided once at load time (see [`CellKind`]) instead of being
//! inferred from which optional fields happen to be present.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Stable identity of a cell: `(row, col, symbol-or-fallback-index)`.
///
/// Renders as `"{row}-{col}-{tag}"`, which is also the form accepted by
/// [`FromStr`]. Used as the focus identifier and as the pick handle target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    row: u16,
    col: u16,
    tag: String,
}

impl CellId {
    pub fn new(row: u16, col: u16, tag: impl Into<String>) -> Self {
        Self {
            row,
            col,
            tag: tag.into(),
        }
    }

    #[inline]
    pub fn row(&self) -> u16 {
        self.row
    }

    #[inline]
    pub fn col(&self) -> u16 {
        self.col
    }

    /// The symbol, or the fallback index when the cell has no symbol.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.row, self.col, self.tag)
    }
}

impl FromStr for CellId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidCellId(s.to_string());
        // The tag may itself contain dashes; only the first two separate.
        let mut parts = s.splitn(3, '-');
        let row = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let col = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let tag = parts.next().filter(|t| !t.is_empty()).ok_or_else(invalid)?;
        Ok(Self::new(row, col, tag))
    }
}

impl Serialize for CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

/// Grid area occupied by a cell once spans are expanded.
///
/// Coordinates are 1-based; row 1 and column 1 hold the axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footprint {
    pub row: u16,
    pub col: u16,
    pub row_span: u16,
    pub col_span: u16,
}

impl Footprint {
    pub const fn new(row: u16, col: u16) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
        }
    }

    pub const fn with_span(mut self, col_span: u16, row_span: u16) -> Self {
        self.col_span = col_span;
        self.row_span = row_span;
        self
    }

    /// Last occupied row (inclusive).
    #[inline]
    pub fn last_row(&self) -> u16 {
        self.row.saturating_add(self.row_span.max(1) - 1)
    }

    /// Last occupied column (inclusive).
    #[inline]
    pub fn last_col(&self) -> u16 {
        self.col.saturating_add(self.col_span.max(1) - 1)
    }

    #[inline]
    pub fn covers_col(&self, col: u16) -> bool {
        col >= self.col && col <= self.last_col()
    }

    #[inline]
    pub fn covers_row(&self, row: u16) -> bool {
        row >= self.row && row <= self.last_row()
    }

    /// Whether two footprints share at least one grid slot.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.row <= other.last_row()
            && other.row <= self.last_row()
            && self.col <= other.last_col()
            && other.col <= self.last_col()
    }

    /// Whether the spans end within the `u16` grid coordinate range.
    pub fn in_range(&self) -> bool {
        let end = |start: u16, span: u16| u32::from(start) + u32::from(span.max(1)) - 1;
        end(self.row, self.row_span) <= u32::from(u16::MAX)
            && end(self.col, self.col_span) <= u32::from(u16::MAX)
    }

    /// Top-left slot shared with `other`, if the footprints overlap.
    pub fn first_shared_slot(&self, other: &Footprint) -> Option<(u16, u16)> {
        self.overlaps(other)
            .then(|| (self.row.max(other.row), self.col.max(other.col)))
    }
}

// ---------------------------------------------------------------------------
// Kind and details
// ---------------------------------------------------------------------------

/// What a cell represents on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CellKind {
    /// A sellable product; always named.
    Product { name: String },
    /// A category title tile. Its symbol usually equals a category key.
    CategoryHeader,
    /// Transparent filler that keeps the irregular shape; never painted.
    Spacer,
}

/// Optional descriptive and visual fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_image_ref: Option<String>,
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single entry on the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub id: CellId,
    pub footprint: Footprint,
    pub symbol: String,
    pub background_ref: String,
    #[serde(flatten)]
    pub kind: CellKind,
    #[serde(flatten)]
    pub details: CellDetails,
}

impl Cell {
    /// Create a product cell at `(row, col)`.
    pub fn product(
        row: u16,
        col: u16,
        symbol: impl Into<String>,
        name: impl Into<String>,
        background_ref: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            row,
            col,
            symbol.into(),
            background_ref.into(),
            CellKind::Product { name: name.into() },
        )
    }

    /// Create a category header cell at `(row, col)`.
    pub fn header(
        row: u16,
        col: u16,
        symbol: impl Into<String>,
        background_ref: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            row,
            col,
            symbol.into(),
            background_ref.into(),
            CellKind::CategoryHeader,
        )
    }

    /// Create a spacer cell at `(row, col)`.
    pub fn spacer(row: u16, col: u16, background_ref: impl Into<String>) -> Self {
        let mut cell = Self::with_kind(
            row,
            col,
            String::new(),
            background_ref.into(),
            CellKind::Spacer,
        );
        cell.id = CellId::new(row, col, "spacer");
        cell
    }

    fn with_kind(
        row: u16,
        col: u16,
        symbol: String,
        background_ref: String,
        kind: CellKind,
    ) -> Self {
        Self {
            id: CellId::new(row, col, symbol.clone()),
            footprint: Footprint::new(row, col),
            symbol,
            background_ref,
            kind,
            details: CellDetails::default(),
        }
    }

    /// Set column and row spans (builder).
    pub fn with_span(mut self, col_span: u16, row_span: u16) -> Self {
        self.footprint = self.footprint.with_span(col_span, row_span);
        self
    }

    /// Set the meta badge (builder).
    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.details.meta = Some(meta.into());
        self
    }

    /// Set the product image (builder).
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.details.image_ref = Some(image_ref.into());
        self
    }

    /// Set the photo-mode tile image (builder).
    pub fn with_cell_image(mut self, cell_image_ref: impl Into<String>) -> Self {
        self.details.cell_image_ref = Some(cell_image_ref.into());
        self
    }

    /// Product name, if this is a product cell.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            CellKind::Product { name } => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn is_product(&self) -> bool {
        matches!(self.kind, CellKind::Product { .. })
    }

    #[inline]
    pub fn is_category_header(&self) -> bool {
        matches!(self.kind, CellKind::CategoryHeader)
    }

    #[inline]
    pub fn is_spacer(&self) -> bool {
        matches!(self.kind, CellKind::Spacer)
    }

    /// Primary label: the name when present, otherwise the symbol.
    pub fn display_label(&self) -> &str {
        self.name().unwrap_or(&self.symbol)
    }

    pub fn meta(&self) -> Option<&str> {
        self.details.meta.as_deref()
    }
}
