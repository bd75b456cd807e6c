#![forbid(unsafe_code)]

//! Painter-facing frame snapshot.
//!
//! A [`CatalogFrame`] is everything a renderer needs for one paint: cell
//! rectangles, display indices, highlight flags, fills for the active
//! [`ViewMode`], corner treatments, axis labels, the preview panel, and the
//! "filtering by" hint. It borrows from the catalog and is rebuilt after
//! every accepted message.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bitflags::bitflags;
use ptable_core::color::fill_color;
use ptable_core::{Catalog, Cell, CellId, HexColor, PxRect};
use ptable_layout::GridGeometry;
use ptable_text::{SymbolRun, symbol_segments};
use serde::Serialize;

use crate::focus::{FocusState, HighlightFlags, classify};
use crate::hover::{HoverState, preview_target};

/// Usage line shown when a product has none.
pub const DEFAULT_USAGE: &str = "Producto industrial";

/// Cosmetic toggle; never affects geometry or highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Colors,
    Photos,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::Photos => "photos",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised view mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseViewModeError(pub String);

impl fmt::Display for ParseViewModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view mode {:?} (expected colors or photos)", self.0)
    }
}

impl std::error::Error for ParseViewModeError {}

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "colors" | "colours" => Ok(Self::Colors),
            "photos" => Ok(Self::Photos),
            _ => Err(ParseViewModeError(s.to_string())),
        }
    }
}

/// How a cell's tile is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CellFill<'a> {
    /// The cell's background reference, painted as-is.
    Background(&'a str),
    /// An image reference.
    Image(&'a str),
    /// A literal colour (photo mode without an image).
    Color(HexColor),
    /// The painter's neutral photo-mode tile; no colour of its own.
    PhotoDefault,
}

/// Resolve the tile fill for `cell` under `mode`.
pub fn resolve_fill(cell: &Cell, mode: ViewMode, fallback: HexColor) -> CellFill<'_> {
    if mode == ViewMode::Colors {
        return CellFill::Background(&cell.background_ref);
    }
    if let Some(image) = cell.details.cell_image_ref.as_deref() {
        return CellFill::Image(image);
    }
    if cell.is_product()
        && let Some(image) = cell.details.image_ref.as_deref()
    {
        return CellFill::Image(image);
    }
    if cell.is_category_header() {
        return CellFill::PhotoDefault;
    }
    CellFill::Color(fill_color(&cell.background_ref, fallback))
}

bitflags! {
    /// Extra corner rounding for the board's irregular outline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct CornerTreatment: u8 {
        const EXTRA_TOP_LEFT  = 0b0001;
        const EXTRA_TOP_RIGHT = 0b0010;
        const CURVE_RIGHT     = 0b0100;
        const CURVE_LEFT      = 0b1000;
    }
}

impl CornerTreatment {
    /// Treatment keyed by display index.
    pub fn for_display_index(index: u32) -> Self {
        match index {
            1 | 2 => Self::EXTRA_TOP_LEFT | Self::EXTRA_TOP_RIGHT,
            4 => Self::EXTRA_TOP_RIGHT,
            5 => Self::EXTRA_TOP_LEFT,
            15 => Self::CURVE_RIGHT,
            16 => Self::CURVE_LEFT,
            _ => Self::empty(),
        }
    }
}

/// One painted cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFrame<'a> {
    pub id: &'a CellId,
    pub rect: PxRect,
    pub display_index: u32,
    pub symbol: Vec<SymbolRun<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub fill: CellFill<'a>,
    pub corners: CornerTreatment,
    pub highlight: HighlightFlags,
    pub is_focused: bool,
    pub is_highlighted: bool,
    pub is_dimmed: bool,
}

/// Detail card for the focused or hovered cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPanel<'a> {
    pub cell: &'a CellId,
    pub display_index: Option<u32>,
    pub symbol: Vec<SymbolRun<'a>>,
    pub name: Option<&'a str>,
    pub meta: Option<&'a str>,
    pub usage: &'a str,
    pub structure: Option<Vec<SymbolRun<'a>>>,
    pub image: Option<&'a str>,
    /// Large tile image, only in photo mode.
    pub tile_image: Option<&'a str>,
    pub rect: PxRect,
}

/// Complete paint snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFrame<'a> {
    pub view_mode: ViewMode,
    pub state: &'a FocusState,
    pub geometry: Arc<GridGeometry>,
    /// Content cells in configuration order.
    pub cells: Vec<CellFrame<'a>>,
    pub preview: Option<PreviewPanel<'a>>,
    /// Label of the active category, for a "filtering by" hint.
    pub category_hint: Option<&'a str>,
}

impl CatalogFrame<'_> {
    pub fn cell(&self, id: &CellId) -> Option<&CellFrame<'_>> {
        self.cells.iter().find(|c| c.id == id)
    }
}

/// Displayed symbol: the symbol, or the identity tag when it is empty.
fn shown_symbol(cell: &Cell) -> &str {
    if cell.symbol.is_empty() {
        cell.id.tag()
    } else {
        &cell.symbol
    }
}

/// Inputs to [`build_frame`].
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub catalog: &'a Catalog,
    pub state: &'a FocusState,
    pub hover: &'a HoverState,
    pub view_mode: ViewMode,
    pub fallback_color: HexColor,
}

/// Assemble the paint snapshot for `geometry`.
pub fn build_frame<'a>(inputs: FrameInputs<'a>, geometry: Arc<GridGeometry>) -> CatalogFrame<'a> {
    let FrameInputs {
        catalog,
        state,
        hover,
        view_mode,
        fallback_color,
    } = inputs;
    let _span = tracing::debug_span!("catalog_frame", mode = view_mode.as_str()).entered();

    let cells: Vec<CellFrame<'a>> = catalog
        .cells
        .content_cells()
        .filter_map(|cell| {
            let placed = geometry.cell(&cell.id)?;
            let highlight = classify(state, cell, &catalog.categories);
            Some(CellFrame {
                id: &cell.id,
                rect: placed.rect,
                display_index: placed.display_index,
                symbol: symbol_segments(shown_symbol(cell)).into_vec(),
                name: cell.name(),
                fill: resolve_fill(cell, view_mode, fallback_color),
                corners: CornerTreatment::for_display_index(placed.display_index),
                highlight,
                is_focused: highlight.is_focused(),
                is_highlighted: highlight.is_highlighted(),
                is_dimmed: highlight.is_dimmed(),
            })
        })
        .collect();

    let preview = preview_target(state, hover)
        .and_then(|id| catalog.cells.get(id))
        .filter(|cell| !cell.is_spacer())
        .map(|cell| PreviewPanel {
            cell: &cell.id,
            display_index: geometry.display_index(&cell.id),
            symbol: symbol_segments(shown_symbol(cell)).into_vec(),
            name: cell.name(),
            meta: cell.meta(),
            usage: cell.details.usage.as_deref().unwrap_or(DEFAULT_USAGE),
            structure: cell
                .details
                .structure
                .as_deref()
                .map(|s| symbol_segments(s).into_vec()),
            image: cell.details.image_ref.as_deref(),
            tile_image: match view_mode {
                ViewMode::Photos => cell.details.cell_image_ref.as_deref(),
                ViewMode::Colors => None,
            },
            rect: geometry.panel,
        });

    let category_hint = state
        .is_filtering()
        .then(|| catalog.categories.get(&state.active_category))
        .flatten()
        .map(|c| c.label.as_str());

    tracing::trace!(
        cells = cells.len(),
        preview = preview.is_some(),
        "frame assembled"
    );
    CatalogFrame {
        view_mode,
        state,
        geometry,
        cells,
        preview,
        category_hint,
    }
}
