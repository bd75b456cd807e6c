#![forbid(unsafe_code)]

//! Stateful catalog view.
//!
//! [`CatalogView`] owns a loaded [`Catalog`] together with its layout memo,
//! search index, suggestion memo, focus, and hover. Hosts feed it
//! [`CatalogMsg`]s one at a time and ask for a [`CatalogFrame`] whenever
//! [`update`](CatalogView::update) reports a change.
//!
//! # Example
//!
//! ```
//! use ptable_core::{CatalogConfig, sample};
//! use ptable_runtime::{CatalogMsg, CatalogView};
//!
//! let catalog = sample::catalog().unwrap();
//! let mut view = CatalogView::new(catalog, CatalogConfig::default());
//! view.update(CatalogMsg::Resize(1280.0));
//! view.update(CatalogMsg::EditQuery("soda".into()));
//! assert!(view.update(CatalogMsg::SubmitSearch));
//!
//! let frame = view.frame();
//! assert_eq!(frame.preview.unwrap().name, Some("Soda Cáustica"));
//! ```

use std::sync::Arc;

use ptable_core::{Catalog, CatalogConfig, CellId};
use ptable_layout::{GridGeometry, LayoutCache, LayoutCacheStats, LayoutEngine};
use ptable_text::{CacheStats, SearchIndex, Suggestion, SuggestionCache};

use crate::focus::{FocusController, FocusEvent, FocusState};
use crate::frame::{CatalogFrame, FrameInputs, ViewMode, build_frame};
use crate::hover::HoverState;
use crate::resize::WidthSource;

/// Messages accepted by [`CatalogView::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogMsg {
    /// Container content-box width changed.
    Resize(f64),
    SelectCategory(String),
    EditQuery(String),
    PickSuggestion { cell: CellId, display: String },
    SubmitSearch,
    HoverEnter(CellId),
    HoverLeave,
    SetViewMode(ViewMode),
}

impl From<FocusEvent> for CatalogMsg {
    fn from(event: FocusEvent) -> Self {
        match event {
            FocusEvent::SelectCategory(key) => Self::SelectCategory(key),
            FocusEvent::EditQuery(text) => Self::EditQuery(text),
            FocusEvent::PickSuggestion { cell, display } => Self::PickSuggestion { cell, display },
            FocusEvent::SubmitSearch => Self::SubmitSearch,
        }
    }
}

impl CatalogMsg {
    /// Pick message for a ranked suggestion.
    pub fn pick(suggestion: &Suggestion) -> Self {
        FocusEvent::pick(suggestion).into()
    }
}

/// Catalog, caches, and interaction state behind one message loop.
#[derive(Debug)]
pub struct CatalogView {
    catalog: Catalog,
    config: CatalogConfig,
    layout: LayoutCache,
    index: SearchIndex,
    suggestions: SuggestionCache,
    focus: FocusController,
    hover: HoverState,
    view_mode: ViewMode,
    width: f64,
}

impl CatalogView {
    /// Build a view at width 0 (the minimum usable width applies).
    pub fn new(catalog: Catalog, config: CatalogConfig) -> Self {
        let layout = LayoutCache::new(LayoutEngine::new(&config), config.layout_cache_capacity);
        let index = SearchIndex::for_catalog(&catalog, config.max_suggestions);
        let suggestions = SuggestionCache::new(config.search_cache_capacity);
        Self {
            catalog,
            config,
            layout,
            index,
            suggestions,
            focus: FocusController::new(),
            hover: HoverState::default(),
            view_mode: ViewMode::default(),
            width: 0.0,
        }
    }

    /// Builder-style initial width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = LayoutEngine::sanitize_width(width);
        self
    }

    /// Apply one message; returns whether anything visible changed.
    pub fn update(&mut self, msg: CatalogMsg) -> bool {
        let event = match msg {
            CatalogMsg::Resize(width) => return self.resize(width),
            CatalogMsg::HoverEnter(id) => {
                return match self.catalog.cells.get(&id) {
                    Some(cell) => self.hover.enter(cell),
                    None => false,
                };
            }
            CatalogMsg::HoverLeave => return self.hover.leave(),
            CatalogMsg::SetViewMode(mode) => {
                let changed = mode != self.view_mode;
                self.view_mode = mode;
                return changed;
            }
            CatalogMsg::SelectCategory(key) => FocusEvent::SelectCategory(key),
            CatalogMsg::EditQuery(text) => FocusEvent::EditQuery(text),
            CatalogMsg::PickSuggestion { cell, display } => FocusEvent::PickSuggestion { cell, display },
            CatalogMsg::SubmitSearch => FocusEvent::SubmitSearch,
        };
        self.focus.apply(&event, &self.catalog.cells, &self.index)
    }

    fn resize(&mut self, width: f64) -> bool {
        let width = LayoutEngine::sanitize_width(width);
        if width.to_bits() == self.width.to_bits() {
            return false;
        }
        tracing::trace!(from = self.width, to = width, "resize");
        self.width = width;
        true
    }

    /// Pull the current width from `source`.
    pub fn sync_width(&mut self, source: &dyn WidthSource) -> bool {
        self.resize(source.current_width())
    }

    /// Ranked suggestions for the current query.
    pub fn suggestions(&mut self) -> Arc<[Suggestion]> {
        self.suggestions.get_or_rank(&self.index, &self.focus.state().query)
    }

    /// Geometry for the current width.
    pub fn geometry(&mut self) -> Arc<GridGeometry> {
        self.layout.get_or_compute(self.width, &self.catalog.cells)
    }

    /// Paint snapshot for the current state.
    pub fn frame(&mut self) -> CatalogFrame<'_> {
        let geometry = self.layout.get_or_compute(self.width, &self.catalog.cells);
        build_frame(
            FrameInputs {
                catalog: &self.catalog,
                state: self.focus.state(),
                hover: &self.hover,
                view_mode: self.view_mode,
                fallback_color: self.config.fallback_color,
            },
            geometry,
        )
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &FocusState {
        self.focus.state()
    }

    #[inline]
    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    #[inline]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Sanitized container width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn layout_stats(&self) -> LayoutCacheStats {
        self.layout.stats()
    }

    pub fn search_stats(&self) -> CacheStats {
        self.suggestions.stats()
    }
}
