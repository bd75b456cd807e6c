#![forbid(unsafe_code)]

//! Focus state machine and highlight classification.
//!
//! Three inputs compete for the board's attention: the category filter, the
//! search query, and a picked suggestion. [`reduce`] folds one
//! [`FocusEvent`] into a new [`FocusState`]; [`classify`] turns a state into
//! per-cell [`HighlightFlags`].
//!
//! # Transitions
//!
//! | Event            | Category  | Focus        | Query         |
//! |------------------|-----------|--------------|---------------|
//! | `SelectCategory` | key       | cleared      | kept          |
//! | `EditQuery`      | kept      | cleared      | text          |
//! | `PickSuggestion` | `"all"`   | cell         | display text  |
//! | `SubmitSearch`   | as a pick of the top suggestion, else no-op |

use bitflags::bitflags;
use ptable_core::{ALL_CATEGORY_KEY, CategoryRegistry, Cell, CellId, CellRegistry};
use ptable_text::{SearchIndex, Suggestion};
use serde::Serialize;

/// The single authoritative interaction snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusState {
    pub active_category: String,
    pub focused: Option<CellId>,
    pub query: String,
}

impl Default for FocusState {
    fn default() -> Self {
        Self {
            active_category: ALL_CATEGORY_KEY.to_string(),
            focused: None,
            query: String::new(),
        }
    }
}

impl FocusState {
    /// Whether a category other than the sentinel is selected.
    #[inline]
    pub fn is_filtering(&self) -> bool {
        self.active_category != ALL_CATEGORY_KEY
    }

    /// Neither a focus nor a filter is active.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.focused.is_none() && !self.is_filtering()
    }
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusEvent {
    SelectCategory(String),
    EditQuery(String),
    PickSuggestion { cell: CellId, display: String },
    SubmitSearch,
}

impl FocusEvent {
    /// Pick event for a ranked suggestion, echoing its label.
    pub fn pick(suggestion: &Suggestion) -> Self {
        Self::PickSuggestion {
            cell: suggestion.handle.cell_id().clone(),
            display: suggestion.label.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectCategory(_) => "select_category",
            Self::EditQuery(_) => "edit_query",
            Self::PickSuggestion { .. } => "pick_suggestion",
            Self::SubmitSearch => "submit_search",
        }
    }
}

/// Apply one event to `state`.
///
/// Picks of unknown or spacer cells, and submits with no suggestions, return
/// the state unchanged.
#[must_use]
pub fn reduce(
    state: &FocusState,
    event: &FocusEvent,
    cells: &CellRegistry,
    index: &SearchIndex,
) -> FocusState {
    match event {
        FocusEvent::SelectCategory(key) => FocusState {
            active_category: key.clone(),
            focused: None,
            query: state.query.clone(),
        },
        FocusEvent::EditQuery(text) => FocusState {
            active_category: state.active_category.clone(),
            focused: None,
            query: text.clone(),
        },
        FocusEvent::PickSuggestion { cell, display } => pick(state, cell, display, cells),
        FocusEvent::SubmitSearch => match index.top(&state.query) {
            Some(top) => pick(state, top.handle.cell_id(), &top.label, cells),
            None => state.clone(),
        },
    }
}

fn pick(state: &FocusState, id: &CellId, display: &str, cells: &CellRegistry) -> FocusState {
    match cells.get(id) {
        Some(cell) if !cell.is_spacer() => FocusState {
            active_category: ALL_CATEGORY_KEY.to_string(),
            focused: Some(id.clone()),
            query: display.to_string(),
        },
        _ => {
            tracing::debug!(cell = %id, "pick of unknown cell ignored");
            state.clone()
        }
    }
}

/// Owns the current [`FocusState`] and reports whether events change it.
#[derive(Debug, Clone, Default)]
pub struct FocusController {
    state: FocusState,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// Apply `event`; returns `true` when the state changed.
    pub fn apply(&mut self, event: &FocusEvent, cells: &CellRegistry, index: &SearchIndex) -> bool {
        let _span = tracing::debug_span!("focus_apply", event = event.name()).entered();
        let next = reduce(&self.state, event, cells, index);
        let changed = next != self.state;
        if changed {
            tracing::debug!(
                category = %next.active_category,
                focused = ?next.focused.as_ref().map(ToString::to_string),
                "focus changed"
            );
            self.state = next;
        }
        changed
    }
}

bitflags! {
    /// Per-cell highlight classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct HighlightFlags: u8 {
        const FOCUSED        = 0b0001;
        const CATEGORY_MATCH = 0b0010;
        const HIGHLIGHTED    = 0b0100;
        const DIMMED         = 0b1000;
    }
}

impl HighlightFlags {
    #[inline]
    pub fn is_focused(self) -> bool {
        self.contains(Self::FOCUSED)
    }

    #[inline]
    pub fn is_highlighted(self) -> bool {
        self.contains(Self::HIGHLIGHTED)
    }

    #[inline]
    pub fn is_dimmed(self) -> bool {
        self.contains(Self::DIMMED)
    }
}

/// Classify one cell under `state`.
pub fn classify(state: &FocusState, cell: &Cell, categories: &CategoryRegistry) -> HighlightFlags {
    let mut flags = HighlightFlags::empty();
    if state.focused.as_ref() == Some(&cell.id) {
        flags |= HighlightFlags::FOCUSED;
    }
    if state.is_filtering() && categories.matches(&state.active_category, cell) {
        flags |= HighlightFlags::CATEGORY_MATCH;
    }
    if flags.intersects(HighlightFlags::FOCUSED | HighlightFlags::CATEGORY_MATCH) {
        flags |= HighlightFlags::HIGHLIGHTED;
    } else if !state.is_neutral() {
        flags |= HighlightFlags::DIMMED;
    }
    flags
}
