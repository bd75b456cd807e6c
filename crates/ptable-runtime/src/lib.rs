#![forbid(unsafe_code)]

//! Interaction runtime for the periodic catalog grid.
//!
//! Ties the registries, layout, and search together behind a
//! single-threaded message loop:
//!
//! - [`focus`] - category filter, search focus, and highlight classification
//! - [`hover`] - pointer hover and preview target selection
//! - [`frame`] - painter-facing snapshot with fills and corner treatments
//! - [`resize`] - container width as an injected capability
//! - [`view`] - [`CatalogView`], which owns all of the above
//!
//! Every pure step ([`focus::reduce`], [`frame::build_frame`]) is usable on
//! its own; [`CatalogView`] only adds the caches and the bookkeeping.

pub mod focus;
pub mod frame;
pub mod hover;
pub mod resize;
pub mod view;

pub use focus::{FocusController, FocusEvent, FocusState, HighlightFlags, classify, reduce};
pub use frame::{
    CatalogFrame, CellFill, CellFrame, CornerTreatment, DEFAULT_USAGE, FrameInputs,
    ParseViewModeError, PreviewPanel, ViewMode, build_frame, resolve_fill,
};
pub use hover::{HoverState, preview_target};
pub use resize::{ListenerId, ManualWidthSource, WidthListener, WidthSource};
pub use view::{CatalogMsg, CatalogView};
