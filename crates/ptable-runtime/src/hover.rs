#![forbid(unsafe_code)]

//! Pointer hover and preview target selection.
//!
//! Hover never affects highlight or dim state. It only decides which cell
//! the preview panel describes when nothing is focused.

use ptable_core::{Cell, CellId};

use crate::focus::FocusState;

/// The product cell under the pointer, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<CellId>,
}

impl HoverState {
    /// Pointer entered `cell`. Only product cells are tracked; returns
    /// whether the hovered cell changed.
    pub fn enter(&mut self, cell: &Cell) -> bool {
        if !cell.is_product() || self.hovered.as_ref() == Some(&cell.id) {
            return false;
        }
        self.hovered = Some(cell.id.clone());
        true
    }

    /// Pointer left the board or a cell.
    pub fn leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    #[inline]
    pub fn hovered(&self) -> Option<&CellId> {
        self.hovered.as_ref()
    }
}

/// Cell described by the preview panel: the focus wins over the hover.
pub fn preview_target<'a>(focus: &'a FocusState, hover: &'a HoverState) -> Option<&'a CellId> {
    focus.focused.as_ref().or(hover.hovered())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_products_are_hoverable() {
        let mut hover = HoverState::default();
        assert!(!hover.enter(&Cell::header(2, 2, "AyD", "bg-[#8FC3FA]")));
        assert!(!hover.enter(&Cell::spacer(4, 4, "bg-transparent")));
        assert_eq!(hover.hovered(), None);

        let hcl = Cell::product(3, 3, "HCl", "Ácido Clorhídrico", "bg-[#BBDAFC]");
        assert!(hover.enter(&hcl));
        assert!(!hover.enter(&hcl));
        assert_eq!(hover.hovered(), Some(&hcl.id));
    }

    #[test]
    fn header_enter_keeps_previous_hover() {
        let mut hover = HoverState::default();
        let hcl = Cell::product(3, 3, "HCl", "Ácido Clorhídrico", "bg-[#BBDAFC]");
        hover.enter(&hcl);
        hover.enter(&Cell::header(2, 2, "AyD", "bg-[#8FC3FA]"));
        assert_eq!(hover.hovered(), Some(&hcl.id));
        assert!(hover.leave());
        assert!(!hover.leave());
    }

    #[test]
    fn focus_beats_hover() {
        let mut hover = HoverState::default();
        let hcl = Cell::product(3, 3, "HCl", "Ácido Clorhídrico", "bg-[#BBDAFC]");
        hover.enter(&hcl);

        let mut focus = FocusState::default();
        assert_eq!(preview_target(&focus, &hover), Some(&hcl.id));

        let naoh = CellId::new(4, 18, "NaOH");
        focus.focused = Some(naoh.clone());
        assert_eq!(preview_target(&focus, &hover), Some(&naoh));

        hover.leave();
        focus.focused = None;
        assert_eq!(preview_target(&focus, &hover), None);
    }
}
