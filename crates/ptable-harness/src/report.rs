#![forbid(unsafe_code)]

//! Frame rendering for the harness: a plain-text summary or JSON.

use std::fmt::{self, Write as _};

use ptable::{CatalogFrame, HighlightFlags, Suggestion};
use serde::Serialize;

/// Everything the harness prints after replaying a script.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub width: f64,
    pub suggestions: &'a [Suggestion],
    pub frame: &'a CatalogFrame<'a>,
}

impl Report<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_summary(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_summary(&mut out);
        out
    }

    fn write_summary(&self, out: &mut String) -> fmt::Result {
        let frame = self.frame;
        let geo = &frame.geometry;
        writeln!(
            out,
            "width {}px  cell {:.1}px  grid {:.0}x{:.0}  extents {}x{}  mode {}",
            self.width,
            geo.cell_size,
            geo.grid_width,
            geo.grid_height,
            geo.extents.max_col,
            geo.extents.max_row,
            frame.view_mode,
        )?;

        let state = frame.state;
        writeln!(
            out,
            "state: category={} focused={} query={:?}",
            state.active_category,
            state
                .focused
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            state.query,
        )?;
        if let Some(label) = frame.category_hint {
            writeln!(out, "filtering by {label}")?;
        }

        if !self.suggestions.is_empty() {
            writeln!(out, "suggestions:")?;
            for (i, s) in self.suggestions.iter().enumerate() {
                let detail = s.detail.as_deref().unwrap_or("");
                writeln!(out, "  {}. {} {} [{}]", i + 1, s.label, detail, s.score)?;
            }
        }

        writeln!(out, "cells:")?;
        let mut cells: Vec<_> = frame.cells.iter().collect();
        cells.sort_by_key(|c| c.display_index);
        for cell in cells {
            writeln!(
                out,
                "  {:>3} {:<14} {:>7.1} {:>7.1} {:>6.1}x{:<6.1} {}",
                cell.display_index,
                cell.id.to_string(),
                cell.rect.x,
                cell.rect.y,
                cell.rect.width,
                cell.rect.height,
                flag_marks(cell.highlight),
            )?;
        }

        match &frame.preview {
            Some(p) => writeln!(
                out,
                "preview: {} {} ({})",
                p.cell,
                p.name.unwrap_or(""),
                p.usage
            )?,
            None => writeln!(out, "preview: -")?,
        }
        Ok(())
    }
}

fn flag_marks(flags: HighlightFlags) -> &'static str {
    if flags.is_focused() {
        "focused"
    } else if flags.is_highlighted() {
        "highlighted"
    } else if flags.is_dimmed() {
        "dimmed"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptable::{CatalogConfig, CatalogMsg};

    fn view() -> ptable::CatalogView {
        ptable::open(ptable::core::sample::SAMPLE_CATALOG_JSON, CatalogConfig::default())
            .unwrap()
            .with_width(1280.0)
    }

    #[test]
    fn summary_lists_cells_in_display_order() {
        let mut v = view();
        v.update(CatalogMsg::SelectCategory("ByA".into()));
        let frame = v.frame();
        let report = Report {
            width: 1280.0,
            suggestions: &[],
            frame: &frame,
        };
        let text = report.to_summary();
        assert!(text.contains("filtering by Bases y álcalis"));
        let first = text.find("2-2-AyD").unwrap();
        let last = text.find("6-4-KOH").unwrap();
        assert!(first < last);
        assert!(text.contains("preview: -"));
    }

    #[test]
    fn json_has_frame_and_suggestions() {
        let mut v = view();
        v.update(CatalogMsg::EditQuery("etanol".into()));
        let suggestions = v.suggestions();
        let frame = v.frame();
        let report = Report {
            width: 1280.0,
            suggestions: &suggestions,
            frame: &frame,
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["suggestions"][0]["label"], "Etanol");
        assert_eq!(value["frame"]["viewMode"], "colors");
        assert_eq!(value["frame"]["cells"].as_array().unwrap().len(), 14);
    }
}
