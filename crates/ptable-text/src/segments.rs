#![forbid(unsafe_code)]

//! Chemical symbol segmentation.
//!
//! Digit runs in a symbol or structure string render as subscripts
//! (`"H2SO4"` is H, ₂, SO, ₄). The painter gets the runs; how a subscript
//! is drawn is its business.

use serde::Serialize;
use smallvec::SmallVec;

/// One run of a segmented symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum SymbolRun<'a> {
    Text(&'a str),
    Subscript(&'a str),
}

impl<'a> SymbolRun<'a> {
    #[inline]
    pub fn as_str(&self) -> &'a str {
        match *self {
            Self::Text(s) | Self::Subscript(s) => s,
        }
    }

    #[inline]
    pub fn is_subscript(&self) -> bool {
        matches!(self, Self::Subscript(_))
    }
}

/// Runs of a short symbol; most symbols fit inline.
pub type SymbolRuns<'a> = SmallVec<[SymbolRun<'a>; 4]>;

/// Split `symbol` into alternating text and ASCII-digit runs.
#[must_use]
pub fn symbol_segments(symbol: &str) -> SymbolRuns<'_> {
    let mut runs = SymbolRuns::new();
    let mut start = 0;
    let mut in_digits = false;

    for (i, b) in symbol.bytes().enumerate() {
        let digit = b.is_ascii_digit();
        if i > start && digit != in_digits {
            runs.push(run(&symbol[start..i], in_digits));
            start = i;
        }
        in_digits = digit;
    }
    if start < symbol.len() {
        runs.push(run(&symbol[start..], in_digits));
    }
    runs
}

fn run(text: &str, digits: bool) -> SymbolRun<'_> {
    if digits {
        SymbolRun::Subscript(text)
    } else {
        SymbolRun::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SymbolRun::{Subscript, Text};

    #[test]
    fn sulfuric_acid() {
        assert_eq!(
            symbol_segments("H2SO4").as_slice(),
            &[Text("H"), Subscript("2"), Text("SO"), Subscript("4")]
        );
    }

    #[test]
    fn leading_and_multi_digit_runs() {
        assert_eq!(
            symbol_segments("2C12H22O11").as_slice(),
            &[
                Subscript("2"),
                Text("C"),
                Subscript("12"),
                Text("H"),
                Subscript("22"),
                Text("O"),
                Subscript("11")
            ]
        );
    }

    #[test]
    fn plain_and_empty() {
        assert_eq!(symbol_segments("NaCl").as_slice(), &[Text("NaCl")]);
        assert!(symbol_segments("").is_empty());
    }

    #[test]
    fn non_ascii_text_stays_whole() {
        let runs = symbol_segments("Ácido 2");
        assert_eq!(runs.as_slice(), &[Text("Ácido "), Subscript("2")]);
        assert_eq!(runs.iter().map(SymbolRun::as_str).collect::<String>(), "Ácido 2");
    }
}
