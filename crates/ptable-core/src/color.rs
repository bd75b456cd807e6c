#![forbid(unsafe_code)]

//! Colour extraction from background references.
//!
//! Background references are opaque to the core, but the photo-mode fallback
//! needs a literal colour. References of the form `bg-[#RRGGBB]` embed one;
//! anything else falls back to a neutral constant.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Neutral colour used when no hex code can be extracted.
pub const DEFAULT_FALLBACK_COLOR: HexColor = HexColor::rgb(0xf0, 0xf0, 0xf0);

static BG_HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"bg-\[#([0-9A-Fa-f]{6})\]").expect("background pattern is valid")
});

/// A 24-bit colour, displayed as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Extract the first embedded `bg-[#RRGGBB]` colour, if any.
pub fn extract_hex_color(background_ref: &str) -> Option<HexColor> {
    BG_HEX
        .captures(background_ref)
        .and_then(|caps| caps.get(1))
        .and_then(|m| HexColor::parse(m.as_str()))
}

/// Extract the embedded colour or return `fallback`.
pub fn fill_color(background_ref: &str, fallback: HexColor) -> HexColor {
    extract_hex_color(background_ref).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_embedded_hex() {
        assert_eq!(
            extract_hex_color("bg-[#8FC3FA]"),
            Some(HexColor::rgb(0x8f, 0xc3, 0xfa))
        );
    }

    #[test]
    fn extracts_from_longer_class_lists() {
        let c = extract_hex_color("rounded bg-[#F9E990] text-slate-900").unwrap();
        assert_eq!(c.to_string(), "#f9e990");
    }

    #[test]
    fn unmatched_reference_falls_back() {
        assert_eq!(extract_hex_color("bg-transparent"), None);
        assert_eq!(extract_hex_color("bg-[#12345]"), None);
        assert_eq!(extract_hex_color("bg-[#GGGGGG]"), None);
        assert_eq!(
            fill_color("bg-sky-200", DEFAULT_FALLBACK_COLOR).to_string(),
            "#f0f0f0"
        );
    }

    #[test]
    fn parse_accepts_optional_hash() {
        assert_eq!(HexColor::parse("#ffffff"), Some(HexColor::rgb(255, 255, 255)));
        assert_eq!(HexColor::parse("000000"), Some(HexColor::rgb(0, 0, 0)));
        assert_eq!(HexColor::parse("#fff"), None);
    }
}
