#![forbid(unsafe_code)]

//! Search-key normalization.
//!
//! Lowercases, decomposes to NFD, drops the combining diacritical marks block
//! (U+0300..=U+036F), and trims. `"Ácido"` and `"acido"` map to the same key.
//!
//! ```
//! use ptable_text::normalize;
//!
//! assert_eq!(normalize("  Ácido Sulfúrico "), "acido sulfurico");
//! assert_eq!(normalize("Ñandú"), "nandu");
//! ```

use unicode_normalization::UnicodeNormalization;

#[inline]
fn is_stripped_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Normalize text for accent- and case-insensitive matching.
#[must_use]
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|&c| !is_stripped_mark(c))
        .collect();
    match folded.trim() {
        trimmed if trimmed.len() == folded.len() => folded,
        trimmed => trimmed.to_string(),
    }
}
