#![forbid(unsafe_code)]

//! Built-in category table of the distributor catalog.
//!
//! Used when a catalog document does not carry its own categories.

use crate::category::{Category, CategoryPalette};

/// Text colour shared by every non-sentinel chip.
const CHIP_TEXT: &str = "rgba(15, 23, 42, 0.92)";

/// `(key, label, dot, soft background, border, text, background hex codes)`.
type Row = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [&'static str],
);

const TABLE: &[Row] = &[
    (
        "all",
        "Todos",
        "#111827",
        "rgba(15, 23, 42, 0.92)",
        "rgba(15, 23, 42, 0.92)",
        "#ffffff",
        &[],
    ),
    (
        "AyD",
        "Ácidos y derivados",
        "#8FC3FA",
        "rgba(99, 176, 248, 0.12)",
        "rgba(99, 176, 248, 0.45)",
        CHIP_TEXT,
        &["8FC3FA", "BBDAFC"],
    ),
    (
        "AySA",
        "Alcoholes y soluciones alcohólicas",
        "#6FCA63",
        "rgba(68, 173, 37, 0.12)",
        "rgba(68, 173, 37, 0.45)",
        CHIP_TEXT,
        &["6FCA63", "8FD585"],
    ),
    (
        "SyCS",
        "Sales y compuestos de sodio",
        "#F3D839",
        "rgba(249, 226, 52, 0.14)",
        "rgba(249, 226, 52, 0.55)",
        CHIP_TEXT,
        &["F3D839", "F9E990"],
    ),
    (
        "TyS",
        "Tensioactivos y surfactantes",
        "#FA9B52",
        "rgba(250, 155, 82, 0.14)",
        "rgba(250, 155, 82, 0.50)",
        CHIP_TEXT,
        &["FA9B52", "FBBD8D"],
    ),
    (
        "SyD",
        "Solventes y disolventes",
        "#D09DF2",
        "rgba(208, 157, 242, 0.14)",
        "rgba(208, 157, 242, 0.55)",
        CHIP_TEXT,
        &["D09DF2", "E1C0F7"],
    ),
    (
        "PQPT",
        "Productos químicos para textiles",
        "#72DFF7",
        "rgba(111, 207, 236, 0.14)",
        "rgba(111, 207, 236, 0.55)",
        CHIP_TEXT,
        &["72DFF7", "90E5F9"],
    ),
    (
        "MPPDyL",
        "Materia prima para detergentes y limpiadores",
        "#CDA58E",
        "rgba(205, 165, 142, 0.14)",
        "rgba(205, 165, 142, 0.55)",
        CHIP_TEXT,
        &["CDA58E", "DBBEAD"],
    ),
    (
        "PPC",
        "Productos para construcción",
        "#AFACAC",
        "rgba(148, 137, 136, 0.14)",
        "rgba(148, 137, 136, 0.50)",
        CHIP_TEXT,
        &["AFACAC", "C6C3C3"],
    ),
    (
        "AByD",
        "Agentes blanqueadores y desinfectantes",
        "#E7A2DA",
        "rgba(231, 162, 218, 0.16)",
        "rgba(231, 162, 218, 0.55)",
        CHIP_TEXT,
        &["E7A2DA", "F0C6E9"],
    ),
    (
        "OQI",
        "Otros químicos industriales",
        "#8EACCD",
        "rgba(142, 172, 205, 0.16)",
        "rgba(142, 172, 205, 0.55)",
        CHIP_TEXT,
        &["8EACCD", "ADC4DB"],
    ),
    (
        "ByA",
        "Bases y álcalis",
        "#65ABF6",
        "rgba(101, 171, 246, 0.14)",
        "rgba(101, 171, 246, 0.55)",
        CHIP_TEXT,
        &["65ABF6", "90C3F9"],
    ),
    (
        "EAA",
        "Edulcorantes y aditivos alimentarios",
        "#B2EA43",
        "rgba(69, 156, 7, 0.14)",
        "rgba(69, 156, 7, 0.55)",
        CHIP_TEXT,
        &["B2EA43", "C3EF6C"],
    ),
    (
        "PyA",
        "Preservantes y aditivos",
        "#F5275B",
        "rgba(245, 39, 91, 0.14)",
        "rgba(245, 39, 91, 0.55)",
        CHIP_TEXT,
        &["F5275B", "F86388"],
    ),
    (
        "PNE",
        "Productos naturales y extractos",
        "#8F91FA",
        "rgba(143, 145, 250, 0.14)",
        "rgba(143, 145, 250, 0.55)",
        CHIP_TEXT,
        &["8F91FA", "BBBCFC"],
    ),
];

/// Build the table. Background references use the `bg-[#RRGGBB]` form.
pub fn categories() -> Vec<Category> {
    TABLE
        .iter()
        .map(|&(key, label, dot, soft, border, text, hexes)| {
            Category::new(key, label)
                .with_palette(CategoryPalette {
                    dot: dot.to_string(),
                    border: border.to_string(),
                    soft_background: soft.to_string(),
                    text: text.to_string(),
                })
                .with_backgrounds(hexes.iter().map(|hex| format!("bg-[#{hex}]")))
        })
        .collect()
}
