#![forbid(unsafe_code)]

//! Load-time errors.
//!
//! Everything here is a configuration error detected while building the
//! registries. Once a [`Catalog`](crate::Catalog) exists, no operation on it
//! fails.

use std::fmt;

use crate::cell::CellId;

/// A malformed catalog document or registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The document is not valid JSON or does not match the schema.
    Parse(String),
    /// A span of zero rows or columns.
    ZeroSpan { cell: CellId },
    /// A span running past the last representable row or column.
    SpanOutOfRange { cell: CellId },
    /// A cell placed in the label row or column.
    ReservedSlot { cell: CellId },
    /// Two cells cover the same grid slot.
    Overlap {
        first: CellId,
        second: CellId,
        row: u16,
        col: u16,
    },
    /// Two cells resolve to the same identity.
    DuplicateCell(CellId),
    /// Two categories share a key.
    DuplicateCategory(String),
    /// A category with an empty key.
    EmptyCategoryKey,
    /// A string that does not parse as `"{row}-{col}-{tag}"`.
    InvalidCellId(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid catalog document: {msg}"),
            Self::ZeroSpan { cell } => write!(f, "cell {cell} has a zero span"),
            Self::SpanOutOfRange { cell } => {
                write!(f, "cell {cell} spans past the last grid row/column")
            }
            Self::ReservedSlot { cell } => {
                write!(f, "cell {cell} occupies the reserved label row/column")
            }
            Self::Overlap {
                first,
                second,
                row,
                col,
            } => write!(f, "cells {first} and {second} overlap at row {row}, col {col}"),
            Self::DuplicateCell(id) => write!(f, "duplicate cell identity {id}"),
            Self::DuplicateCategory(key) => write!(f, "duplicate category key {key:?}"),
            Self::EmptyCategoryKey => write!(f, "category with an empty key"),
            Self::InvalidCellId(raw) => write!(f, "invalid cell id {raw:?}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
