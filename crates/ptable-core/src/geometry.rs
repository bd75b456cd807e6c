#![forbid(unsafe_code)]

//! Pixel-space geometric primitives.

use serde::Serialize;

/// A point in container pixels (origin at the board's top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PxPoint {
    pub x: f64,
    pub y: f64,
}

impl PxPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PxRect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PxRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: PxPoint) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Whether the interiors of two rectangles overlap.
    ///
    /// Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &PxRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> PxPoint {
        PxPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
