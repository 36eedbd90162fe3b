//! Axis-aligned rectangles and the placement predicates used by the layout search
//!
//! Rectangles are generic over their coordinate type so that the same predicates
//! serve integer grid layouts and fractional geometry. Edges that merely touch do
//! not overlap, which is what allows rooms to share walls.

use num_traits::{Num, ToPrimitive};
use serde::{Deserialize, Serialize};

/// Floating-point tolerance for edge equality in adjacency tests
pub const EDGE_TOLERANCE: f64 = 1e-4;

/// Numeric types usable as rectangle coordinates
pub trait Coordinate: Num + ToPrimitive + PartialOrd + Copy {}

impl<T> Coordinate for T where T: Num + ToPrimitive + PartialOrd + Copy {}

/// Axis-aligned rectangle anchored at its minimum corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect<T = i32> {
    /// Minimum x coordinate
    pub x: T,
    /// Minimum y coordinate
    pub y: T,
    /// Extent along x
    pub width: T,
    /// Extent along y
    pub height: T,
}

impl<T: Coordinate> Rect<T> {
    /// Create a rectangle from its minimum corner and extent
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Maximum x coordinate (exclusive edge)
    pub fn right(&self) -> T {
        self.x + self.width
    }

    /// Maximum y coordinate (exclusive edge)
    pub fn bottom(&self) -> T {
        self.y + self.height
    }

    /// Area covered by the rectangle
    pub fn area(&self) -> T {
        self.width * self.height
    }

    /// Whether both extents are strictly positive
    pub fn has_positive_size(&self) -> bool {
        self.width > T::zero() && self.height > T::zero()
    }

    /// Whether the rectangle lies within `[0, width] x [0, height]`
    pub fn fits_within(&self, width: T, height: T) -> bool {
        self.x >= T::zero()
            && self.y >= T::zero()
            && self.right() <= width
            && self.bottom() <= height
    }
}

/// True unless the rectangles are separated along x or y
///
/// Edge contact counts as separation.
pub fn overlap<T: Coordinate>(a: &Rect<T>, b: &Rect<T>) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// True if the rectangles are at least `gap` apart along x or y
pub fn min_gap<T: Coordinate>(a: &Rect<T>, b: &Rect<T>, gap: T) -> bool {
    a.right() + gap <= b.x
        || b.right() + gap <= a.x
        || a.bottom() + gap <= b.y
        || b.bottom() + gap <= a.y
}

/// True if the rectangles share a common edge segment of positive length
///
/// Corner contact is not adjacency.
pub fn flush_adjacent<T: Coordinate>(a: &Rect<T>, b: &Rect<T>) -> bool {
    let (a_left, a_right) = (as_f64(a.x), as_f64(a.right()));
    let (a_top, a_bottom) = (as_f64(a.y), as_f64(a.bottom()));
    let (b_left, b_right) = (as_f64(b.x), as_f64(b.right()));
    let (b_top, b_bottom) = (as_f64(b.y), as_f64(b.bottom()));

    let vertical_span = a_bottom.min(b_bottom) - a_top.max(b_top);
    let horizontal_span = a_right.min(b_right) - a_left.max(b_left);

    let shares_vertical_edge = (a_right - b_left).abs() < EDGE_TOLERANCE
        || (b_right - a_left).abs() < EDGE_TOLERANCE;
    let shares_horizontal_edge = (a_bottom - b_top).abs() < EDGE_TOLERANCE
        || (b_bottom - a_top).abs() < EDGE_TOLERANCE;

    (shares_vertical_edge && vertical_span > 0.0)
        || (shares_horizontal_edge && horizontal_span > 0.0)
}

// NaN makes every comparison false, so unrepresentable values never match
fn as_f64<T: Coordinate>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
