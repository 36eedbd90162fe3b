//! Spatial data structures
//!
//! This module contains:
//! - Integer rectangles and their adjacency predicates
//! - Room layouts and their invariants
//! - Pixel masks with connected-component utilities

/// Rectangles and overlap, gap and adjacency predicates
pub mod geometry;
/// Room layouts, room kinds and layout validation
pub mod layout;
/// Binary pixel masks
pub mod mask;

pub use layout::Layout;
