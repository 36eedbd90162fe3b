//! Mathematical utilities for the placement search

/// Arc length, midpoints and normals of polylines
pub mod polyline;
