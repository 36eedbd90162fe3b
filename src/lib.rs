//! Evolutionary floorplan generation with raster-based feature placement
//!
//! Room layouts are evolved by a genetic algorithm whose mutation rate is
//! learned from user feedback. Rendered plans are then analysed as images to
//! place a stairs marker in the open living area and to paint the porch.

#![forbid(unsafe_code)]

/// Layout generation: population construction, genetic operators and the mutation rate bandit
pub mod algorithm;
/// Raster analysis of rendered plans and feature placement
pub mod analysis;
/// Input/output operations, rendering, persistence and error handling
pub mod io;
/// Polyline measurements used by the placement search
pub mod math;
/// Rectangles, layouts and pixel masks
pub mod spatial;

pub use io::error::{FloorplanError, Result};
