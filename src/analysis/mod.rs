//! Analysis of rendered floorplan images

/// Stairs, living room and porch annotation
pub mod annotate;
/// External contour tracing and contour area
pub mod contours;
/// Floor, room colour and open-area masks
pub mod masks;
/// Radial and free-wall stairs search
pub mod placement;
