//! Search for a stairs position inside the open area
//!
//! Two strategies run in order. The radial search probes a ring of anchors
//! around every open-area boundary point that is clear of room fills. If no
//! probe fits, the longest run of such free boundary points is treated as a
//! wall and the marker is offset from its midpoint along the wall normal.

use crate::analysis::masks::OpenArea;
use crate::io::configuration::{
    FREE_WALL_REACH, RADIAL_ANGLE_STEP_DEG, RADIAL_DISTANCES, SEGMENT_JOIN_DISTANCE,
    STAIRS_HEIGHT, STAIRS_WIDTH, WALL_OFFSET,
};
use crate::math::polyline::{arc_length_midpoint, distance, local_normal, polyline_length};
use crate::spatial::geometry::Rect;
use crate::spatial::mask::Mask;

/// Tunable parameters of the stairs search
#[derive(Debug, Clone, PartialEq)]
pub struct PlacerConfig {
    /// Marker width in pixels
    pub stairs_width: i32,
    /// Marker height in pixels
    pub stairs_height: i32,
    /// Radial probe distances in pixels
    pub radial_distances: Vec<i32>,
    /// Angular step between probes in degrees
    pub angle_step_deg: usize,
    /// Maximum gap between consecutive points of one wall run
    pub segment_join_distance: f64,
    /// Offset from the wall midpoint to the marker anchor
    pub wall_offset: f64,
    /// Room fill within this many pixels makes a boundary point non-free
    pub free_wall_reach: i32,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            stairs_width: STAIRS_WIDTH,
            stairs_height: STAIRS_HEIGHT,
            radial_distances: RADIAL_DISTANCES.to_vec(),
            angle_step_deg: RADIAL_ANGLE_STEP_DEG,
            segment_join_distance: SEGMENT_JOIN_DISTANCE,
            wall_offset: WALL_OFFSET,
            free_wall_reach: FREE_WALL_REACH,
        }
    }
}

impl PlacerConfig {
    /// Marker rectangle anchored at its top-left corner
    pub const fn marker_at(&self, x: i32, y: i32) -> Rect<i32> {
        Rect::new(x, y, self.stairs_width, self.stairs_height)
    }
}

/// Whether `rect` lies on the image, entirely in `open` and clear of `color`
pub fn can_place(rect: &Rect<i32>, open: &Mask, color: &Mask) -> bool {
    if rect.x < 0
        || rect.y < 0
        || rect.right() > open.width() as i32
        || rect.bottom() > open.height() as i32
    {
        return false;
    }
    open.count_in_rect(rect) == rect.area() as usize && color.count_in_rect(rect) == 0
}

/// Open-area boundary points with no room fill within `reach` pixels
///
/// Rendered rooms are framed by a dark outline, so the reach has to span the
/// outline for a wall shared with a room to count as occupied.
pub fn free_points(boundary: &[[i32; 2]], color: &Mask, reach: i32) -> Vec<[i32; 2]> {
    boundary
        .iter()
        .copied()
        .filter(|&[x, y]| !color.touches_within(x, y, reach))
        .collect()
}

/// First marker that fits on a ring around a free boundary point
///
/// Points are visited in boundary order, then distances outward, then angles
/// counter-clockwise in image coordinates from the positive x axis.
pub fn radial_search(
    boundary: &[[i32; 2]],
    open: &Mask,
    color: &Mask,
    config: &PlacerConfig,
) -> Option<Rect<i32>> {
    let step = config.angle_step_deg.max(1);
    for [x, y] in free_points(boundary, color, config.free_wall_reach) {
        for &reach in &config.radial_distances {
            for degrees in (0..360).step_by(step) {
                let theta = (degrees as f64).to_radians();
                let anchor_x = (f64::from(x) + f64::from(reach) * theta.cos()).trunc() as i32;
                let anchor_y = (f64::from(y) + f64::from(reach) * theta.sin()).trunc() as i32;
                let rect = config.marker_at(anchor_x, anchor_y);
                if can_place(&rect, open, color) {
                    return Some(rect);
                }
            }
        }
    }
    None
}

/// Runs of consecutive free boundary points, each with more than one point
pub fn wall_segments(free: &[[i32; 2]], join_distance: f64) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();

    for &[x, y] in free {
        let point = [f64::from(x), f64::from(y)];
        if let Some(&previous) = current.last()
            && distance(previous, point) >= join_distance
        {
            segments.push(std::mem::take(&mut current));
        }
        current.push(point);
    }
    segments.push(current);

    segments.retain(|segment| segment.len() > 1);
    segments
}

/// Marker offset from the midpoint of the longest free wall run
///
/// The normal side that keeps the marker in the open area is taken; the left
/// normal `(-dy, dx)` is tried first.
pub fn free_wall_search(
    boundary: &[[i32; 2]],
    open: &Mask,
    color: &Mask,
    config: &PlacerConfig,
) -> Option<Rect<i32>> {
    let free = free_points(boundary, color, config.free_wall_reach);
    if free.len() < 2 {
        return None;
    }

    let segments = wall_segments(&free, config.segment_join_distance);
    let longest = segments.iter().fold(None, |best: Option<&Vec<[f64; 2]>>, segment| {
        match best {
            Some(best) if polyline_length(best) >= polyline_length(segment) => Some(best),
            _ => Some(segment),
        }
    })?;

    let midpoint = arc_length_midpoint(longest)?;
    let normal = local_normal(longest, midpoint)?;

    [1.0, -1.0].into_iter().find_map(|side: f64| {
        let anchor_x = (midpoint[0] + side * config.wall_offset * normal[0]).trunc() as i32;
        let anchor_y = (midpoint[1] + side * config.wall_offset * normal[1]).trunc() as i32;
        let rect = config.marker_at(anchor_x, anchor_y);
        can_place(&rect, open, color).then_some(rect)
    })
}

/// Stairs position in `open_area`: radial search, then the free wall fallback
pub fn find_stairs_placement(
    open_area: &OpenArea,
    color: &Mask,
    config: &PlacerConfig,
) -> Option<Rect<i32>> {
    let boundary = open_area.contour.points();
    radial_search(boundary, &open_area.mask, color, config)
        .or_else(|| free_wall_search(boundary, &open_area.mask, color, config))
}
