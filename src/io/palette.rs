//! Colour table shared by the renderer and the raster analysis
//!
//! Every colour the renderer paints is listed here together with the semantic
//! label the analysis recovers from it, so both sides read one table.

use crate::io::configuration::{
    BOUNDARY_THRESHOLD, NEAR_WHITE_LEVEL, ROOM_COLOR_TOLERANCE, STAIRS_COLOR_TOLERANCE,
};
use crate::spatial::layout::RoomKind;
use image::Rgb;

/// Semantic class of a rendered pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Wall or outline ink
    Boundary,
    /// Stairs marker
    Stairs,
    /// Fill of a room of this kind
    Room(RoomKind),
    /// Undecorated floor
    Open,
    /// Anything else, including text and anti-aliasing
    Unknown,
}

/// Fill colour of one room kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomColor {
    /// Room kind painted with this colour
    pub kind: RoomKind,
    /// Fill colour
    pub color: Rgb<u8>,
    /// Per-channel match tolerance
    pub tolerance: u8,
}

/// Visual contract between rendering and analysis
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Room fills in match priority order
    pub rooms: Vec<RoomColor>,
    /// Stairs marker colour
    pub stairs: Rgb<u8>,
    /// Per-channel tolerance when detecting stairs
    pub stairs_tolerance: u8,
    /// Colour painted outside the floorplan boundary
    pub porch: Rgb<u8>,
    /// Wall and outline colour
    pub boundary: Rgb<u8>,
    /// Undecorated floor colour
    pub open: Rgb<u8>,
    /// Label colour
    pub text: Rgb<u8>,
    /// Luma at or below which a pixel is boundary ink
    pub boundary_threshold: u8,
    /// Channel level at or above which a pixel is open floor
    pub near_white_level: u8,
}

impl Default for Palette {
    fn default() -> Self {
        let room = |kind, color| RoomColor {
            kind,
            color: Rgb(color),
            tolerance: ROOM_COLOR_TOLERANCE,
        };
        Self {
            rooms: vec![
                room(RoomKind::Washroom, [255, 255, 233]),
                room(RoomKind::Garage, [197, 227, 237]),
                room(RoomKind::Kitchen, [177, 243, 177]),
                room(RoomKind::Bedroom, [244, 166, 166]),
                room(RoomKind::Other, [214, 204, 232]),
            ],
            stairs: Rgb([200, 100, 200]),
            stairs_tolerance: STAIRS_COLOR_TOLERANCE,
            porch: Rgb([251, 245, 241]),
            boundary: Rgb([0, 0, 0]),
            open: Rgb([255, 255, 255]),
            text: Rgb([0, 0, 0]),
            boundary_threshold: BOUNDARY_THRESHOLD,
            near_white_level: NEAR_WHITE_LEVEL,
        }
    }
}

impl Palette {
    /// Fill colour for a room kind, falling back to the open floor colour
    pub fn room_color(&self, kind: RoomKind) -> Rgb<u8> {
        self.rooms
            .iter()
            .find(|entry| entry.kind == kind)
            .map_or(self.open, |entry| entry.color)
    }

    /// Room kind whose fill matches `pixel` within tolerance
    pub fn room_kind(&self, pixel: Rgb<u8>) -> Option<RoomKind> {
        self.rooms
            .iter()
            .find(|entry| within(pixel, entry.color, entry.tolerance))
            .map(|entry| entry.kind)
    }

    /// Whether `pixel` is dark enough to be boundary ink
    pub fn is_boundary(&self, pixel: Rgb<u8>) -> bool {
        luma(pixel) <= self.boundary_threshold
    }

    /// Whether every channel of `pixel` reaches the near-white level
    pub fn is_open(&self, pixel: Rgb<u8>) -> bool {
        pixel.0.iter().all(|&channel| channel >= self.near_white_level)
    }

    /// Whether `pixel` matches the stairs marker
    pub fn is_stairs(&self, pixel: Rgb<u8>) -> bool {
        within(pixel, self.stairs, self.stairs_tolerance)
    }

    /// Classify a pixel; boundary wins, then stairs, rooms and open floor
    pub fn classify_pixel(&self, pixel: Rgb<u8>) -> Surface {
        if self.is_boundary(pixel) {
            Surface::Boundary
        } else if self.is_stairs(pixel) {
            Surface::Stairs
        } else if let Some(kind) = self.room_kind(pixel) {
            Surface::Room(kind)
        } else if self.is_open(pixel) {
            Surface::Open
        } else {
            Surface::Unknown
        }
    }
}

/// Grayscale level with ITU-R BT.601 weights, rounded to nearest
pub fn luma(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let level = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    level.round().clamp(0.0, 255.0) as u8
}

/// Whether each channel of `pixel` is within `tolerance` of `target`
pub fn within(pixel: Rgb<u8>, target: Rgb<u8>, tolerance: u8) -> bool {
    pixel
        .0
        .iter()
        .zip(target.0.iter())
        .all(|(&a, &b)| a.abs_diff(b) <= tolerance)
}
