//! Segmentation of a rendered floorplan into floor, room and open-area masks
//!
//! The floor is the filled region inside the largest dark outer boundary. Room
//! fills are matched against the palette inside that region, and the open area
//! is the largest near-white region left over.

use crate::analysis::contours::{Contour, largest_contour};
use crate::io::configuration::{
    FLOOR_MIN_CONTOUR_AREA, OPEN_AREA_MIN_CONTOUR_AREA, STAIRS_MIN_AREA,
};
use crate::io::palette::{Palette, Surface};
use crate::spatial::geometry::Rect;
use crate::spatial::mask::Mask;
use image::RgbImage;

/// The largest undecorated region of the floor
#[derive(Debug, Clone)]
pub struct OpenArea {
    /// Outer boundary in tracing order
    pub contour: Contour,
    /// Filled region
    pub mask: Mask,
}

impl OpenArea {
    /// Integer centroid of the filled region
    pub fn centroid(&self) -> Option<(i32, i32)> {
        self.mask
            .centroid()
            .map(|(x, y)| (x.trunc() as i32, y.trunc() as i32))
    }
}

/// Every mask the feature placer needs from one image
#[derive(Debug, Clone)]
pub struct FloorMasks {
    /// Filled floorplan region
    pub floor: Mask,
    /// Room fills inside the floor
    pub color: Mask,
    /// Largest open region, if one is big enough
    pub open_area: Option<OpenArea>,
}

/// Pixels the palette classifies as `wanted`
pub fn surface_mask(image: &RgbImage, palette: &Palette, wanted: fn(Surface) -> bool) -> Mask {
    Mask::from_fn(image.width(), image.height(), |x, y| {
        wanted(palette.classify_pixel(*image.get_pixel(x, y)))
    })
}

/// Pixels dark enough to be boundary ink
pub fn boundary_mask(image: &RgbImage, palette: &Palette) -> Mask {
    surface_mask(image, palette, |surface| surface == Surface::Boundary)
}

/// Filled region inside the largest boundary enclosing more than the minimum area
pub fn floor_mask(image: &RgbImage, palette: &Palette) -> Option<Mask> {
    let boundary = boundary_mask(image, palette);
    let contour = largest_contour(&boundary)?;
    if contour.area() <= FLOOR_MIN_CONTOUR_AREA {
        return None;
    }
    Some(contour.filled(&boundary))
}

/// Floor pixels matching any room fill colour
pub fn color_mask(image: &RgbImage, palette: &Palette, floor: &Mask) -> Mask {
    surface_mask(image, palette, |surface| matches!(surface, Surface::Room(_))).intersect(floor)
}

/// Largest near-white region of the floor
pub fn open_area(image: &RgbImage, palette: &Palette, floor: &Mask) -> Option<OpenArea> {
    let white = surface_mask(image, palette, |surface| surface == Surface::Open).intersect(floor);
    let contour = largest_contour(&white)?;
    if contour.area() < OPEN_AREA_MIN_CONTOUR_AREA {
        return None;
    }
    let mask = contour.filled(&white);
    Some(OpenArea { contour, mask })
}

/// Floor, colour and open-area masks; `None` when no floorplan boundary is found
pub fn extract(image: &RgbImage, palette: &Palette) -> Option<FloorMasks> {
    let floor = floor_mask(image, palette)?;
    let color = color_mask(image, palette, &floor);
    let open_area = open_area(image, palette, &floor);
    Some(FloorMasks {
        floor,
        color,
        open_area,
    })
}

/// Bounding box of the largest stairs-coloured region
///
/// Regions smaller than the minimum marker area are ignored.
pub fn detect_stairs(image: &RgbImage, palette: &Palette) -> Option<Rect<i32>> {
    let marker = surface_mask(image, palette, |surface| surface == Surface::Stairs);
    let region = largest_contour(&marker)?.filled(&marker);
    if region.count() < STAIRS_MIN_AREA {
        return None;
    }
    region.bounding_rect()
}
