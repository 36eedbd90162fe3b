//! Reference raster rendering of room layouts
//!
//! The output follows the visual contract the raster analysis expects: white
//! floor, a thick dark outer boundary, palette room fills with thin dark
//! outlines, and optional black labels. Stairs are pixel-space annotations
//! added by the feature placer, so the renderer ignores them.

use crate::io::configuration::{
    RENDER_BOUNDARY_PX, RENDER_CELL_PX, RENDER_MARGIN_PX, RENDER_OUTLINE_PX,
};
use crate::io::labels::LabelWriter;
use crate::io::palette::Palette;
use crate::spatial::geometry::Rect;
use crate::spatial::layout::{Layout, RoomKind};
use image::RgbImage;
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect as PixelRect;

/// Draws layouts in grid units onto pixel images
pub struct Renderer {
    palette: Palette,
    labels: LabelWriter,
    cell_px: u32,
    margin_px: u32,
    boundary_px: u32,
    outline_px: u32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Palette::default(), LabelWriter::disabled())
    }
}

impl Renderer {
    /// Renderer with the default cell size, margin and boundary width
    pub const fn new(palette: Palette, labels: LabelWriter) -> Self {
        Self {
            palette,
            labels,
            cell_px: RENDER_CELL_PX,
            margin_px: RENDER_MARGIN_PX,
            boundary_px: RENDER_BOUNDARY_PX,
            outline_px: RENDER_OUTLINE_PX,
        }
    }

    /// Pixels per grid unit
    pub const fn with_cell_px(mut self, cell_px: u32) -> Self {
        self.cell_px = cell_px;
        self
    }

    /// Palette the renderer paints with
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Image size in pixels for a canvas in grid units
    pub fn image_size(&self, canvas_width: i32, canvas_height: i32) -> (u32, u32) {
        let side = |units: i32| units.max(0) as u32 * self.cell_px + 2 * self.margin_px;
        (side(canvas_width), side(canvas_height))
    }

    /// Pixel rectangle covered by a grid-unit rectangle
    pub fn to_pixels(&self, rect: &Rect<i32>) -> Rect<i32> {
        let (cell, margin) = (self.cell_px as i32, self.margin_px as i32);
        Rect::new(
            margin + rect.x * cell,
            margin + rect.y * cell,
            rect.width * cell,
            rect.height * cell,
        )
    }

    /// Render `layout` on a canvas of the given grid size
    pub fn render(&self, layout: &Layout, canvas_width: i32, canvas_height: i32) -> RgbImage {
        let (width, height) = self.image_size(canvas_width, canvas_height);
        let mut image = RgbImage::from_pixel(width, height, self.palette.open);

        for (label, rect) in layout.rooms() {
            let pixels = self.to_pixels(rect);
            let Some(area) = pixel_rect(&pixels) else {
                continue;
            };
            let fill = self.palette.room_color(RoomKind::of(label));
            draw_filled_rect_mut(&mut image, area, fill);
            self.draw_rings(&mut image, &pixels, self.outline_px);

            let centre_x = area.left() + area.width() as i32 / 2;
            let centre_y = area.top() + area.height() as i32 / 2;
            self.labels.draw(
                &mut image,
                centre_x - self.cell_px as i32,
                centre_y,
                label,
                self.palette.text,
            );
        }

        let floor = self.to_pixels(&Rect::new(0, 0, canvas_width, canvas_height));
        self.draw_rings(&mut image, &floor, self.boundary_px);

        image
    }

    // Boundary ink of the given thickness along the inside of `outer`
    fn draw_rings(&self, image: &mut RgbImage, outer: &Rect<i32>, thickness: u32) {
        for inset in 0..thickness as i32 {
            let ring = Rect::new(
                outer.x + inset,
                outer.y + inset,
                outer.width - 2 * inset,
                outer.height - 2 * inset,
            );
            if let Some(ring) = pixel_rect(&ring) {
                draw_hollow_rect_mut(image, ring, self.palette.boundary);
            }
        }
    }
}

fn pixel_rect(rect: &Rect<i32>) -> Option<PixelRect> {
    rect.has_positive_size()
        .then(|| PixelRect::at(rect.x, rect.y).of_size(rect.width as u32, rect.height as u32))
}
