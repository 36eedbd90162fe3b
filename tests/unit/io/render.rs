//! Tests for layout rendering and its analysis contract

#[cfg(test)]
mod tests {
    use floorgen::analysis::masks::extract;
    use floorgen::io::palette::Palette;
    use floorgen::io::render::Renderer;
    use floorgen::spatial::geometry::Rect;
    use floorgen::spatial::layout::{Layout, RoomKind};
    use image::Rgb;

    fn kitchen_layout() -> Layout {
        let mut layout = Layout::new();
        layout.insert("Kitchen", Rect::new(1, 1, 3, 3));
        layout
    }

    // Tests image size and grid to pixel mapping include the margin
    // Verified by omitting the margin on one side
    #[test]
    fn test_pixel_mapping() {
        let renderer = Renderer::default();
        assert_eq!(renderer.image_size(20, 20), (440, 440));
        assert_eq!(renderer.to_pixels(&Rect::new(1, 2, 3, 4)), Rect::new(40, 60, 60, 80));

        let small = Renderer::default().with_cell_px(10);
        assert_eq!(small.image_size(20, 10), (240, 140));
    }

    // Tests fills, outlines, boundary and margin colours
    // Verified by drawing the boundary inside the floor
    #[test]
    fn test_render_colors() {
        let renderer = Renderer::default();
        let image = renderer.render(&kitchen_layout(), 20, 20);
        let palette = renderer.palette();

        assert_eq!(*image.get_pixel(70, 70), palette.room_color(RoomKind::Kitchen));
        assert_eq!(*image.get_pixel(40, 70), palette.boundary);
        assert_eq!(*image.get_pixel(22, 200), palette.boundary);
        assert_eq!(*image.get_pixel(419, 200), palette.boundary);
        assert_eq!(*image.get_pixel(10, 10), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(200, 200), palette.open);
    }

    // Tests stairs entries do not affect the rendered image
    // Verified by drawing stairs as a room
    #[test]
    fn test_stairs_not_rendered() {
        let renderer = Renderer::default();
        let mut with_stairs = kitchen_layout();
        with_stairs.set_stairs(Rect::new(10, 10, 2, 2));
        assert_eq!(
            renderer.render(&with_stairs, 20, 20),
            renderer.render(&kitchen_layout(), 20, 20)
        );
    }

    // Tests rendered plans segment into the expected floor and room masks
    // Verified by rendering a boundary thinner than the threshold colour
    #[test]
    fn test_render_analysis_contract() {
        let image = Renderer::default().render(&kitchen_layout(), 20, 20);
        let masks = extract(&image, &Palette::default()).unwrap();
        assert_eq!(masks.floor.count(), 400 * 400);
        assert_eq!(masks.color.count(), 58 * 58);
        assert!(masks.open_area.unwrap().mask.get(300, 300));
    }
}
