//! Tests for pixel classification against the colour table

#[cfg(test)]
mod tests {
    use floorgen::io::palette::{Palette, Surface, luma, within};
    use floorgen::spatial::layout::RoomKind;
    use image::Rgb;

    // Tests every room kind has a distinct fill that classifies back to it
    // Verified by giving two kinds the same colour
    #[test]
    fn test_room_colors_round_trip() {
        let palette = Palette::default();
        for kind in [
            RoomKind::Washroom,
            RoomKind::Garage,
            RoomKind::Kitchen,
            RoomKind::Bedroom,
            RoomKind::Other,
        ] {
            let color = palette.room_color(kind);
            assert_eq!(palette.room_kind(color), Some(kind));
            assert_eq!(palette.classify_pixel(color), Surface::Room(kind));
        }
    }

    // Tests colours match within tolerance only
    // Verified by using a strict inequality
    #[test]
    fn test_tolerance() {
        let palette = Palette::default();
        assert_eq!(palette.room_kind(Rgb([252, 174, 158])), Some(RoomKind::Bedroom));
        assert_eq!(palette.room_kind(Rgb([253, 166, 166])), None);
        assert!(palette.is_stairs(Rgb([210, 90, 190])));
        assert!(!palette.is_stairs(Rgb([211, 100, 200])));
        assert!(within(Rgb([5, 5, 5]), Rgb([0, 10, 5]), 5));
    }

    // Tests boundary, open floor and leftovers are told apart
    // Verified by checking open floor before boundaries
    #[test]
    fn test_classify_pixel() {
        let palette = Palette::default();
        assert_eq!(palette.classify_pixel(Rgb([0, 0, 0])), Surface::Boundary);
        assert_eq!(palette.classify_pixel(Rgb([40, 50, 40])), Surface::Boundary);
        assert_eq!(palette.classify_pixel(Rgb([255, 255, 255])), Surface::Open);
        assert_eq!(palette.classify_pixel(Rgb([241, 250, 245])), Surface::Open);
        assert_eq!(palette.classify_pixel(Rgb([200, 100, 200])), Surface::Stairs);
        assert_eq!(palette.classify_pixel(Rgb([128, 128, 128])), Surface::Unknown);
        assert_eq!(palette.classify_pixel(palette.porch), Surface::Open);
    }

    // Tests luma weights and rounding
    // Verified by averaging the channels
    #[test]
    fn test_luma() {
        assert_eq!(luma(Rgb([255, 255, 255])), 255);
        assert_eq!(luma(Rgb([0, 0, 0])), 0);
        assert_eq!(luma(Rgb([255, 0, 0])), 76);
        assert_eq!(luma(Rgb([0, 255, 0])), 150);
        assert_eq!(luma(Rgb([0, 0, 255])), 29);
    }
}
