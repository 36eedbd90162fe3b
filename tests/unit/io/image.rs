//! Tests for PNG loading and saving

#[cfg(test)]
mod tests {
    use floorgen::io::error::FloorplanError;
    use floorgen::io::image::{is_png, load_rgb, save_rgb};
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::Path;

    // Tests saved images load back identically, with directories created
    // Verified by saving without creating the parent directory
    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/plan.png");
        let image = RgbImage::from_fn(8, 6, |x, y| Rgb([x as u8 * 30, y as u8 * 40, 7]));
        save_rgb(&image, &path).unwrap();
        assert_eq!(load_rgb(&path).unwrap(), image);
    }

    // Tests alpha channels are dropped on load
    // Verified by loading as RGBA
    #[test]
    fn test_load_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0])).save(&path).unwrap();
        let loaded = load_rgb(&path).unwrap();
        assert_eq!(*loaded.get_pixel(0, 0), Rgb([10, 20, 30]));
    }

    // Tests unreadable files report an image load error with their path
    // Verified by mapping to a file system error
    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        match load_rgb(&path) {
            Err(FloorplanError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    // Tests PNG detection ignores case and needs an extension
    // Verified by comparing extensions case-sensitively
    #[test]
    fn test_is_png() {
        assert!(is_png(Path::new("a/plan.png")));
        assert!(is_png(Path::new("PLAN.PNG")));
        assert!(!is_png(Path::new("plan.json")));
        assert!(!is_png(Path::new("png")));
    }
}
