//! Tests for evolution capture and GIF export

#[cfg(test)]
mod tests {
    use floorgen::io::error::FloorplanError;
    use floorgen::io::render::Renderer;
    use floorgen::io::visualization::EvolutionCapture;
    use floorgen::spatial::geometry::Rect;
    use floorgen::spatial::layout::Layout;
    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    fn capture(generations: usize) -> EvolutionCapture {
        let mut capture = EvolutionCapture::new(6, 6, generations);
        for generation in 0..generations {
            let mut layout = Layout::new();
            layout.insert("Kitchen", Rect::new(0, 0, 2 + (generation as i32 % 3), 2));
            capture.record(generation, &layout);
        }
        capture
    }

    fn frame_delays(path: &Path) -> Vec<f64> {
        let decoder = GifDecoder::new(BufReader::new(File::open(path).unwrap())).unwrap();
        decoder
            .into_frames()
            .collect_frames()
            .unwrap()
            .iter()
            .map(|frame| {
                let (numer, denom) = frame.delay().numer_denom_ms();
                f64::from(numer) / f64::from(denom)
            })
            .collect()
    }

    // Tests snapshots are kept in generation order
    // Verified by recording only improvements
    #[test]
    fn test_record_snapshots() {
        let capture = capture(4);
        assert_eq!(capture.snapshot_count(), 4);
        let generations: Vec<usize> = capture.snapshots().iter().map(|s| s.generation).collect();
        assert_eq!(generations, vec![0, 1, 2, 3]);
    }

    // Tests one frame per generation plus a held final frame
    // Verified by skipping the hold frame
    #[test]
    fn test_export_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gifs/plan1_evolution.gif");
        let renderer = Renderer::default().with_cell_px(5);
        capture(3).export_gif(&renderer, &path, 80).unwrap();

        let delays = frame_delays(&path);
        assert_eq!(delays.len(), 4);
        assert_eq!(delays.first().copied(), Some(80.0));
        assert_eq!(delays.last().copied(), Some(2000.0));
    }

    // Tests delays below what viewers honour are raised
    // Verified by passing the requested delay through
    #[test]
    fn test_minimum_delay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fast.gif");
        let renderer = Renderer::default().with_cell_px(5);
        capture(1).export_gif(&renderer, &path, 10).unwrap();
        let delays = frame_delays(&path);
        assert_eq!(delays.first().copied(), Some(50.0));
    }

    // Tests exporting nothing is rejected
    // Verified by writing an empty GIF
    #[test]
    fn test_export_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gif");
        let result = capture(0).export_gif(&Renderer::default(), &path, 80);
        assert!(matches!(result, Err(FloorplanError::InvalidParameter { .. })));
        assert!(!path.exists());
    }
}
