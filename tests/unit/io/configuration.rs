//! Tests for the consistency of tuning constants

#[cfg(test)]
mod tests {
    use floorgen::io::configuration::{
        BANDIT_ACTIONS, BANDIT_ALPHA, BANDIT_EPSILON, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
        GIF_FRAME_DELAY_MS, RADIAL_DISTANCES, RENDER_BOUNDARY_PX, RENDER_CELL_PX,
        RENDER_MARGIN_PX, STAIRS_HEIGHT, STAIRS_WIDTH, VIEWER_MIN_FRAME_DELAY_MS,
    };

    // Tests bandit arms are distinct valid rates and parameters are in range
    // Verified by duplicating an arm
    #[test]
    fn test_bandit_constants() {
        assert!(BANDIT_ACTIONS.iter().all(|rate| (0.0..=1.0).contains(rate)));
        assert!(BANDIT_ACTIONS.windows(2).all(|pair| matches!(pair, [a, b] if a < b)));
        assert!(BANDIT_ALPHA > 0.0 && BANDIT_ALPHA <= 1.0);
        assert!((0.0..=1.0).contains(&BANDIT_EPSILON));
    }

    // Tests the rendered boundary fits in the margin-free canvas and stairs fit the default plan
    // Verified by shrinking the cell size below the boundary width
    #[test]
    fn test_render_constants() {
        assert!(RENDER_BOUNDARY_PX < RENDER_CELL_PX);
        assert!(RENDER_MARGIN_PX > 0);
        let side = DEFAULT_CANVAS_WIDTH.min(DEFAULT_CANVAS_HEIGHT) as u32 * RENDER_CELL_PX;
        assert!(side > (STAIRS_WIDTH.max(STAIRS_HEIGHT) as u32) * 4);
    }

    // Tests radial probes move outward
    // Verified by reordering the distances
    #[test]
    fn test_radial_distances_increase() {
        assert!(RADIAL_DISTANCES.windows(2).all(|pair| matches!(pair, [a, b] if a < b)));
        assert!(GIF_FRAME_DELAY_MS >= VIEWER_MIN_FRAME_DELAY_MS);
    }
}
