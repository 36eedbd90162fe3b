//! Frame capture and GIF generation for evolution visualization

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{FloorplanError, Result, invalid_parameter};
use crate::io::render::Renderer;
use crate::spatial::layout::Layout;
use image::{Delay, DynamicImage, Frame};
use std::path::Path;

/// Fittest layout of one generation
#[derive(Debug, Clone)]
pub struct GenerationSnapshot {
    /// Zero-based generation index
    pub generation: usize,
    /// Fittest layout after that generation
    pub layout: Layout,
}

/// Records the fittest layout per generation for later animation
pub struct EvolutionCapture {
    snapshots: Vec<GenerationSnapshot>,
    canvas_width: i32,
    canvas_height: i32,
}

impl EvolutionCapture {
    /// Capture for a run on a canvas of the given grid size
    pub fn new(canvas_width: i32, canvas_height: i32, generations: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(generations),
            canvas_width,
            canvas_height,
        }
    }

    /// Records the fittest layout of a generation
    pub fn record(&mut self, generation: usize, layout: &Layout) {
        self.snapshots.push(GenerationSnapshot {
            generation,
            layout: layout.clone(),
        });
    }

    /// Returns all recorded snapshots
    pub fn snapshots(&self) -> &[GenerationSnapshot] {
        &self.snapshots
    }

    /// Export the snapshots as an animated GIF
    ///
    /// Frame delays below what viewers honour are raised to the viewer minimum.
    /// The final frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No generations were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        renderer: &Renderer,
        output_path: &Path,
        frame_delay_ms: u32,
    ) -> Result<()> {
        if self.snapshots.is_empty() {
            return Err(invalid_parameter(
                "snapshots",
                &0,
                &"no generations captured for visualization",
            ));
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let mut frames: Vec<Frame> = self
            .snapshots
            .iter()
            .map(|snapshot| self.render_frame(renderer, &snapshot.layout, delay_ms))
            .collect();

        if let Some(last) = frames.last().map(|frame| frame.buffer().clone()) {
            frames.push(Frame::from_parts(
                last,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| FloorplanError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| FloorplanError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| FloorplanError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }

    fn render_frame(&self, renderer: &Renderer, layout: &Layout, delay_ms: u32) -> Frame {
        let image = renderer.render(layout, self.canvas_width, self.canvas_height);
        Frame::from_parts(
            DynamicImage::ImageRgb8(image).to_rgba8(),
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        )
    }

    /// Returns the number of captured generations
    pub const fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}
