//! Text labels drawn onto floorplan images
//!
//! Labels need a TrueType font. Without one, drawing is a no-op so that image
//! analysis and marker placement still run.

use crate::io::configuration::{FONT_SEARCH_PATHS, LABEL_FONT_SIZE};
use crate::io::error::{FloorplanError, Result, WithPath};
use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use std::path::Path;

/// Optional font plus the size labels are drawn at
pub struct LabelWriter {
    font: Option<FontVec>,
    scale: PxScale,
}

impl Default for LabelWriter {
    fn default() -> Self {
        Self::disabled()
    }
}

impl LabelWriter {
    /// Writer that draws nothing
    pub fn disabled() -> Self {
        Self {
            font: None,
            scale: PxScale::from(LABEL_FONT_SIZE),
        }
    }

    /// Load a TrueType or OpenType font file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid font
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).with_path(path)?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| FloorplanError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            font: Some(font),
            scale: PxScale::from(LABEL_FONT_SIZE),
        })
    }

    /// Use `explicit` if given, otherwise the first well-known system font found
    ///
    /// # Errors
    ///
    /// Returns an error only if an explicitly requested font fails to load
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        for candidate in FONT_SEARCH_PATHS.iter().map(Path::new) {
            if candidate.is_file() {
                match Self::from_file(candidate) {
                    Ok(writer) => {
                        log::debug!("Using label font {}", candidate.display());
                        return Ok(writer);
                    }
                    Err(e) => log::debug!("Skipping font: {e}"),
                }
            }
        }
        log::warn!("No label font found; images will be annotated without text");
        Ok(Self::disabled())
    }

    /// Whether labels are actually drawn
    pub const fn is_enabled(&self) -> bool {
        self.font.is_some()
    }

    /// Draw `text` with its baseline at `(x, y)`
    pub fn draw(&self, image: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        let Some(font) = &self.font else {
            return;
        };
        let top = y - self.scale.y.round() as i32;
        draw_text_mut(image, color, x, top, self.scale, font, text);
    }
}
