//! PNG import and export for rendered floorplans

use crate::io::error::{FloorplanError, Result};
use image::RgbImage;
use std::path::Path;

/// Load an image from disk as 8-bit RGB, dropping any alpha channel
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).map_err(|e| FloorplanError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image.to_rgb8())
}

/// Save an RGB image, creating parent directories as needed
///
/// The format follows the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_rgb(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FloorplanError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image.save(path).map_err(|e| FloorplanError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Whether `path` has a PNG extension, ignoring case
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}
