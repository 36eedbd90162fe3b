//! Error types for layout generation, raster analysis and persistence

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all floorplan operations
#[derive(Debug)]
pub enum FloorplanError {
    /// Failed to load a rendered floorplan image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Layout or bandit state could not be encoded or decoded
    Serialization {
        /// File or store key involved
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Population initialisation exhausted its global candidate budget
    ///
    /// Raised when the room program is too dense for the canvas, so that
    /// valid candidate layouts are (almost) never completed.
    InfeasibleConfiguration {
        /// Number of candidate layouts attempted
        attempts: usize,
        /// Valid layouts collected before giving up
        accepted: usize,
        /// Valid layouts required
        required: usize,
    },

    /// A bandit update referenced a mutation rate that is not one of its arms
    UnknownAction {
        /// The rate that was requested
        rate: f64,
    },

    /// A label font could not be read or parsed
    FontLoad {
        /// Path to the font file
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for FloorplanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { path, source } => {
                write!(f, "Invalid JSON in '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InfeasibleConfiguration {
                attempts,
                accepted,
                required,
            } => {
                write!(
                    f,
                    "Infeasible configuration: only {accepted} of {required} layouts found after {attempts} candidates"
                )
            }
            Self::UnknownAction { rate } => {
                write!(f, "Mutation rate {rate} is not a bandit action")
            }
            Self::FontLoad { path, reason } => {
                write!(f, "Failed to load font '{}': {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for FloorplanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for floorplan results
pub type Result<T> = std::result::Result<T, FloorplanError>;

impl From<image::ImageError> for FloorplanError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for FloorplanError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for FloorplanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Attaches the offending path to errors raised without one
pub trait WithPath<T> {
    /// Replace the placeholder path of the error with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<FloorplanError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                FloorplanError::ImageLoad { path: p, .. }
                | FloorplanError::ImageExport { path: p, .. }
                | FloorplanError::FileSystem { path: p, .. }
                | FloorplanError::Serialization { path: p, .. }
                | FloorplanError::FontLoad { path: p, .. } => *p = path.to_path_buf(),
                _ => {}
            }
            error
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> FloorplanError {
    FloorplanError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
