//! Error types for solver construction, solving, and raster I/O

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver and I/O operations
#[derive(Debug)]
pub enum WfcError {
    /// Failed to decode a raster from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying decode error
        source: image::ImageError,
    },

    /// Failed to encode a raster to disk
    ImageExport {
        /// Path where the export was attempted
        path: PathBuf,
        /// Underlying encode error
        source: image::ImageError,
    },

    /// Output extension does not map to a supported format
    UnknownFormat {
        /// Path whose extension was rejected
        path: PathBuf,
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

    /// Source raster doesn't meet extraction requirements
    InvalidSourceData {
        /// Description of what's wrong with the source
        reason: String,
    },

    /// Propagation or collapse emptied a cell's candidate set
    ///
    /// The run is over but the solver stays re-initializable; callers
    /// typically retry with a different seed.
    Contradiction {
        /// Index of the cell whose candidates ran out
        cell: usize,
        /// Cells already collapsed when the run ended
        collapsed: usize,
    },
}

impl fmt::Display for WfcError {
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
            Self::UnknownFormat { path } => {
                write!(
                    f,
                    "Unknown output format for '{}' (supported: png, bmp, tga, jpg)",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::Contradiction { cell, collapsed } => {
                write!(
                    f,
                    "Contradiction at cell {cell} after {collapsed} collapses; \
                     re-initialize and try again"
                )
            }
        }
    }
}

impl std::error::Error for WfcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, WfcError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WfcError {
    WfcError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
