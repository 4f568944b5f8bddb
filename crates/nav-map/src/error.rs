//! Map-subsystem error type.

use thiserror::Error;

use nav_core::GeoPoint;

/// Errors produced by `nav-map`.
#[derive(Debug, Error)]
pub enum MapError {
    /// Calibration anchors cannot define a projection.  Fatal at startup.
    #[error("invalid calibration: {0}")]
    Configuration(String),

    /// A destination outside the calibrated area was offered for selection.
    #[error("selection {0} lies outside the calibrated map area")]
    OutOfBoundsSelection(GeoPoint),

    /// The map asset could not be fetched.  Retryable.
    #[error("failed to load map asset {url}: {reason}")]
    Load { url: String, reason: String },

    #[error("location directory error: {0}")]
    Directory(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type MapResult<T> = Result<T, MapError>;
