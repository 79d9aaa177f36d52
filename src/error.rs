//! Error types for seisviz.
//!
//! One enum covers every failure the plotting helpers can report. Failures
//! from the rendering and encoding libraries are wrapped, never recovered.

use thiserror::Error;

/// The main error type for seisviz operations.
#[derive(Error, Debug)]
pub enum SeisvizError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid coordinate errors
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// An event whose origin and magnitude lists cannot be paired
    #[error("Event has {origins} origins but {magnitudes} magnitudes")]
    MismatchedEvent { origins: usize, magnitudes: usize },

    /// Output path whose extension maps to no known format
    #[error("Unsupported output format: {path}")]
    UnsupportedFormat { path: String },

    /// Output format that needs a cargo feature this build lacks
    #[error("Output format '{format}' requires the '{feature}' feature")]
    MissingCapability { format: String, feature: String },

    /// Drawing errors from the plotting backend
    #[error("Render error: {message}")]
    Render { message: String },

    /// Raster encoding errors
    #[error("Image encoding error: {message}")]
    ImageEncoding { message: String },
}

/// Convenience type alias for Results with SeisvizError
pub type Result<T> = std::result::Result<T, SeisvizError>;

impl SeisvizError {
    /// Shorthand for [`SeisvizError::InvalidParameter`].
    pub fn invalid_parameter(param: &str, message: impl Into<String>) -> Self {
        SeisvizError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }
}
