//! Error handling for SiteMark
//!
//! Provides error types for the few fallible boundaries of the engine:
//! - Scale errors (calibration input)
//! - Layout errors (persisted layout records)
//!
//! Interactive operations never fail; they degrade to no-ops instead.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Scale calibration error type
///
/// Raised when a calibration would produce a ratio that is not a
/// positive, finite number of meters per pixel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    /// Reference line has no measurable pixel length
    #[error("Reference line is too short: {pixel_distance} px")]
    DegenerateReference {
        /// The measured pixel length.
        pixel_distance: f64,
    },

    /// Real-world distance is zero, negative or not finite
    #[error("Invalid real-world distance: {real_distance} m")]
    InvalidDistance {
        /// The distance entered by the user.
        real_distance: f64,
    },

    /// Pixels-per-meter value from a persisted record is unusable
    #[error("Invalid scale: {pixels_per_meter} px/m")]
    InvalidPixelsPerMeter {
        /// The stored pixels-per-meter value.
        pixels_per_meter: f64,
    },
}

/// Layout record error type
///
/// Represents problems found while reading a persisted layout record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Record was written by a newer format
    #[error("Unsupported layout version {found} (expected {expected})")]
    UnsupportedVersion {
        /// The version found in the record.
        found: String,
        /// The version this build reads.
        expected: String,
    },

    /// Two entities of the same collection share an id
    #[error("Duplicate id '{id}' in {collection}")]
    DuplicateId {
        /// The collection name.
        collection: String,
        /// The duplicated id.
        id: String,
    },

    /// An entity has fewer points than its geometry requires
    #[error("{collection} '{id}' has {found} points, needs at least {required}")]
    TooFewPoints {
        /// The collection name.
        collection: String,
        /// The entity id.
        id: String,
        /// Points present.
        found: usize,
        /// Points required.
        required: usize,
    },

    /// Generic layout error
    #[error("Layout error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for SiteMark
///
/// A unified error type that can represent any error from the library
/// crates. This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Scale error
    #[error(transparent)]
    Scale(#[from] ScaleError),

    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a scale error
    pub fn is_scale_error(&self) -> bool {
        matches!(self, Error::Scale(_))
    }

    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
