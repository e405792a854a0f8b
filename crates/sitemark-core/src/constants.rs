//! Engine-wide constants.
//!
//! Tunable interaction tolerances live in `sitemark-settings`; the values
//! here are fixed properties of the engine.

/// Lowest zoom factor the viewport accepts.
pub const MIN_ZOOM: f64 = 0.1;

/// Highest zoom factor the viewport accepts.
pub const MAX_ZOOM: f64 = 10.0;

/// Fraction of the viewport reserved as padding on each edge by fit-to-view.
pub const VIEW_PADDING: f64 = 0.05;

/// Angular increment used by the 45° drawing constraint, in degrees.
pub const ANGLE_SNAP_DEG: f64 = 45.0;

/// Distance below which two world coordinates are treated as equal.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Minimum number of points of a committed roof mask.
pub const MIN_ROOF_POINTS: usize = 3;

/// Minimum number of points of a committed supply line.
pub const MIN_LINE_POINTS: usize = 2;

/// Meters per foot, used by imperial formatting.
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Current layout record format version.
pub const LAYOUT_FORMAT_VERSION: &str = "1.0";
