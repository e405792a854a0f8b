use serde::{Deserialize, Serialize};

use sitemark_core::ScaleError;

/// Calibrated image scale.
///
/// `ratio` is meters per pixel and is always positive and finite; the only
/// way to build a `ScaleInfo` is through the validating constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleInfo {
    pub pixel_distance: f64,
    pub real_distance: f64,
    pub ratio: f64,
}

impl ScaleInfo {
    /// Builds a scale from a reference line of `pixel_distance` pixels that
    /// measures `real_distance` meters on site.
    pub fn calibrate(pixel_distance: f64, real_distance: f64) -> Result<Self, ScaleError> {
        if !pixel_distance.is_finite() || pixel_distance <= 0.0 {
            return Err(ScaleError::DegenerateReference { pixel_distance });
        }
        if !real_distance.is_finite() || real_distance <= 0.0 {
            return Err(ScaleError::InvalidDistance { real_distance });
        }
        Ok(Self {
            pixel_distance,
            real_distance,
            ratio: real_distance / pixel_distance,
        })
    }

    /// Builds a scale from a stored pixels-per-meter value.
    pub fn from_pixels_per_meter(pixels_per_meter: f64) -> Result<Self, ScaleError> {
        if !pixels_per_meter.is_finite() || pixels_per_meter <= 0.0 {
            return Err(ScaleError::InvalidPixelsPerMeter { pixels_per_meter });
        }
        Ok(Self {
            pixel_distance: pixels_per_meter,
            real_distance: 1.0,
            ratio: 1.0 / pixels_per_meter,
        })
    }

    pub fn meters_per_pixel(&self) -> f64 {
        self.ratio
    }

    pub fn pixels_per_meter(&self) -> f64 {
        1.0 / self.ratio
    }
}
