//! Configuration and settings management for SiteMark
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Snapping tolerances (screen-space radii and windows)
//! - Placement defaults (module size, roof defaults, rotation step)
//! - View behaviour (zoom step, initial viewport size)
//! - History limits
//! - UI preferences (measurement system)

pub use sitemark_core::units::MeasurementSystem;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapping and hit-testing tolerances.
///
/// Values suffixed `_px` are screen pixels; the engine divides them by the
/// current zoom so they stay constant on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Extra window beyond the minimum spacing within which a neighbour attracts a placement
    pub spacing_tolerance_px: f64,
    /// Radius around a roof outline's first point that closes the polygon
    pub roof_close_radius_px: f64,
    /// Radius within which a cable click snaps to a terminus
    pub cable_snap_radius_px: f64,
    /// Distance from a cable path that still counts as a hit
    pub cable_hit_tolerance_px: f64,
    /// Distance from an item edge that counts as picking that edge
    pub edge_pick_threshold_px: f64,
    /// Marquee rectangles smaller than this on either side clear the selection
    pub marquee_min_px: f64,
    /// Spacing used when an item does not specify its own, in meters
    pub default_min_spacing_m: f64,
    /// Calibration lines shorter than this are ignored
    pub calibration_min_px: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            spacing_tolerance_px: 20.0,
            roof_close_radius_px: 12.0,
            cable_snap_radius_px: 15.0,
            cable_hit_tolerance_px: 6.0,
            edge_pick_threshold_px: 8.0,
            marquee_min_px: 3.0,
            default_min_spacing_m: 0.3,
            calibration_min_px: 2.0,
        }
    }
}

/// Defaults applied when new items are created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Short side of one PV module, in meters
    pub module_width_m: f64,
    /// Long side of one PV module, in meters
    pub module_height_m: f64,
    pub default_rows: u32,
    pub default_columns: u32,
    pub default_roof_pitch_deg: f64,
    pub default_roof_direction_deg: f64,
    /// Rotation applied per press of the rotate key
    pub rotation_step_deg: f64,
    /// Meters per pixel assumed for footprints before calibration
    pub fallback_meters_per_pixel: f64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            module_width_m: 1.0,
            module_height_m: 1.7,
            default_rows: 2,
            default_columns: 3,
            default_roof_pitch_deg: 20.0,
            default_roof_direction_deg: 180.0,
            rotation_step_deg: 45.0,
            fallback_meters_per_pixel: 0.02,
        }
    }
}

/// Viewport behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Zoom multiplier per wheel notch
    pub zoom_step: f64,
    pub initial_width: f64,
    pub initial_height: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom_step: 1.1,
            initial_width: 1200.0,
            initial_height: 800.0,
        }
    }
}

/// Undo/redo history limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of snapshots kept; 0 keeps everything
    pub max_snapshots: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_snapshots: 200 }
    }
}

/// UI preference settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UiSettings {
    /// Measurement system (Metric or Imperial)
    pub measurement_system: MeasurementSystem,
}

/// Complete engine configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub snapping: SnapSettings,
    pub placement: PlacementSettings,
    pub view: ViewSettings,
    pub history: HistorySettings,
    pub ui: UiSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let snap = &self.snapping;
        let non_negative = [
            ("snapping.spacing_tolerance_px", snap.spacing_tolerance_px),
            ("snapping.roof_close_radius_px", snap.roof_close_radius_px),
            ("snapping.cable_snap_radius_px", snap.cable_snap_radius_px),
            ("snapping.cable_hit_tolerance_px", snap.cable_hit_tolerance_px),
            ("snapping.edge_pick_threshold_px", snap.edge_pick_threshold_px),
            ("snapping.marquee_min_px", snap.marquee_min_px),
            ("snapping.default_min_spacing_m", snap.default_min_spacing_m),
            ("snapping.calibration_min_px", snap.calibration_min_px),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::out_of_range(key, value));
            }
        }

        let place = &self.placement;
        let positive = [
            ("placement.module_width_m", place.module_width_m),
            ("placement.module_height_m", place.module_height_m),
            ("placement.rotation_step_deg", place.rotation_step_deg),
            ("placement.fallback_meters_per_pixel", place.fallback_meters_per_pixel),
            ("view.initial_width", self.view.initial_width),
            ("view.initial_height", self.view.initial_height),
        ];
        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::out_of_range(key, value));
            }
        }

        if place.default_rows == 0 {
            return Err(ConfigError::out_of_range("placement.default_rows", 0));
        }
        if place.default_columns == 0 {
            return Err(ConfigError::out_of_range("placement.default_columns", 0));
        }
        if !(0.0..90.0).contains(&place.default_roof_pitch_deg) {
            return Err(ConfigError::out_of_range(
                "placement.default_roof_pitch_deg",
                place.default_roof_pitch_deg,
            ));
        }
        if !(0.0..360.0).contains(&place.default_roof_direction_deg) {
            return Err(ConfigError::out_of_range(
                "placement.default_roof_direction_deg",
                place.default_roof_direction_deg,
            ));
        }
        if !self.view.zoom_step.is_finite() || self.view.zoom_step <= 1.0 {
            return Err(ConfigError::out_of_range("view.zoom_step", self.view.zoom_step));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
