//! Unit conversion utilities
//!
//! Scene quantities are stored in meters and square meters. These helpers
//! format them for display in metric or imperial units and parse user
//! input (e.g. the real-world distance of a calibration line) back to meters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::METERS_PER_FOOT;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (m, m²)
    #[default]
    Metric,
    /// Imperial system (ft, ft²)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "m" => Ok(Self::Metric),
            "imperial" | "ft" | "feet" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format a length for display
///
/// * `meters` - Value in meters
/// * `system` - Target measurement system
pub fn format_length(meters: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.2} m", meters),
        MeasurementSystem::Imperial => format!("{:.2} ft", meters / METERS_PER_FOOT),
    }
}

/// Format an area for display
///
/// * `square_meters` - Value in m²
/// * `system` - Target measurement system
pub fn format_area(square_meters: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.2} m²", square_meters),
        MeasurementSystem::Imperial => {
            let sq_ft = square_meters / (METERS_PER_FOOT * METERS_PER_FOOT);
            format!("{:.2} ft²", sq_ft)
        }
    }
}

/// Parse a length string to meters
///
/// Accepts a bare number in the given system, or a number with an explicit
/// `m`, `cm`, `mm` or `ft` suffix which overrides the system.
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    let split = input
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (number, suffix) = input.split_at(split);
    let value = number.trim().parse::<f64>().map_err(|e| e.to_string())?;

    let meters = match suffix.trim() {
        "" => match system {
            MeasurementSystem::Metric => value,
            MeasurementSystem::Imperial => value * METERS_PER_FOOT,
        },
        "m" => value,
        "cm" => value / 100.0,
        "mm" => value / 1000.0,
        "ft" => value * METERS_PER_FOOT,
        other => return Err(format!("Unknown unit: {}", other)),
    };

    Ok(meters)
}

/// Get the length unit label for the given system ("m" or "ft")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "m",
        MeasurementSystem::Imperial => "ft",
    }
}
