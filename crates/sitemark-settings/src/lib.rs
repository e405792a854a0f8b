//! SiteMark Settings Crate
//!
//! Handles engine configuration: interaction tolerances, placement
//! defaults, history limits and display units, with JSON/TOML persistence.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{
    Config, HistorySettings, PlacementSettings, SnapSettings, UiSettings, ViewSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use manager::SettingsManager;
