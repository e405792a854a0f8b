//! # SiteMark Core
//!
//! Core types and utilities shared by the SiteMark crates.
//! Provides the error hierarchy, engine-wide constants, stable entity
//! identifiers and unit formatting for lengths and areas.

pub mod constants;
pub mod error;
pub mod types;
pub mod units;

pub use error::{Error, LayoutError, Result, ScaleError};

pub use types::EntityId;

pub use units::MeasurementSystem;
