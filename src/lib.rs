//! # SiteMark
//!
//! Site-markup engine for solar layouts: trace roofs over a scaled
//! background, place PV arrays, equipment, walkways and cable trays with
//! spacing snaps, and run DC/AC supply lines between them.
//!
//! ## Architecture
//!
//! SiteMark is organized as a workspace with multiple crates:
//!
//! 1. **sitemark-core** - Error types, constants, entity ids, units
//! 2. **sitemark-settings** - Engine configuration and its persistence
//! 3. **sitemark-designer** - Geometry, snapping, scene/history,
//!    interaction state machine, renderer, layout records
//! 4. **sitemark** - Re-exports and the headless command-line tool

pub use sitemark_core::{EntityId, Error, LayoutError, MeasurementSystem, Result, ScaleError};
pub use sitemark_designer as designer;
pub use sitemark_designer::{
    render, DesignState, EditorContext, InteractionController, InteractionOutcome, JsonFileStore,
    LayoutRecord, LayoutStore, Point, SceneModel, SiteSummary, Tool, Viewport,
};
pub use sitemark_settings::{Config, SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
