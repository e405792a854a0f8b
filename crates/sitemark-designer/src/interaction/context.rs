use sitemark_settings::Config;

use crate::layers::LayerVisibility;
use crate::model::FootprintContext;
use crate::scene::SceneModel;
use crate::selection_manager::HitTestContext;
use crate::snap::SnapParams;
use crate::viewport::Viewport;

/// One editor instance: the scene, how it is viewed, and the tuning it is
/// edited with. Handed to every [`super::InteractionController`] call, so
/// several independent editors can live side by side.
#[derive(Debug, Clone)]
pub struct EditorContext {
    pub scene: SceneModel,
    pub viewport: Viewport,
    pub config: Config,
}

impl EditorContext {
    pub fn new(config: Config) -> Self {
        Self {
            scene: SceneModel::new(config.history.max_snapshots),
            viewport: Viewport::new(config.view.initial_width, config.view.initial_height),
            config,
        }
    }

    /// Footprint sizing for the current scale, falling back to the
    /// configured ratio before calibration.
    pub fn footprint(&self) -> FootprintContext {
        let placement = &self.config.placement;
        FootprintContext::new(
            self.scene
                .meters_per_pixel()
                .unwrap_or(placement.fallback_meters_per_pixel),
            placement.module_width_m,
            placement.module_height_m,
        )
    }

    pub fn snap_params(&self, force_align: bool) -> SnapParams {
        SnapParams::from_config(&self.config, self.scene.meters_per_pixel(), self.viewport.zoom())
            .with_force_align(force_align)
    }

    pub fn hit_context(&self, layers: LayerVisibility) -> HitTestContext {
        HitTestContext {
            footprint: self.footprint(),
            layers,
            cable_tolerance: self.world_tolerance(self.config.snapping.cable_hit_tolerance_px),
        }
    }

    /// Screen pixels to world units at the current zoom.
    pub fn world_tolerance(&self, pixels: f64) -> f64 {
        self.viewport.screen_to_world_distance(pixels)
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
