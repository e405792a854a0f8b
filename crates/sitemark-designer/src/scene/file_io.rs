//! Load/save between the scene and layout records.

use std::path::Path;

use chrono::Utc;

use super::SceneModel;
use crate::design_state::DesignState;
use crate::model::ScaleInfo;
use crate::serialization::LayoutRecord;

impl SceneModel {
    /// Replaces the scene with the contents of `record`.
    ///
    /// History is reset to a single snapshot and the scene is clean
    /// afterwards. Loading is allowed in read-only mode; it is how a
    /// view-only presentation gets its content.
    pub fn load(&mut self, record: &LayoutRecord) -> sitemark_core::Result<()> {
        record.validate()?;

        let scale = match record.scale_pixels_per_meter {
            None => None,
            Some(ppm) if ppm == 0.0 => None,
            Some(ppm) => Some(ScaleInfo::from_pixels_per_meter(ppm)?),
        };
        let ratio = scale.map(|s| s.ratio);

        let mut roof_masks = record.roof_masks.clone();
        for mask in &mut roof_masks {
            mask.recompute_area(ratio);
        }
        let mut lines = record.lines.clone();
        for line in &mut lines {
            line.recompute_length(ratio);
        }

        let state = DesignState::new(
            record.equipment.clone(),
            lines,
            roof_masks,
            record.pv_arrays.clone(),
            record.placed_walkways.clone(),
            record.placed_cable_trays.clone(),
        );

        self.history.reset(state, scale);
        self.background = record.background.clone();
        self.metadata = record.metadata.clone();
        self.dirty = false;

        tracing::info!(
            "Loaded layout '{}' ({} items, scale {})",
            self.metadata.name,
            self.state().item_count(),
            scale.map_or("uncalibrated".to_string(), |s| format!("{:.2} px/m", s.pixels_per_meter()))
        );
        Ok(())
    }

    /// Current design as a layout record, ready for the caller to persist.
    pub fn to_record(&self) -> LayoutRecord {
        let state = self.state();
        let mut metadata = self.metadata.clone();
        metadata.modified = Utc::now();

        LayoutRecord {
            metadata,
            roof_masks: state.roof_masks().to_vec(),
            pv_arrays: state.pv_arrays().to_vec(),
            equipment: state.equipment().to_vec(),
            lines: state.lines().to_vec(),
            placed_walkways: state.placed_walkways().to_vec(),
            placed_cable_trays: state.placed_cable_trays().to_vec(),
            scale_pixels_per_meter: self.scale().map(|s| s.pixels_per_meter()),
            background: self.background.clone(),
            ..LayoutRecord::new(self.metadata.name.clone())
        }
    }

    /// Save the scene to a layout file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        self.to_record().save_to_file(&path)?;
        self.dirty = false;
        Ok(())
    }

    /// Load the scene from a layout file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let record = LayoutRecord::load_from_file(&path)?;
        self.load(&record)?;
        Ok(())
    }
}
