//! Property edits for single entities, and rescaling.

use sitemark_core::EntityId;

use super::SceneModel;
use crate::geometry::normalize_degrees;
use crate::model::{Orientation, ScaleInfo};

impl SceneModel {
    /// Sets the image scale and recomputes every roof area and cable length
    /// in the same history step.
    pub fn set_scale(&mut self, scale: ScaleInfo) -> bool {
        if self.read_only {
            tracing::debug!("Ignoring scale change in read-only mode");
            return false;
        }
        let ratio = Some(scale.ratio);
        let state = self.state();
        let roofs = state
            .roof_masks()
            .iter()
            .cloned()
            .map(|mut m| {
                m.recompute_area(ratio);
                m
            })
            .collect();
        let lines = state
            .lines()
            .iter()
            .cloned()
            .map(|mut l| {
                l.recompute_length(ratio);
                l
            })
            .collect();
        let next = state.with_roof_masks(roofs).with_lines(lines);

        tracing::info!("Scale set to {:.4} m/px", scale.ratio);
        self.commit_scaled(next, Some(scale))
    }

    pub fn set_roof_pitch(&mut self, id: &EntityId, pitch: f64) -> bool {
        if self.state().roof_mask(id).is_none() {
            return false;
        }
        self.set_roof_masks(|masks| {
            masks
                .iter()
                .cloned()
                .map(|mut m| {
                    if &m.id == id {
                        m.pitch = pitch;
                    }
                    m
                })
                .collect()
        })
    }

    pub fn set_roof_direction(&mut self, id: &EntityId, direction: f64) -> bool {
        if self.state().roof_mask(id).is_none() {
            return false;
        }
        let direction = normalize_degrees(direction);
        self.set_roof_masks(|masks| {
            masks
                .iter()
                .cloned()
                .map(|mut m| {
                    if &m.id == id {
                        m.direction = direction;
                    }
                    m
                })
                .collect()
        })
    }

    pub fn set_array_layout(
        &mut self,
        id: &EntityId,
        rows: u32,
        columns: u32,
        orientation: Orientation,
    ) -> bool {
        if self.state().pv_array(id).is_none() || rows == 0 || columns == 0 {
            return false;
        }
        self.set_pv_arrays(|arrays| {
            arrays
                .iter()
                .cloned()
                .map(|mut a| {
                    if &a.id == id {
                        a.rows = rows;
                        a.columns = columns;
                        a.orientation = orientation;
                    }
                    a
                })
                .collect()
        })
    }

    pub fn set_array_min_spacing(&mut self, id: &EntityId, min_spacing: Option<f64>) -> bool {
        if self.state().pv_array(id).is_none() {
            return false;
        }
        let min_spacing = min_spacing.filter(|m| m.is_finite() && *m >= 0.0);
        self.set_pv_arrays(|arrays| {
            arrays
                .iter()
                .cloned()
                .map(|mut a| {
                    if &a.id == id {
                        a.min_spacing = min_spacing;
                    }
                    a
                })
                .collect()
        })
    }

    pub fn set_line_name(&mut self, id: &EntityId, name: impl Into<String>) -> bool {
        if self.state().line(id).is_none() {
            return false;
        }
        let name = name.into();
        self.set_lines(|lines| {
            lines
                .iter()
                .cloned()
                .map(|mut l| {
                    if &l.id == id {
                        l.name = name.clone();
                    }
                    l
                })
                .collect()
        })
    }
}
