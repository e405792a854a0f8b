//! Per-collection updaters.
//!
//! One `set_*` per collection. Each takes an updater from the current
//! collection to the new one and commits the result as one history step.

use super::SceneModel;
use crate::model::{
    EquipmentItem, ItemRef, PlacedMaterial, PvArrayItem, RoofMask, SupplyLine,
};

impl SceneModel {
    pub fn set_equipment(
        &mut self,
        updater: impl FnOnce(&[EquipmentItem]) -> Vec<EquipmentItem>,
    ) -> bool {
        self.apply(|s| s.with_equipment(updater(s.equipment())))
    }

    pub fn set_lines(&mut self, updater: impl FnOnce(&[SupplyLine]) -> Vec<SupplyLine>) -> bool {
        self.apply(|s| s.with_lines(updater(s.lines())))
    }

    pub fn set_roof_masks(&mut self, updater: impl FnOnce(&[RoofMask]) -> Vec<RoofMask>) -> bool {
        self.apply(|s| s.with_roof_masks(updater(s.roof_masks())))
    }

    pub fn set_pv_arrays(
        &mut self,
        updater: impl FnOnce(&[PvArrayItem]) -> Vec<PvArrayItem>,
    ) -> bool {
        self.apply(|s| s.with_pv_arrays(updater(s.pv_arrays())))
    }

    pub fn set_placed_walkways(
        &mut self,
        updater: impl FnOnce(&[PlacedMaterial]) -> Vec<PlacedMaterial>,
    ) -> bool {
        self.apply(|s| s.with_placed_walkways(updater(s.placed_walkways())))
    }

    pub fn set_placed_cable_trays(
        &mut self,
        updater: impl FnOnce(&[PlacedMaterial]) -> Vec<PlacedMaterial>,
    ) -> bool {
        self.apply(|s| s.with_placed_cable_trays(updater(s.placed_cable_trays())))
    }

    /// Deletes the referenced entities in one step. Arrays that pointed at a
    /// deleted roof mask keep their (now dangling) `roof_mask_id`.
    pub fn remove_items(&mut self, items: &[ItemRef]) -> bool {
        let existing: Vec<ItemRef> = items
            .iter()
            .filter(|r| self.state().contains(r))
            .cloned()
            .collect();
        if existing.is_empty() {
            return false;
        }
        tracing::debug!("Deleting {} item(s)", existing.len());
        self.apply(|s| s.without_items(&existing))
    }

    /// Moves the referenced entities by one world-space delta in one step.
    pub fn translate_items(&mut self, items: &[ItemRef], dx: f64, dy: f64) -> bool {
        if items.is_empty() {
            return false;
        }
        self.apply(|s| s.translated(items, dx, dy))
    }
}
