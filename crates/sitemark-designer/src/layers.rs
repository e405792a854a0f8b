//! Per-category layer visibility.
//!
//! Hidden categories are skipped by hit-testing, marquee selection and
//! rendering alike.

use serde::{Deserialize, Serialize};

use crate::model::ItemKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerVisibility {
    pub roof_masks: bool,
    pub pv_arrays: bool,
    pub equipment: bool,
    pub cables: bool,
    pub walkways: bool,
    pub cable_trays: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            roof_masks: true,
            pv_arrays: true,
            equipment: true,
            cables: true,
            walkways: true,
            cable_trays: true,
        }
    }
}

impl LayerVisibility {
    pub fn is_visible(&self, kind: ItemKind) -> bool {
        match kind {
            ItemKind::RoofMask => self.roof_masks,
            ItemKind::PvArray => self.pv_arrays,
            ItemKind::Equipment => self.equipment,
            ItemKind::Cable => self.cables,
            ItemKind::Walkway => self.walkways,
            ItemKind::CableTray => self.cable_trays,
        }
    }

    pub fn set_visible(&mut self, kind: ItemKind, visible: bool) {
        let flag = match kind {
            ItemKind::RoofMask => &mut self.roof_masks,
            ItemKind::PvArray => &mut self.pv_arrays,
            ItemKind::Equipment => &mut self.equipment,
            ItemKind::Cable => &mut self.cables,
            ItemKind::Walkway => &mut self.walkways,
            ItemKind::CableTray => &mut self.cable_trays,
        };
        *flag = visible;
    }
}
