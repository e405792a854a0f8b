use serde::{Deserialize, Serialize};

use super::{
    rotate_point, ArraySpec, EquipmentItem, EquipmentType, FootprintContext, MaterialConfig,
    MaterialKind, PlacedMaterial, Point, PvArrayItem,
};
use crate::geometry::normalize_degrees;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BatchItem {
    Array(ArraySpec),
    Equipment { equipment_type: EquipmentType },
    Material(MaterialConfig),
}

/// One member of a batch, positioned relative to the group origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    /// Offset from the group origin in meters, in the group's frame.
    pub offset: Point,
    pub item: BatchItem,
    #[serde(default)]
    pub rotation: f64,
}

/// A reusable set of heterogeneous items placed together in one step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchGroup {
    pub name: String,
    pub entries: Vec<BatchEntry>,
}

/// Items produced by instantiating a [`BatchGroup`], grouped by collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPlacement {
    pub arrays: Vec<PvArrayItem>,
    pub equipment: Vec<EquipmentItem>,
    pub walkways: Vec<PlacedMaterial>,
    pub cable_trays: Vec<PlacedMaterial>,
}

impl BatchPlacement {
    pub fn len(&self) -> usize {
        self.arrays.len() + self.equipment.len() + self.walkways.len() + self.cable_trays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BatchGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, offset: Point, item: BatchItem, rotation: f64) -> Self {
        self.entries.push(BatchEntry { offset, item, rotation });
        self
    }

    /// World positions of every entry for a group placed at `origin` and
    /// turned by `rotation`.
    pub fn entry_positions(&self, origin: Point, rotation: f64, ctx: &FootprintContext) -> Vec<Point> {
        self.entries
            .iter()
            .map(|entry| {
                let offset_px = Point::new(ctx.to_pixels(entry.offset.x), ctx.to_pixels(entry.offset.y));
                rotate_point(origin + offset_px, origin, rotation)
            })
            .collect()
    }

    /// Creates fresh items for every entry.
    pub fn instantiate(&self, origin: Point, rotation: f64, ctx: &FootprintContext) -> BatchPlacement {
        let mut out = BatchPlacement::default();
        let positions = self.entry_positions(origin, rotation, ctx);
        for (entry, position) in self.entries.iter().zip(positions) {
            let item_rotation = normalize_degrees(rotation + entry.rotation);
            match &entry.item {
                BatchItem::Array(spec) => out
                    .arrays
                    .push(PvArrayItem::new(*spec, position, item_rotation)),
                BatchItem::Equipment { equipment_type } => out
                    .equipment
                    .push(EquipmentItem::new(*equipment_type, position, item_rotation)),
                BatchItem::Material(config) => {
                    let placed = PlacedMaterial::from_config(config, position, item_rotation);
                    match config.kind {
                        MaterialKind::Walkway => out.walkways.push(placed),
                        MaterialKind::CableTray => out.cable_trays.push(placed),
                    }
                }
            }
        }
        out
    }
}
