use serde::{Deserialize, Serialize};
use std::fmt;

use sitemark_core::EntityId;

use super::{impl_rect_site_item, FootprintContext, Placeable, Point};
use crate::geometry::OrientedRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Inverter,
    DcCombiner,
    AcDisconnect,
    MainBoard,
    SubBoard,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 5] = [
        EquipmentType::Inverter,
        EquipmentType::DcCombiner,
        EquipmentType::AcDisconnect,
        EquipmentType::MainBoard,
        EquipmentType::SubBoard,
    ];

    /// Real-world footprint in meters (width, depth).
    pub fn footprint_m(&self) -> (f64, f64) {
        match self {
            EquipmentType::Inverter => (0.7, 0.5),
            EquipmentType::DcCombiner => (0.5, 0.3),
            EquipmentType::AcDisconnect => (0.4, 0.3),
            EquipmentType::MainBoard => (0.8, 0.4),
            EquipmentType::SubBoard => (0.6, 0.3),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EquipmentType::Inverter => "Inverter",
            EquipmentType::DcCombiner => "DC Combiner",
            EquipmentType::AcDisconnect => "AC Disconnect",
            EquipmentType::MainBoard => "Main Board",
            EquipmentType::SubBoard => "Sub Board",
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub position: Point,
    #[serde(default)]
    pub rotation: f64,
}

impl EquipmentItem {
    pub fn new(equipment_type: EquipmentType, position: Point, rotation: f64) -> Self {
        Self {
            id: EntityId::generate(),
            equipment_type,
            position,
            rotation,
        }
    }
}

impl Placeable for EquipmentItem {
    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn footprint(&self, ctx: &FootprintContext) -> OrientedRect {
        let (w, d) = self.equipment_type.footprint_m();
        OrientedRect::new(self.position, ctx.to_pixels(w), ctx.to_pixels(d), self.rotation)
    }

    fn set_pose(&mut self, position: Point, rotation: f64) {
        self.position = position;
        self.rotation = rotation;
    }
}

impl_rect_site_item!(EquipmentItem);
