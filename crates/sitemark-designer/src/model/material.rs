use serde::{Deserialize, Serialize};
use std::fmt;

use sitemark_core::EntityId;

use super::{impl_rect_site_item, FootprintContext, Placeable, Point};
use crate::geometry::OrientedRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Walkway,
    CableTray,
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialKind::Walkway => write!(f, "walkway"),
            MaterialKind::CableTray => write!(f, "cable tray"),
        }
    }
}

/// Template for a rectangular material. Placed items copy its size and
/// keep its id as a plain reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialConfig {
    pub id: EntityId,
    pub kind: MaterialKind,
    pub name: String,
    /// Meters
    pub width: f64,
    /// Meters
    pub length: f64,
}

impl MaterialConfig {
    pub fn new(kind: MaterialKind, name: impl Into<String>, width: f64, length: f64) -> Self {
        Self {
            id: EntityId::generate(),
            kind,
            name: name.into(),
            width,
            length,
        }
    }
}

/// A placed walkway or cable tray. `length` runs along the local X axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedMaterial {
    pub id: EntityId,
    pub config_id: EntityId,
    pub name: String,
    pub width: f64,
    pub length: f64,
    pub position: Point,
    #[serde(default)]
    pub rotation: f64,
}

pub type PlacedWalkway = PlacedMaterial;
pub type PlacedCableTray = PlacedMaterial;

impl PlacedMaterial {
    pub fn from_config(config: &MaterialConfig, position: Point, rotation: f64) -> Self {
        Self {
            id: EntityId::generate(),
            config_id: config.id.clone(),
            name: config.name.clone(),
            width: config.width,
            length: config.length,
            position,
            rotation,
        }
    }
}

impl Placeable for PlacedMaterial {
    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn footprint(&self, ctx: &FootprintContext) -> OrientedRect {
        OrientedRect::new(
            self.position,
            ctx.to_pixels(self.length),
            ctx.to_pixels(self.width),
            self.rotation,
        )
    }

    fn set_pose(&mut self, position: Point, rotation: f64) {
        self.position = position;
        self.rotation = rotation;
    }
}

impl_rect_site_item!(PlacedMaterial);
