use serde::{Deserialize, Serialize};
use std::fmt;

use sitemark_core::EntityId;

use super::{EquipmentType, FootprintContext, Point, SiteItem};
use crate::geometry::{self, Bounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CableType {
    Dc,
    Ac,
}

impl CableType {
    /// Whether a cable of this type may terminate at the given equipment.
    pub fn accepts_equipment(&self, equipment_type: EquipmentType) -> bool {
        match self {
            CableType::Ac => matches!(equipment_type, EquipmentType::Inverter | EquipmentType::MainBoard),
            CableType::Dc => matches!(equipment_type, EquipmentType::Inverter),
        }
    }

    /// Whether a cable of this type may terminate at a PV array.
    pub fn accepts_array(&self) -> bool {
        matches!(self, CableType::Dc)
    }
}

impl fmt::Display for CableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CableType::Dc => write!(f, "DC"),
            CableType::Ac => write!(f, "AC"),
        }
    }
}

/// A cable run. `length` is derived from the points and the scale.
///
/// Endpoints snapped to equipment at creation time are plain coordinates;
/// moving the equipment later leaves the cable where it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyLine {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub cable_type: CableType,
    pub points: Vec<Point>,
    #[serde(default)]
    pub length: f64,
}

impl SupplyLine {
    pub fn new(
        name: impl Into<String>,
        cable_type: CableType,
        points: Vec<Point>,
        meters_per_pixel: Option<f64>,
    ) -> Self {
        let length = geometry::line_length(&points, meters_per_pixel);
        Self {
            id: EntityId::generate(),
            name: name.into(),
            cable_type,
            points,
            length,
        }
    }

    pub fn recompute_length(&mut self, meters_per_pixel: Option<f64>) {
        self.length = geometry::line_length(&self.points, meters_per_pixel);
    }

    /// Midpoint of the first and last point, used for marquee containment.
    pub fn midpoint(&self) -> Point {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => (*a + *b) / 2.0,
            _ => Point::default(),
        }
    }
}

impl SiteItem for SupplyLine {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn anchor(&self) -> Point {
        self.points.first().copied().unwrap_or_default()
    }

    fn bounds(&self, _ctx: &FootprintContext) -> Bounds {
        let a = self.anchor();
        Bounds::from_points(&self.points).unwrap_or(Bounds::new(a.x, a.y, a.x, a.y))
    }

    fn contains_point(&self, p: Point, tolerance: f64, _ctx: &FootprintContext) -> bool {
        geometry::distance_to_polyline(p, &self.points) <= tolerance
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            *p = p.offset(dx, dy);
        }
    }
}
