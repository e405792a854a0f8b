use serde::{Deserialize, Serialize};
use std::fmt;

use sitemark_core::EntityId;

use super::{impl_rect_site_item, FootprintContext, Placeable, Point};
use crate::geometry::OrientedRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

/// Parameters of an array before it is placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArraySpec {
    pub rows: u32,
    pub columns: u32,
    pub orientation: Orientation,
    pub min_spacing: Option<f64>,
}

impl ArraySpec {
    pub fn new(rows: u32, columns: u32, orientation: Orientation) -> Self {
        Self {
            rows: rows.max(1),
            columns: columns.max(1),
            orientation,
            min_spacing: None,
        }
    }

    /// Footprint size in meters as (across, along) the rows.
    pub fn size_m(&self, ctx: &FootprintContext) -> (f64, f64) {
        let (module_w, module_h) = match self.orientation {
            Orientation::Portrait => (ctx.module_width_m, ctx.module_height_m),
            Orientation::Landscape => (ctx.module_height_m, ctx.module_width_m),
        };
        (
            f64::from(self.columns) * module_w,
            f64::from(self.rows) * module_h,
        )
    }
}

/// A block of PV modules.
///
/// `roof_mask_id` is advisory: the mask may be deleted without touching
/// the array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvArrayItem {
    pub id: EntityId,
    pub position: Point,
    pub rows: u32,
    pub columns: u32,
    pub orientation: Orientation,
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_mask_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_spacing: Option<f64>,
}

impl PvArrayItem {
    pub fn new(spec: ArraySpec, position: Point, rotation: f64) -> Self {
        Self {
            id: EntityId::generate(),
            position,
            rows: spec.rows.max(1),
            columns: spec.columns.max(1),
            orientation: spec.orientation,
            rotation,
            roof_mask_id: None,
            min_spacing: spec.min_spacing,
        }
    }

    pub fn spec(&self) -> ArraySpec {
        ArraySpec {
            rows: self.rows,
            columns: self.columns,
            orientation: self.orientation,
            min_spacing: self.min_spacing,
        }
    }

    pub fn module_count(&self) -> u32 {
        self.rows * self.columns
    }

    /// Centre of the four footprint edges, used as cable termini.
    pub fn edge_midpoints(&self, ctx: &FootprintContext) -> [Point; 4] {
        let rect = self.footprint(ctx);
        let (hw, hh) = (rect.half_width, rect.half_height);
        [
            rect.to_world(Point::new(0.0, -hh)),
            rect.to_world(Point::new(hw, 0.0)),
            rect.to_world(Point::new(0.0, hh)),
            rect.to_world(Point::new(-hw, 0.0)),
        ]
    }
}

impl Placeable for PvArrayItem {
    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn footprint(&self, ctx: &FootprintContext) -> OrientedRect {
        let (w, h) = self.spec().size_m(ctx);
        OrientedRect::new(self.position, ctx.to_pixels(w), ctx.to_pixels(h), self.rotation)
    }

    fn set_pose(&mut self, position: Point, rotation: f64) {
        self.position = position;
        self.rotation = rotation;
    }

    fn min_spacing(&self) -> Option<f64> {
        self.min_spacing
    }
}

impl_rect_site_item!(PvArrayItem);
