//! Scene entities.
//!
//! Plain records keyed by [`EntityId`]. Positions are world-space pixels;
//! physical sizes are meters and are converted through a
//! [`FootprintContext`] when a footprint is needed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use sitemark_core::EntityId;

use crate::geometry::{Bounds, OrientedRect};

mod array;
mod batch;
mod cable;
mod equipment;
mod material;
mod roof;
mod scale;

pub use array::{ArraySpec, Orientation, PvArrayItem};
pub use batch::{BatchEntry, BatchGroup, BatchItem, BatchPlacement};
pub use cable::{CableType, SupplyLine};
pub use equipment::{EquipmentItem, EquipmentType};
pub use material::{MaterialConfig, MaterialKind, PlacedCableTray, PlacedMaterial, PlacedWalkway};
pub use roof::RoofMask;
pub use scale::ScaleInfo;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Length of the vector from the origin.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Rotates `p` about `center` by `angle_deg` (clockwise on screen).
pub fn rotate_point(p: Point, center: Point, angle_deg: f64) -> Point {
    let angle_rad = angle_deg.to_radians();
    let s = angle_rad.sin();
    let c = angle_rad.cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point {
        x: center.x + dx * c - dy * s,
        y: center.y + dx * s + dy * c,
    }
}

/// Everything needed to turn meter dimensions into world-space footprints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintContext {
    /// Effective meters per pixel: the calibrated ratio, or a fallback
    /// so that uncalibrated scenes still show sensible footprints.
    pub meters_per_pixel: f64,
    pub module_width_m: f64,
    pub module_height_m: f64,
}

impl FootprintContext {
    pub fn new(meters_per_pixel: f64, module_width_m: f64, module_height_m: f64) -> Self {
        Self {
            meters_per_pixel,
            module_width_m,
            module_height_m,
        }
    }

    pub fn to_pixels(&self, meters: f64) -> f64 {
        meters / self.meters_per_pixel
    }

    pub fn to_meters(&self, pixels: f64) -> f64 {
        pixels * self.meters_per_pixel
    }
}

impl Default for FootprintContext {
    fn default() -> Self {
        Self::new(0.02, 1.0, 1.7)
    }
}

/// Scene entity categories, in hit-test priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    PvArray,
    Walkway,
    CableTray,
    Equipment,
    Cable,
    RoofMask,
}

impl ItemKind {
    /// All kinds, highest hit priority first.
    pub const PRIORITY: [ItemKind; 6] = [
        ItemKind::PvArray,
        ItemKind::Walkway,
        ItemKind::CableTray,
        ItemKind::Equipment,
        ItemKind::Cable,
        ItemKind::RoofMask,
    ];

    /// Kinds whose items are rectangles with a centre anchor.
    pub fn is_rect(&self) -> bool {
        matches!(
            self,
            ItemKind::PvArray | ItemKind::Walkway | ItemKind::CableTray | ItemKind::Equipment
        )
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::PvArray => "PV array",
            ItemKind::Walkway => "walkway",
            ItemKind::CableTray => "cable tray",
            ItemKind::Equipment => "equipment",
            ItemKind::Cable => "cable",
            ItemKind::RoofMask => "roof mask",
        };
        f.write_str(name)
    }
}

/// A non-owning reference to one scene entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub id: EntityId,
}

impl ItemRef {
    pub fn new(kind: ItemKind, id: EntityId) -> Self {
        Self { kind, id }
    }
}

/// Behaviour shared by every scene entity.
pub trait SiteItem {
    fn id(&self) -> &EntityId;

    /// Reference point used for dragging and marquee containment.
    fn anchor(&self) -> Point;

    /// World-space bounds under the given footprint context.
    fn bounds(&self, ctx: &FootprintContext) -> Bounds;

    /// Hit test with a world-space tolerance.
    fn contains_point(&self, p: Point, tolerance: f64, ctx: &FootprintContext) -> bool;

    /// Moves every point of the item by the same delta.
    fn translate(&mut self, dx: f64, dy: f64);
}

/// Rectangular items with a centre anchor and a rotation. These are the
/// items the spacing snap engine works on.
pub trait Placeable: SiteItem {
    fn rotation(&self) -> f64;

    fn footprint(&self, ctx: &FootprintContext) -> OrientedRect;

    fn set_pose(&mut self, position: Point, rotation: f64);

    /// Minimum clearance to neighbours of the same kind, in meters.
    fn min_spacing(&self) -> Option<f64> {
        None
    }
}

macro_rules! impl_rect_site_item {
    ($ty:ty) => {
        impl $crate::model::SiteItem for $ty {
            fn id(&self) -> &sitemark_core::EntityId {
                &self.id
            }

            fn anchor(&self) -> $crate::model::Point {
                self.position
            }

            fn bounds(&self, ctx: &$crate::model::FootprintContext) -> $crate::geometry::Bounds {
                $crate::model::Placeable::footprint(self, ctx).bounds()
            }

            fn contains_point(
                &self,
                p: $crate::model::Point,
                tolerance: f64,
                ctx: &$crate::model::FootprintContext,
            ) -> bool {
                $crate::model::Placeable::footprint(self, ctx).contains(p, tolerance)
            }

            fn translate(&mut self, dx: f64, dy: f64) {
                self.position = self.position.offset(dx, dy);
            }
        }
    };
}

pub(crate) use impl_rect_site_item;
