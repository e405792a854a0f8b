use serde::{Deserialize, Serialize};

use sitemark_core::EntityId;

use super::{FootprintContext, Point, SiteItem};
use crate::geometry::{self, Bounds};

/// A roof outline drawn over the background.
///
/// `direction` is the azimuth the roof slopes towards (0 = image-up,
/// 90 = right). `area` is derived from the points and the scale and is
/// recomputed whenever either changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofMask {
    pub id: EntityId,
    pub points: Vec<Point>,
    pub pitch: f64,
    pub direction: f64,
    #[serde(default)]
    pub area: f64,
}

impl RoofMask {
    pub fn new(points: Vec<Point>, pitch: f64, direction: f64, meters_per_pixel: Option<f64>) -> Self {
        let area = geometry::polygon_area(&points, meters_per_pixel);
        Self {
            id: EntityId::generate(),
            points,
            pitch,
            direction: geometry::normalize_degrees(direction),
            area,
        }
    }

    pub fn centroid(&self) -> Point {
        geometry::polygon_centroid(&self.points)
    }

    pub fn contains(&self, p: Point) -> bool {
        geometry::point_in_polygon(p, &self.points)
    }

    pub fn recompute_area(&mut self, meters_per_pixel: Option<f64>) {
        self.area = geometry::polygon_area(&self.points, meters_per_pixel);
    }

    /// Rotation that lines array rows up with the roof's slope.
    ///
    /// A roof facing 180° (down the image) gives 0°: rows run across.
    pub fn array_base_rotation(&self) -> f64 {
        geometry::normalize_degrees(self.direction - 180.0)
    }
}

impl SiteItem for RoofMask {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn anchor(&self) -> Point {
        self.centroid()
    }

    fn bounds(&self, _ctx: &FootprintContext) -> Bounds {
        let c = self.centroid();
        Bounds::from_points(&self.points).unwrap_or(Bounds::new(c.x, c.y, c.x, c.y))
    }

    fn contains_point(&self, p: Point, tolerance: f64, _ctx: &FootprintContext) -> bool {
        self.contains(p)
            || (tolerance > 0.0 && {
                let mut ring = self.points.clone();
                if let Some(first) = self.points.first() {
                    ring.push(*first);
                }
                geometry::distance_to_polyline(p, &ring) <= tolerance
            })
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            *p = p.offset(dx, dy);
        }
    }
}
