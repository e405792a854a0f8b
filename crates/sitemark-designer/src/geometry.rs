//! Geometry kernel.
//!
//! Pure, stateless functions over world-space points: polygon area and
//! containment, point-to-polyline distance, path length, angle snapping,
//! azimuths, and the segment/box intersection tests used by marquee
//! selection. Nothing here knows about scene entities.
//!
//! World space uses image coordinates: +X to the right, +Y downwards.

use sitemark_core::constants::{ANGLE_SNAP_DEG, GEOMETRY_EPSILON};

use crate::model::{rotate_point, Point};

/// Axis-aligned rectangle in world space. Always normalized (`min <= max`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from two arbitrary corners.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Smallest bounds containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The four corners, clockwise on screen starting top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// Side of an oriented rectangle, named in its local (unrotated) frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl RectEdge {
    pub const ALL: [RectEdge; 4] = [RectEdge::Top, RectEdge::Right, RectEdge::Bottom, RectEdge::Left];
}

/// Rectangle rotated about its centre. Rotation is in degrees, clockwise on
/// screen (the Y axis points down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: Point,
    pub half_width: f64,
    pub half_height: f64,
    pub rotation: f64,
}

impl OrientedRect {
    pub fn new(center: Point, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            center,
            half_width: width.abs() / 2.0,
            half_height: height.abs() / 2.0,
            rotation,
        }
    }

    /// Maps a world point into this rectangle's unrotated local frame,
    /// with the centre at the origin.
    pub fn to_local(&self, p: Point) -> Point {
        let r = rotate_point(p, self.center, -self.rotation);
        Point::new(r.x - self.center.x, r.y - self.center.y)
    }

    /// Inverse of [`OrientedRect::to_local`].
    pub fn to_world(&self, local: Point) -> Point {
        rotate_point(self.center + local, self.center, self.rotation)
    }

    /// Corners in world space: top-left, top-right, bottom-right, bottom-left
    /// of the local frame.
    pub fn corners(&self) -> [Point; 4] {
        let (hw, hh) = (self.half_width, self.half_height);
        [
            self.to_world(Point::new(-hw, -hh)),
            self.to_world(Point::new(hw, -hh)),
            self.to_world(Point::new(hw, hh)),
            self.to_world(Point::new(-hw, hh)),
        ]
    }

    /// Inclusive containment test, grown by `tolerance` on every side.
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        let local = self.to_local(p);
        local.x.abs() <= self.half_width + tolerance && local.y.abs() <= self.half_height + tolerance
    }

    /// Axis-aligned bounds of the rotated rectangle.
    pub fn bounds(&self) -> Bounds {
        // corners() always yields four points
        Bounds::from_points(&self.corners()).unwrap_or(Bounds::new(
            self.center.x,
            self.center.y,
            self.center.x,
            self.center.y,
        ))
    }

    /// World-space endpoints of one edge.
    pub fn edge(&self, edge: RectEdge) -> (Point, Point) {
        let [tl, tr, br, bl] = self.corners();
        match edge {
            RectEdge::Top => (tl, tr),
            RectEdge::Right => (tr, br),
            RectEdge::Bottom => (br, bl),
            RectEdge::Left => (bl, tl),
        }
    }

    /// Nearest edge to `p` and its distance in world units.
    pub fn nearest_edge(&self, p: Point) -> (RectEdge, f64) {
        let mut best = (RectEdge::Top, f64::INFINITY);
        for edge in RectEdge::ALL {
            let (a, b) = self.edge(edge);
            let d = distance_to_segment(p, a, b);
            if d < best.1 {
                best = (edge, d);
            }
        }
        best
    }
}

/// Normalizes an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Signed shoelace area in square pixels. Positive when the points wind
/// clockwise on screen.
pub fn signed_area_px(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Polygon area in m². Returns 0 when the scale is unknown or the polygon
/// has fewer than three points. Always non-negative regardless of winding.
pub fn polygon_area(points: &[Point], meters_per_pixel: Option<f64>) -> f64 {
    match meters_per_pixel {
        Some(ratio) if points.len() >= 3 => signed_area_px(points).abs() * ratio * ratio,
        _ => 0.0,
    }
}

/// Area centroid of a polygon. Falls back to the vertex average for
/// degenerate (zero-area) input, and to the origin for an empty slice.
pub fn polygon_centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }
    let area = signed_area_px(points);
    if area.abs() < GEOMETRY_EPSILON {
        let n = points.len() as f64;
        let sum = points.iter().fold(Point::default(), |acc, p| acc + *p);
        return sum / n;
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    Point::new(cx / (6.0 * area), cy / (6.0 * area))
}

/// Even-odd ray casting. Points lying on an edge count as inside, so the
/// same answer is given for placement and for selection.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let n = polygon.len();
    for i in 0..n {
        if distance_to_segment(p, polygon[i], polygon[(i + 1) % n]) <= GEOMETRY_EPSILON {
            return true;
        }
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if ((pi.y > p.y) != (pj.y > p.y)) && (p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from `p` to the segment `a`–`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq < GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&(a + ab * t))
}

/// Minimum distance from `p` to any segment of the polyline. A single point
/// is treated as a degenerate segment; an empty polyline is infinitely far.
pub fn distance_to_polyline(p: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => p.distance_to(only),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Sum of consecutive distances in pixels.
pub fn polyline_length_px(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Polyline length in meters; 0 when the scale is unknown.
pub fn line_length(points: &[Point], meters_per_pixel: Option<f64>) -> f64 {
    meters_per_pixel
        .map(|ratio| polyline_length_px(points) * ratio)
        .unwrap_or(0.0)
}

/// Rounds the direction from `anchor` to `candidate` to the nearest multiple
/// of 45°, keeping the distance.
pub fn snap_to_45(anchor: Point, candidate: Point) -> Point {
    let v = candidate - anchor;
    let len = v.length();
    if len < GEOMETRY_EPSILON {
        return candidate;
    }
    let step = ANGLE_SNAP_DEG.to_radians();
    let angle = (v.y.atan2(v.x) / step).round() * step;
    Point::new(anchor.x + len * angle.cos(), anchor.y + len * angle.sin())
}

/// Bearing of the line `start`→`end` in degrees `[0, 360)`: 0 is image-up,
/// 90 is right, 180 is down, 270 is left.
pub fn azimuth_from_line(start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    normalize_degrees(dx.atan2(-dy).to_degrees())
}

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) - GEOMETRY_EPSILON
        && p.x <= a.x.max(b.x) + GEOMETRY_EPSILON
        && p.y >= a.y.min(b.y) - GEOMETRY_EPSILON
        && p.y <= a.y.max(b.y) + GEOMETRY_EPSILON
}

/// Segment intersection test. Touching endpoints and collinear overlaps
/// count as intersecting.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if ((d1 > GEOMETRY_EPSILON && d2 < -GEOMETRY_EPSILON)
        || (d1 < -GEOMETRY_EPSILON && d2 > GEOMETRY_EPSILON))
        && ((d3 > GEOMETRY_EPSILON && d4 < -GEOMETRY_EPSILON)
            || (d3 < -GEOMETRY_EPSILON && d4 > GEOMETRY_EPSILON))
    {
        return true;
    }

    (d1.abs() <= GEOMETRY_EPSILON && on_segment(b1, b2, a1))
        || (d2.abs() <= GEOMETRY_EPSILON && on_segment(b1, b2, a2))
        || (d3.abs() <= GEOMETRY_EPSILON && on_segment(a1, a2, b1))
        || (d4.abs() <= GEOMETRY_EPSILON && on_segment(a1, a2, b2))
}

/// True when the segment has any point inside or on the box.
pub fn segment_intersects_box(a: Point, b: Point, rect: &Bounds) -> bool {
    if rect.contains(a) || rect.contains(b) {
        return true;
    }
    let [tl, tr, br, bl] = rect.corners();
    segments_intersect(a, b, tl, tr)
        || segments_intersect(a, b, tr, br)
        || segments_intersect(a, b, br, bl)
        || segments_intersect(a, b, bl, tl)
}

/// True when any part of the path crosses or touches the box, not only
/// its vertices.
pub fn polyline_intersects_box(points: &[Point], rect: &Bounds) -> bool {
    match points {
        [] => false,
        [only] => rect.contains(*only),
        _ => points
            .windows(2)
            .any(|w| segment_intersects_box(w[0], w[1], rect)),
    }
}
