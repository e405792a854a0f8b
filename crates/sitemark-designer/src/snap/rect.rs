//! Spacing snap between oriented rectangles.
//!
//! Works in the neighbour's local frame: the candidate's projected half
//! extents are compared with the neighbour's to get the gap on each axis.
//! The axis with the larger gap is the adjacency axis; the candidate is
//! pushed or pulled along it so the gap equals the spacing exactly.

use sitemark_core::EntityId;

use crate::geometry::OrientedRect;
use crate::model::Point;

const SPACING_EPSILON: f64 = 1e-6;

/// An existing item the candidate may snap against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Neighbour<'a> {
    pub id: &'a EntityId,
    pub rect: OrientedRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RotationPolicy {
    /// Inherit the neighbour's rotation only when force-align is held.
    InheritWhenForced,
    /// Always inherit the neighbour's rotation.
    AlwaysInherit,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RectSnapInput {
    pub candidate: OrientedRect,
    /// Required gap, world units
    pub spacing: f64,
    /// Extra attraction window, world units
    pub tolerance: f64,
    pub policy: RotationPolicy,
    pub force_align: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RectSnap {
    pub position: Point,
    pub rotation: f64,
    pub neighbour: EntityId,
}

/// Half extents of a rectangle rotated by `angle_deg` relative to a frame.
fn projected_extents(half_width: f64, half_height: f64, angle_deg: f64) -> (f64, f64) {
    let (s, c) = angle_deg.to_radians().sin_cos();
    (
        (half_width * c).abs() + (half_height * s).abs(),
        (half_width * s).abs() + (half_height * c).abs(),
    )
}

fn sign(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Perpendicular offset after alignment. Candidates are the neighbour's
/// centre line and its two flush edges.
fn align_perpendicular(current: f64, own_extent: f64, neighbour_extent: f64, tolerance: f64, force: bool) -> f64 {
    let targets = [
        0.0,
        -neighbour_extent + own_extent,
        neighbour_extent - own_extent,
    ];
    let mut best = current;
    let mut best_dist = f64::INFINITY;
    for target in targets {
        let d = (target - current).abs();
        if d < best_dist {
            best = target;
            best_dist = d;
        }
    }
    if force || best_dist <= tolerance {
        best
    } else {
        current
    }
}

/// Largest separation between the two rectangles along any of their four
/// edge normals. Negative when they overlap.
pub(crate) fn separation(a: &OrientedRect, b: &OrientedRect) -> f64 {
    let mut best = f64::NEG_INFINITY;
    for rect in [a, b] {
        let (s, c) = rect.rotation.to_radians().sin_cos();
        for axis in [Point::new(c, s), Point::new(-s, c)] {
            let project = |r: &OrientedRect| {
                let corners = r.corners();
                let mut lo = f64::INFINITY;
                let mut hi = f64::NEG_INFINITY;
                for p in corners {
                    let v = p.x * axis.x + p.y * axis.y;
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
                (lo, hi)
            };
            let (a_lo, a_hi) = project(a);
            let (b_lo, b_hi) = project(b);
            let gap = (b_lo - a_hi).max(a_lo - b_hi);
            best = best.max(gap);
        }
    }
    best
}

/// Runs the spacing snap against every neighbour and returns the snap with
/// the smallest positional adjustment, or `None` if nothing qualifies.
pub(crate) fn snap_rect(input: &RectSnapInput, neighbours: &[Neighbour<'_>]) -> Option<RectSnap> {
    let cand = input.candidate;
    let mut best: Option<(f64, RectSnap)> = None;

    for n in neighbours {
        let inherit = match input.policy {
            RotationPolicy::AlwaysInherit => true,
            RotationPolicy::InheritWhenForced => input.force_align,
        };
        let rotation = if inherit { n.rect.rotation } else { cand.rotation };

        let local = n.rect.to_local(cand.center);
        let (ex, ey) = projected_extents(cand.half_width, cand.half_height, rotation - n.rect.rotation);
        let (nw, nh) = (n.rect.half_width, n.rect.half_height);

        let gap_x = local.x.abs() - (ex + nw);
        let gap_y = local.y.abs() - (ey + nh);

        let snapped_local = if gap_x >= gap_y {
            if gap_x > input.spacing + input.tolerance || gap_y > input.tolerance {
                continue;
            }
            let y = align_perpendicular(local.y, ey, nh, input.tolerance, input.force_align);
            Point::new(sign(local.x) * (ex + nw + input.spacing), y)
        } else {
            if gap_y > input.spacing + input.tolerance || gap_x > input.tolerance {
                continue;
            }
            let x = align_perpendicular(local.x, ex, nw, input.tolerance, input.force_align);
            Point::new(x, sign(local.y) * (ey + nh + input.spacing))
        };

        let position = n.rect.to_world(snapped_local);
        let snapped_rect = OrientedRect { center: position, rotation, ..cand };

        let blocked = neighbours
            .iter()
            .any(|other| separation(&snapped_rect, &other.rect) < input.spacing - SPACING_EPSILON);
        if blocked {
            tracing::trace!("Snap against {} rejected: collides with another item", n.id);
            continue;
        }

        let adjustment = position.distance_to(&cand.center);
        if best.as_ref().map_or(true, |(d, _)| adjustment < *d) {
            best = Some((
                adjustment,
                RectSnap {
                    position,
                    rotation,
                    neighbour: n.id.clone(),
                },
            ));
        }
    }

    best.map(|(_, snap)| snap)
}
