//! Spacing/Snap Engine.
//!
//! Adjusts a candidate placement so that it sits exactly the minimum
//! spacing away from a neighbour of the same kind, optionally aligned with
//! it. Arrays, equipment and rectangular materials each have a variant
//! ([`snap_array`], [`snap_equipment`], [`snap_material`]) over the same
//! oriented-rectangle algorithm. Cable endpoints use the simpler terminus
//! search in [`find_cable_terminus`].
//!
//! A snap never fails: when nothing qualifies, or no scale is calibrated,
//! the input position and rotation come back unchanged with
//! `snapped_to_id == None`.

mod array;
mod cable;
mod equipment;
mod material;
mod rect;

pub use array::{snap_array, ArraySnap};
pub use cable::{find_cable_terminus, CableSnap};
pub use equipment::snap_equipment;
pub use material::snap_material;

pub(crate) use rect::separation;

use sitemark_core::EntityId;
use sitemark_settings::Config;

use crate::model::{FootprintContext, Placeable, Point};
use rect::{Neighbour, RectSnapInput, RotationPolicy};

/// Outcome of a spacing snap.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub position: Point,
    pub rotation: f64,
    /// Neighbour the placement snapped to; `None` means use the input as is.
    pub snapped_to_id: Option<EntityId>,
}

impl SnapResult {
    pub fn unsnapped(position: Point, rotation: f64) -> Self {
        Self {
            position,
            rotation,
            snapped_to_id: None,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.snapped_to_id.is_some()
    }
}

/// Inputs shared by every spacing snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapParams {
    /// Calibrated meters per pixel. `None` disables spacing snapping.
    pub meters_per_pixel: Option<f64>,
    pub zoom: f64,
    /// Attraction window beyond the spacing, in screen pixels
    pub tolerance_px: f64,
    /// Spacing used when the candidate has none of its own, in meters
    pub default_min_spacing_m: f64,
    pub force_align: bool,
}

impl SnapParams {
    pub fn from_config(config: &Config, meters_per_pixel: Option<f64>, zoom: f64) -> Self {
        Self {
            meters_per_pixel,
            zoom,
            tolerance_px: config.snapping.spacing_tolerance_px,
            default_min_spacing_m: config.snapping.default_min_spacing_m,
            force_align: false,
        }
    }

    pub fn with_force_align(mut self, force_align: bool) -> Self {
        self.force_align = force_align;
        self
    }

    /// Screen tolerance in world units at the current zoom.
    pub fn tolerance_world(&self) -> f64 {
        self.tolerance_px / self.zoom.max(f64::EPSILON)
    }
}

/// Shared driver: snaps `candidate` against `existing` (skipping any item
/// with the candidate's own id).
fn snap_placeable<T: Placeable>(
    candidate: &T,
    existing: &[T],
    params: &SnapParams,
    ctx: &FootprintContext,
    policy: RotationPolicy,
) -> SnapResult {
    let unsnapped = SnapResult::unsnapped(candidate.anchor(), candidate.rotation());

    let Some(ratio) = params.meters_per_pixel else {
        tracing::trace!("No scale calibrated, spacing snap skipped");
        return unsnapped;
    };

    let spacing_m = candidate.min_spacing().unwrap_or(params.default_min_spacing_m);
    let neighbours: Vec<Neighbour<'_>> = existing
        .iter()
        .filter(|item| item.id() != candidate.id())
        .map(|item| Neighbour {
            id: item.id(),
            rect: item.footprint(ctx),
        })
        .collect();
    if neighbours.is_empty() {
        return unsnapped;
    }

    let input = RectSnapInput {
        candidate: candidate.footprint(ctx),
        spacing: spacing_m / ratio,
        tolerance: params.tolerance_world(),
        policy,
        force_align: params.force_align,
    };

    match rect::snap_rect(&input, &neighbours) {
        Some(snap) => SnapResult {
            position: snap.position,
            rotation: snap.rotation,
            snapped_to_id: Some(snap.neighbour),
        },
        None => unsnapped,
    }
}
