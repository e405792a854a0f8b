use super::{rect::RotationPolicy, snap_placeable, SnapParams, SnapResult};
use crate::model::{FootprintContext, PlacedMaterial};

/// Spacing snap for walkways and cable trays. `existing` must hold items of
/// the candidate's own kind only.
pub fn snap_material(
    candidate: &PlacedMaterial,
    existing: &[PlacedMaterial],
    params: &SnapParams,
    ctx: &FootprintContext,
) -> SnapResult {
    snap_placeable(candidate, existing, params, ctx, RotationPolicy::InheritWhenForced)
}
