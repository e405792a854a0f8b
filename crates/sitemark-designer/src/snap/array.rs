use sitemark_core::EntityId;

use super::{rect::RotationPolicy, snap_placeable, SnapParams, SnapResult};
use crate::geometry::normalize_degrees;
use crate::model::{FootprintContext, Placeable, PvArrayItem, RoofMask};

/// Array snap result plus the roof mask the array landed on.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySnap {
    pub result: SnapResult,
    pub roof_mask_id: Option<EntityId>,
}

/// Topmost roof mask containing `candidate`'s anchor.
fn roof_under<'a>(candidate: &PvArrayItem, roof_masks: &'a [RoofMask]) -> Option<&'a RoofMask> {
    roof_masks.iter().rev().find(|m| m.contains(candidate.position))
}

/// Spacing snap for PV arrays.
///
/// The candidate's rotation is first derived from the roof under it
/// (`base + manual_rotation`), then the spacing snap runs with the
/// neighbour's rotation always inherited, so adjacent arrays stay parallel.
pub fn snap_array(
    candidate: &PvArrayItem,
    manual_rotation: f64,
    existing: &[PvArrayItem],
    roof_masks: &[RoofMask],
    params: &SnapParams,
    ctx: &FootprintContext,
) -> ArraySnap {
    let roof = roof_under(candidate, roof_masks);
    let base = roof.map_or(0.0, RoofMask::array_base_rotation);

    let mut oriented = candidate.clone();
    oriented.set_pose(candidate.position, normalize_degrees(base + manual_rotation));

    let result = snap_placeable(&oriented, existing, params, ctx, RotationPolicy::AlwaysInherit);
    ArraySnap {
        result,
        roof_mask_id: roof.map(|m| m.id.clone()),
    }
}
