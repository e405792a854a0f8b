use super::{rect::RotationPolicy, snap_placeable, SnapParams, SnapResult};
use crate::model::{EquipmentItem, FootprintContext};

/// Spacing snap for equipment. Rotation is inherited only under force-align.
pub fn snap_equipment(
    candidate: &EquipmentItem,
    existing: &[EquipmentItem],
    params: &SnapParams,
    ctx: &FootprintContext,
) -> SnapResult {
    snap_placeable(candidate, existing, params, ctx, RotationPolicy::InheritWhenForced)
}
