//! Placement tools: arrays, equipment, materials and batch groups.
//!
//! Pointer motion recomputes a snapped ghost; a click commits what the
//! ghost shows. Batch groups are committed as a single history step.

use sitemark_core::EntityId;

use super::context::EditorContext;
use super::events::{InteractionOutcome, PointerEvent};
use super::tools::{Ghost, PlacementItem, PlacementState};
use crate::design_state::DesignState;
use crate::geometry::normalize_degrees;
use crate::model::{
    EquipmentItem, MaterialKind, PlacedMaterial, Point, PvArrayItem, RoofMask,
};
use crate::snap::{snap_array, snap_equipment, snap_material, SnapResult};

fn ghost_from(result: SnapResult, roof_mask_id: Option<EntityId>) -> Ghost {
    Ghost {
        position: result.position,
        rotation: result.rotation,
        snapped_to_id: result.snapped_to_id,
        roof_mask_id,
    }
}

fn materials_of(state: &DesignState, kind: MaterialKind) -> &[PlacedMaterial] {
    match kind {
        MaterialKind::Walkway => state.placed_walkways(),
        MaterialKind::CableTray => state.placed_cable_trays(),
    }
}

/// Where the pending item would land if the user clicked at `world`.
pub(super) fn compute_ghost(
    placement: &PlacementState,
    ctx: &EditorContext,
    world: Point,
    force_align: bool,
) -> Ghost {
    let params = ctx.snap_params(force_align);
    let footprint = ctx.footprint();
    let state = ctx.scene.state();
    let manual = placement.manual_rotation;

    match &placement.item {
        PlacementItem::Array(spec) => {
            let candidate = PvArrayItem::new(*spec, world, manual);
            let snap = snap_array(
                &candidate,
                manual,
                state.pv_arrays(),
                state.roof_masks(),
                &params,
                &footprint,
            );
            ghost_from(snap.result, snap.roof_mask_id)
        }
        PlacementItem::Equipment(equipment_type) => {
            let candidate = EquipmentItem::new(*equipment_type, world, manual);
            ghost_from(
                snap_equipment(&candidate, state.equipment(), &params, &footprint),
                None,
            )
        }
        PlacementItem::Material(config) => {
            let candidate = PlacedMaterial::from_config(config, world, manual);
            let existing = materials_of(state, config.kind);
            ghost_from(snap_material(&candidate, existing, &params, &footprint), None)
        }
        PlacementItem::Batch(_) => ghost_from(SnapResult::unsnapped(world, manual), None),
    }
}

pub(super) fn placement_move(
    placement: &mut PlacementState,
    ctx: &EditorContext,
    world: Point,
    event: &PointerEvent,
) -> InteractionOutcome {
    placement.ghost = Some(compute_ghost(placement, ctx, world, event.modifiers.alt));
    InteractionOutcome::Redraw
}

fn appended<T: Clone>(items: &[T], extra: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out = items.to_vec();
    out.extend(extra);
    out
}

fn roof_at(roof_masks: &[RoofMask], p: Point) -> Option<EntityId> {
    roof_masks.iter().rev().find(|m| m.contains(p)).map(|m| m.id.clone())
}

pub(super) fn placement_down(
    placement: &mut PlacementState,
    ctx: &mut EditorContext,
    world: Point,
    event: &PointerEvent,
) -> InteractionOutcome {
    if ctx.scene.is_read_only() {
        return InteractionOutcome::Unchanged;
    }

    let ghost = compute_ghost(placement, ctx, world, event.modifiers.alt);
    let (committed, ids) = match &placement.item {
        PlacementItem::Array(spec) => {
            let mut array = PvArrayItem::new(*spec, ghost.position, ghost.rotation);
            array.roof_mask_id = ghost.roof_mask_id.clone();
            let id = array.id.clone();
            (ctx.scene.set_pv_arrays(|arrays| appended(arrays, [array])), vec![id])
        }
        PlacementItem::Equipment(equipment_type) => {
            let item = EquipmentItem::new(*equipment_type, ghost.position, ghost.rotation);
            let id = item.id.clone();
            (ctx.scene.set_equipment(|items| appended(items, [item])), vec![id])
        }
        PlacementItem::Material(config) => {
            let placed = PlacedMaterial::from_config(config, ghost.position, ghost.rotation);
            let id = placed.id.clone();
            let committed = match config.kind {
                MaterialKind::Walkway => ctx.scene.set_placed_walkways(|w| appended(w, [placed])),
                MaterialKind::CableTray => ctx.scene.set_placed_cable_trays(|t| appended(t, [placed])),
            };
            (committed, vec![id])
        }
        PlacementItem::Batch(group) => {
            let mut batch = group.instantiate(world, placement.manual_rotation, &ctx.footprint());
            if batch.is_empty() {
                tracing::debug!("Batch '{}' has no entries", group.name);
                return InteractionOutcome::Unchanged;
            }
            let roofs = ctx.scene.state().roof_masks();
            for array in &mut batch.arrays {
                array.roof_mask_id = roof_at(roofs, array.position);
            }

            let ids: Vec<EntityId> = batch
                .arrays
                .iter()
                .map(|a| a.id.clone())
                .chain(batch.equipment.iter().map(|e| e.id.clone()))
                .chain(batch.walkways.iter().map(|w| w.id.clone()))
                .chain(batch.cable_trays.iter().map(|t| t.id.clone()))
                .collect();
            tracing::debug!("Placing batch '{}' ({} items)", group.name, batch.len());
            let committed = ctx.scene.apply(|state| {
                state
                    .with_pv_arrays(appended(state.pv_arrays(), batch.arrays))
                    .with_equipment(appended(state.equipment(), batch.equipment))
                    .with_placed_walkways(appended(state.placed_walkways(), batch.walkways))
                    .with_placed_cable_trays(appended(state.placed_cable_trays(), batch.cable_trays))
            });
            (committed, ids)
        }
    };

    placement.ghost = Some(ghost);
    if committed {
        InteractionOutcome::Placed { ids }
    } else {
        InteractionOutcome::Unchanged
    }
}

/// Turns the pending item by one rotation step.
pub(super) fn rotate(placement: &mut PlacementState, ctx: &EditorContext) -> InteractionOutcome {
    placement.manual_rotation =
        normalize_degrees(placement.manual_rotation + ctx.config.placement.rotation_step_deg);
    if let Some(ghost) = placement.ghost.clone() {
        let world = ghost.position;
        placement.ghost = Some(compute_ghost(placement, ctx, world, false));
    }
    tracing::debug!("Placement rotation {:.0}°", placement.manual_rotation);
    InteractionOutcome::Redraw
}
