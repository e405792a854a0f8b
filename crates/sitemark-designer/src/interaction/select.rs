//! Select tool: click selection, group drag and marquee.
//!
//! A drag never touches the scene while it runs. The moved state is
//! derived from the drag on demand ([`drag_preview`]) for rendering and
//! committed once on release.

use super::context::EditorContext;
use super::events::{InteractionOutcome, PointerEvent};
use super::tools::{DragItem, DragSnap, DragState, MarqueeState, SelectState};
use crate::design_state::DesignState;
use crate::layers::LayerVisibility;
use crate::model::{ItemKind, ItemRef, Placeable, Point};
use crate::selection_manager::{hit_test, SelectionManager};
use crate::snap::{snap_array, snap_equipment, snap_material, SnapResult};
use sitemark_core::constants::GEOMETRY_EPSILON;

pub(super) fn select_down(
    state: &mut SelectState,
    selection: &mut SelectionManager,
    ctx: &EditorContext,
    layers: LayerVisibility,
    world: Point,
    event: &PointerEvent,
) -> InteractionOutcome {
    let scene = ctx.scene.state();
    let hit = hit_test(scene, world, &ctx.hit_context(layers));

    if event.modifiers.extends_selection() {
        match hit {
            Some(item) => selection.toggle(item),
            None => {
                *state = SelectState::Marquee(MarqueeState {
                    start: world,
                    current: world,
                    additive: true,
                })
            }
        }
        return InteractionOutcome::Redraw;
    }

    let Some(item) = hit else {
        *state = SelectState::Marquee(MarqueeState {
            start: world,
            current: world,
            additive: false,
        });
        return InteractionOutcome::Redraw;
    };

    if !selection.is_selected(&item) {
        selection.select_only(item);
    }
    if ctx.scene.is_read_only() {
        return InteractionOutcome::Redraw;
    }

    let items = selection
        .selected()
        .iter()
        .filter_map(|r| {
            scene.item(r).map(|entity| DragItem {
                item: r.clone(),
                initial: entity.anchor(),
            })
        })
        .collect();
    *state = SelectState::Dragging(DragState {
        start: world,
        current: world,
        items,
        snap: None,
    });
    InteractionOutcome::Redraw
}

/// Spacing snap for a lone dragged rectangle. Group drags do not snap.
fn drag_snap(drag: &DragState, ctx: &EditorContext, force_align: bool) -> Option<DragSnap> {
    let [dragged] = drag.items.as_slice() else {
        return None;
    };
    let target = dragged.initial + drag.delta();
    let scene = ctx.scene.state();
    let params = ctx.snap_params(force_align);
    let footprint = ctx.footprint();
    let id = &dragged.item.id;

    let result: SnapResult = match dragged.item.kind {
        ItemKind::PvArray => {
            let mut candidate = scene.pv_array(id)?.clone();
            let rotation = candidate.rotation;
            candidate.set_pose(target, rotation);
            // No roof masks: a dragged array keeps its own rotation as the base.
            snap_array(&candidate, rotation, scene.pv_arrays(), &[], &params, &footprint).result
        }
        ItemKind::Equipment => {
            let mut candidate = scene.equipment_item(id)?.clone();
            let rotation = candidate.rotation();
            candidate.set_pose(target, rotation);
            snap_equipment(&candidate, scene.equipment(), &params, &footprint)
        }
        ItemKind::Walkway => {
            let mut candidate = scene.walkway(id)?.clone();
            let rotation = candidate.rotation();
            candidate.set_pose(target, rotation);
            snap_material(&candidate, scene.placed_walkways(), &params, &footprint)
        }
        ItemKind::CableTray => {
            let mut candidate = scene.cable_tray(id)?.clone();
            let rotation = candidate.rotation();
            candidate.set_pose(target, rotation);
            snap_material(&candidate, scene.placed_cable_trays(), &params, &footprint)
        }
        ItemKind::Cable | ItemKind::RoofMask => return None,
    };

    result.snapped_to_id.map(|snapped_to_id| DragSnap {
        position: result.position,
        rotation: result.rotation,
        snapped_to_id,
    })
}

pub(super) fn select_move(
    state: &mut SelectState,
    ctx: &EditorContext,
    world: Point,
    event: &PointerEvent,
) -> InteractionOutcome {
    match state {
        SelectState::Idle => InteractionOutcome::Unchanged,
        SelectState::Dragging(drag) => {
            drag.current = world;
            drag.snap = drag_snap(drag, ctx, event.modifiers.alt);
            InteractionOutcome::Redraw
        }
        SelectState::Marquee(marquee) => {
            marquee.current = world;
            InteractionOutcome::Redraw
        }
    }
}

/// The scene as it would look with the drag applied.
pub fn drag_preview(drag: &DragState, scene: &DesignState) -> DesignState {
    if let (Some(snap), [dragged]) = (&drag.snap, drag.items.as_slice()) {
        return scene.with_item_pose(&dragged.item, snap.position, snap.rotation);
    }
    let delta = drag.delta();
    let refs: Vec<ItemRef> = drag.items.iter().map(|d| d.item.clone()).collect();
    scene.translated(&refs, delta.x, delta.y)
}

fn drag_moved(drag: &DragState) -> bool {
    drag.snap.is_some() || drag.delta().length() > GEOMETRY_EPSILON
}

pub(super) fn select_up(
    state: &mut SelectState,
    selection: &mut SelectionManager,
    ctx: &mut EditorContext,
    layers: LayerVisibility,
) -> InteractionOutcome {
    match std::mem::take(state) {
        SelectState::Idle => InteractionOutcome::Unchanged,
        SelectState::Dragging(drag) => {
            if !drag_moved(&drag) {
                return InteractionOutcome::Redraw;
            }
            let next = drag_preview(&drag, ctx.scene.state());
            tracing::debug!("Dragged {} item(s) by {}", drag.items.len(), drag.delta());
            if ctx.scene.commit(next) {
                InteractionOutcome::SceneChanged
            } else {
                InteractionOutcome::Redraw
            }
        }
        SelectState::Marquee(marquee) => {
            let rect = marquee.bounds();
            let min = ctx.world_tolerance(ctx.config.snapping.marquee_min_px);
            if rect.width() < min || rect.height() < min {
                if !marquee.additive {
                    selection.clear();
                }
                return InteractionOutcome::Redraw;
            }
            let count = selection.select_in_rect(ctx.scene.state(), &rect, &layers, marquee.additive);
            tracing::debug!("Marquee selected {} item(s)", count);
            InteractionOutcome::Redraw
        }
    }
}

/// Removes every selected entity in one history step.
pub(super) fn delete_selected(selection: &mut SelectionManager, ctx: &mut EditorContext) -> InteractionOutcome {
    if selection.is_empty() || ctx.scene.is_read_only() {
        return InteractionOutcome::Unchanged;
    }
    let doomed = selection.selected().to_vec();
    if ctx.scene.remove_items(&doomed) {
        selection.clear();
        InteractionOutcome::SceneChanged
    } else {
        InteractionOutcome::Unchanged
    }
}
