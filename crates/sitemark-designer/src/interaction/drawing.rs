//! Multi-click drawing: roof masks, supply lines, the calibration line and
//! the roof direction line.
//!
//! Each drawing is an explicit point buffer on the tool state. Events
//! append to it or flush it into the scene; nothing is committed until the
//! buffer holds enough points.

use sitemark_core::constants::{GEOMETRY_EPSILON, MIN_LINE_POINTS, MIN_ROOF_POINTS};

use super::context::EditorContext;
use super::events::{InteractionOutcome, PointerEvent};
use super::tools::{CalibrationState, DirectionDraft, Draft, LineDraft};
use crate::geometry::{azimuth_from_line, snap_to_45};
use crate::model::{ItemKind, Point, RoofMask, SupplyLine};
use crate::selection_manager::SelectionManager;
use crate::snap::find_cable_terminus;

/// Applies the 45° constraint relative to `anchor` when shift is held.
fn constrain(anchor: Option<Point>, world: Point, event: &PointerEvent) -> Point {
    match anchor {
        Some(anchor) if event.modifiers.shift => snap_to_45(anchor, world),
        _ => world,
    }
}

fn push_point(draft: &mut Draft, point: Point) {
    let repeated = draft
        .points
        .last()
        .is_some_and(|last| last.distance_to(&point) < GEOMETRY_EPSILON);
    if !repeated {
        draft.points.push(point);
    }
}

pub(super) fn roof_down(
    draft: &mut Draft,
    ctx: &mut EditorContext,
    world: Point,
    event: &PointerEvent,
) -> InteractionOutcome {
    if ctx.scene.is_read_only() {
        return InteractionOutcome::Unchanged;
    }
    // The first press of a double-click already placed the point.
    if event.is_double_click() {
        return finish_roof(draft, ctx);
    }

    if draft.points.len() >= MIN_ROOF_POINTS {
        let close_radius = ctx.world_tolerance(ctx.config.snapping.roof_close_radius_px);
        if draft.points[0].distance_to(&world) <= close_radius {
            return finish_roof(draft, ctx);
        }
    }

    let point = constrain(draft.points.last().copied(), world, event);
    push_point(draft, point);
    draft.cursor = Some(point);
    InteractionOutcome::Redraw
}

pub(super) fn roof_move(draft: &mut Draft, world: Point, event: &PointerEvent) -> InteractionOutcome {
    if draft.is_empty() {
        return InteractionOutcome::Unchanged;
    }
    draft.cursor = Some(constrain(draft.points.last().copied(), world, event));
    InteractionOutcome::Redraw
}

/// Commits the roof outline if it has enough points. Below the minimum
/// the draft is kept so the user can keep clicking.
pub(super) fn finish_roof(draft: &mut Draft, ctx: &mut EditorContext) -> InteractionOutcome {
    if draft.points.len() < MIN_ROOF_POINTS {
        tracing::debug!("Roof outline has {} points, not closing", draft.points.len());
        return InteractionOutcome::Unchanged;
    }

    let placement = &ctx.config.placement;
    let mask = RoofMask::new(
        std::mem::take(&mut draft.points),
        placement.default_roof_pitch_deg,
        placement.default_roof_direction_deg,
        ctx.scene.meters_per_pixel(),
    );
    draft.cursor = None;
    tracing::debug!("Closing roof mask {} ({} points)", mask.id, mask.points.len());

    if ctx.scene.set_roof_masks(|masks| {
        let mut masks = masks.to_vec();
        masks.push(mask);
        masks
    }) {
        InteractionOutcome::SceneChanged
    } else {
        InteractionOutcome::Redraw
    }
}

pub(super) fn line_down(
    line: &mut LineDraft,
    ctx: &mut EditorContext,
    world: Point,
    event: &PointerEvent,
) -> InteractionOutcome {
    if ctx.scene.is_read_only() {
        return InteractionOutcome::Unchanged;
    }
    if event.is_double_click() {
        return finish_line(line, ctx);
    }

    let radius = ctx.world_tolerance(ctx.config.snapping.cable_snap_radius_px);
    let terminus = find_cable_terminus(world, line.cable_type, ctx.scene.state(), &ctx.footprint(), radius);
    let point = match &terminus {
        Some(snap) => snap.position,
        None => constrain(line.draft.points.last().copied(), world, event),
    };
    push_point(&mut line.draft, point);
    line.draft.cursor = Some(point);

    if let Some(snap) = terminus {
        if line.draft.points.len() >= MIN_LINE_POINTS {
            tracing::debug!("{} line reached {} {}", line.cable_type, snap.snapped_to_type, snap.snapped_to_id);
            return finish_line(line, ctx);
        }
    }
    InteractionOutcome::Redraw
}

pub(super) fn line_move(
    line: &mut LineDraft,
    ctx: &EditorContext,
    world: Point,
    event: &PointerEvent,
) -> InteractionOutcome {
    let radius = ctx.world_tolerance(ctx.config.snapping.cable_snap_radius_px);
    line.snap = find_cable_terminus(world, line.cable_type, ctx.scene.state(), &ctx.footprint(), radius);
    if line.draft.is_empty() {
        // Only the terminus highlight changes
        return InteractionOutcome::Redraw;
    }
    line.draft.cursor = Some(match &line.snap {
        Some(snap) => snap.position,
        None => constrain(line.draft.points.last().copied(), world, event),
    });
    InteractionOutcome::Redraw
}

pub(super) fn finish_line(line: &mut LineDraft, ctx: &mut EditorContext) -> InteractionOutcome {
    if line.draft.points.len() < MIN_LINE_POINTS {
        tracing::debug!("Line has {} points, not finishing", line.draft.points.len());
        return InteractionOutcome::Unchanged;
    }

    let cable_type = line.cable_type;
    let number = ctx
        .scene
        .state()
        .lines()
        .iter()
        .filter(|l| l.cable_type == cable_type)
        .count()
        + 1;
    let supply = SupplyLine::new(
        format!("{} {}", cable_type, number),
        cable_type,
        std::mem::take(&mut line.draft.points),
        ctx.scene.meters_per_pixel(),
    );
    line.draft.cursor = None;
    line.snap = None;
    tracing::debug!("Finished {} ({:.2} m)", supply.name, supply.length);

    if ctx.scene.set_lines(|lines| {
        let mut lines = lines.to_vec();
        lines.push(supply);
        lines
    }) {
        InteractionOutcome::SceneChanged
    } else {
        InteractionOutcome::Redraw
    }
}

pub(super) fn calibration_down(
    state: &mut CalibrationState,
    ctx: &EditorContext,
    world: Point,
) -> InteractionOutcome {
    if ctx.scene.is_read_only() {
        return InteractionOutcome::Unchanged;
    }
    *state = CalibrationState {
        start: Some(world),
        end: Some(world),
        dragging: true,
        pending: None,
    };
    InteractionOutcome::Redraw
}

pub(super) fn calibration_move(
    state: &mut CalibrationState,
    world: Point,
    event: &PointerEvent,
) -> InteractionOutcome {
    if !state.dragging {
        return InteractionOutcome::Unchanged;
    }
    state.end = Some(constrain(state.start, world, event));
    InteractionOutcome::Redraw
}

/// Finishes the reference line. A long enough line is kept on screen
/// until the real distance arrives through
/// [`super::InteractionController::apply_calibration`].
pub(super) fn calibration_up(state: &mut CalibrationState, ctx: &EditorContext) -> InteractionOutcome {
    if !state.dragging {
        return InteractionOutcome::Unchanged;
    }
    state.dragging = false;

    let (Some(start), Some(end)) = (state.start, state.end) else {
        return InteractionOutcome::Unchanged;
    };
    let pixel_distance = start.distance_to(&end);
    if pixel_distance < ctx.world_tolerance(ctx.config.snapping.calibration_min_px) {
        tracing::debug!("Calibration line too short ({:.2} px)", pixel_distance);
        *state = CalibrationState::default();
        return InteractionOutcome::Redraw;
    }

    state.pending = Some(pixel_distance);
    InteractionOutcome::CalibrationRequested { pixel_distance }
}

pub(super) fn direction_down(
    draft: &mut DirectionDraft,
    ctx: &EditorContext,
    selection: &SelectionManager,
    world: Point,
) -> InteractionOutcome {
    if ctx.scene.is_read_only() {
        return InteractionOutcome::Unchanged;
    }

    let state = ctx.scene.state();
    let target = state
        .roof_masks()
        .iter()
        .rev()
        .find(|m| m.contains(world))
        .map(|m| m.id.clone())
        .or_else(|| {
            selection
                .selected()
                .iter()
                .find(|r| r.kind == ItemKind::RoofMask)
                .map(|r| r.id.clone())
        });

    let Some(target) = target else {
        tracing::debug!("No roof mask under {} for a direction line", world);
        return InteractionOutcome::Unchanged;
    };
    *draft = DirectionDraft {
        start: Some(world),
        end: Some(world),
        target: Some(target),
    };
    InteractionOutcome::Redraw
}

pub(super) fn direction_move(draft: &mut DirectionDraft, world: Point, event: &PointerEvent) -> InteractionOutcome {
    if draft.start.is_none() {
        return InteractionOutcome::Unchanged;
    }
    draft.end = Some(constrain(draft.start, world, event));
    InteractionOutcome::Redraw
}

/// Sets the target roof's direction from the drawn high-to-low line.
pub(super) fn direction_up(draft: &mut DirectionDraft, ctx: &mut EditorContext) -> InteractionOutcome {
    let finished = std::mem::take(draft);
    let (Some(start), Some(end), Some(target)) = (finished.start, finished.end, finished.target) else {
        return InteractionOutcome::Unchanged;
    };
    if start.distance_to(&end) < ctx.world_tolerance(ctx.config.snapping.calibration_min_px) {
        return InteractionOutcome::Redraw;
    }

    let azimuth = azimuth_from_line(start, end);
    tracing::debug!("Roof {} direction {:.1}°", target, azimuth);
    if ctx.scene.set_roof_direction(&target, azimuth) {
        InteractionOutcome::SceneChanged
    } else {
        InteractionOutcome::Redraw
    }
}
