//! Interaction Controller.
//!
//! Turns pointer and keyboard events into scene mutations, view changes
//! and ephemeral preview state. The active tool is a [`ToolState`] variant
//! and every variant has its own handler functions; the dispatch `match`
//! is exhaustive, so a new tool cannot fall through silently.
//!
//! The controller owns only ephemeral state (tool drafts, selection, layer
//! flags, hover). The design itself lives in the [`EditorContext`] passed
//! to every call.
//!
//! This module is split into submodules:
//! - `events`: input events and handler outcomes
//! - `tools`: tool requests and per-tool state
//! - `context`: the editor context (scene, viewport, config)
//! - `drawing`: roof, line, calibration and direction drawing
//! - `placement`: ghost preview and placement commits
//! - `select`: click/marquee selection, group drag, delete
//! - `pick`: dimension and align-edges tools

mod context;
mod drawing;
mod events;
mod pick;
mod placement;
mod select;
mod tools;

pub use context::EditorContext;
pub use events::{
    DimensionInfo, EdgePick, InteractionOutcome, Key, KeyEvent, Modifiers, MouseButton,
    PointerEvent,
};
pub use pick::{measure, pick_edge};
pub use select::drag_preview;
pub use tools::{
    CalibrationState, DirectionDraft, DragItem, DragSnap, DragState, Draft, Ghost, LineDraft,
    MarqueeState, PanState, PickState, PlacementItem, PlacementState, SelectState, Tool, ToolState,
};

use std::borrow::Cow;

use crate::design_state::DesignState;
use crate::layers::LayerVisibility;
use crate::model::{ItemKind, Point, ScaleInfo};
use crate::selection_manager::SelectionManager;

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    tool: ToolState,
    selection: SelectionManager,
    layers: LayerVisibility,
    /// Last pointer position, world space
    hover: Option<Point>,
    /// Last screen position while the middle button pans
    middle_pan: Option<Point>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tool
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionManager {
        &mut self.selection
    }

    pub fn layers(&self) -> LayerVisibility {
        self.layers
    }

    /// Hides or shows a category. Hidden items also leave the selection.
    pub fn set_layer_visible(&mut self, kind: ItemKind, visible: bool) {
        self.layers.set_visible(kind, visible);
        if !visible {
            let hidden: Vec<_> = self
                .selection
                .selected()
                .iter()
                .filter(|r| r.kind == kind)
                .cloned()
                .collect();
            for item in hidden {
                self.selection.toggle(item);
            }
        }
    }

    pub fn hover(&self) -> Option<Point> {
        self.hover
    }

    /// Switches tools, dropping whatever the previous tool had in progress.
    ///
    /// Editing tools are refused in read-only mode.
    pub fn set_tool(&mut self, ctx: &EditorContext, tool: Tool) -> InteractionOutcome {
        if tool.is_editing() && ctx.scene.is_read_only() {
            tracing::debug!("Tool {} unavailable in read-only mode", tool);
            return InteractionOutcome::Unchanged;
        }
        if self.tool.in_progress() {
            tracing::debug!("Cancelled {} in progress", self.tool.name());
        }
        tracing::debug!("Tool: {}", tool);
        self.tool = ToolState::from(tool);
        InteractionOutcome::Redraw
    }

    /// Escape: abandons the current drawing, drag or marquee. A pending
    /// placement is cleared by going back to the select tool.
    pub fn cancel(&mut self) -> InteractionOutcome {
        let next = match &self.tool {
            ToolState::Placement(_) => ToolState::Select(SelectState::Idle),
            ToolState::Pan(_) => ToolState::Pan(PanState::default()),
            ToolState::Select(_) => ToolState::Select(SelectState::Idle),
            ToolState::ScaleCalibration(_) => ToolState::ScaleCalibration(CalibrationState::default()),
            ToolState::RoofMask(_) => ToolState::RoofMask(Draft::default()),
            ToolState::RoofDirection(_) => ToolState::RoofDirection(DirectionDraft::default()),
            ToolState::Line(line) => ToolState::Line(LineDraft {
                cable_type: line.cable_type,
                draft: Draft::default(),
                snap: None,
            }),
            ToolState::Dimension(_) => ToolState::Dimension(PickState::default()),
            ToolState::AlignEdges(_) => ToolState::AlignEdges(PickState::default()),
        };
        if next == self.tool {
            return InteractionOutcome::Unchanged;
        }
        tracing::debug!("Cancelled {}", self.tool.name());
        self.tool = next;
        InteractionOutcome::Redraw
    }

    pub fn pointer_down(&mut self, ctx: &mut EditorContext, event: PointerEvent) -> InteractionOutcome {
        match event.button {
            MouseButton::Middle => {
                self.middle_pan = Some(event.position);
                return InteractionOutcome::Unchanged;
            }
            MouseButton::Right => return InteractionOutcome::Unchanged,
            MouseButton::Left => {}
        }

        let world = ctx.viewport.to_world(event.position);
        self.hover = Some(world);
        let layers = self.layers;
        match &mut self.tool {
            ToolState::Pan(pan) => {
                pan.last = Some(event.position);
                InteractionOutcome::Unchanged
            }
            ToolState::Select(state) => {
                select::select_down(state, &mut self.selection, ctx, layers, world, &event)
            }
            ToolState::ScaleCalibration(state) => drawing::calibration_down(state, ctx, world),
            ToolState::RoofMask(draft) => drawing::roof_down(draft, ctx, world, &event),
            ToolState::RoofDirection(draft) => drawing::direction_down(draft, ctx, &self.selection, world),
            ToolState::Line(line) => drawing::line_down(line, ctx, world, &event),
            ToolState::Placement(state) => placement::placement_down(state, ctx, world, &event),
            ToolState::Dimension(pick) => pick::dimension_down(pick, ctx, layers, world),
            ToolState::AlignEdges(pick) => pick::align_edges_down(pick, ctx, layers, world),
        }
    }

    pub fn pointer_move(&mut self, ctx: &mut EditorContext, event: PointerEvent) -> InteractionOutcome {
        if let Some(last) = self.middle_pan {
            let d = event.position - last;
            ctx.viewport.pan_by(d.x, d.y);
            self.middle_pan = Some(event.position);
            self.hover = Some(ctx.viewport.to_world(event.position));
            return InteractionOutcome::Redraw;
        }

        let world = ctx.viewport.to_world(event.position);
        self.hover = Some(world);
        match &mut self.tool {
            ToolState::Pan(pan) => match pan.last {
                Some(last) => {
                    let d = event.position - last;
                    ctx.viewport.pan_by(d.x, d.y);
                    pan.last = Some(event.position);
                    InteractionOutcome::Redraw
                }
                None => InteractionOutcome::Unchanged,
            },
            ToolState::Select(state) => select::select_move(state, ctx, world, &event),
            ToolState::ScaleCalibration(state) => drawing::calibration_move(state, world, &event),
            ToolState::RoofMask(draft) => drawing::roof_move(draft, world, &event),
            ToolState::RoofDirection(draft) => drawing::direction_move(draft, world, &event),
            ToolState::Line(line) => drawing::line_move(line, ctx, world, &event),
            ToolState::Placement(state) => placement::placement_move(state, ctx, world, &event),
            ToolState::Dimension(_) | ToolState::AlignEdges(_) => InteractionOutcome::Unchanged,
        }
    }

    pub fn pointer_up(&mut self, ctx: &mut EditorContext, event: PointerEvent) -> InteractionOutcome {
        if event.button == MouseButton::Middle {
            self.middle_pan = None;
            return InteractionOutcome::Unchanged;
        }
        if event.button != MouseButton::Left {
            return InteractionOutcome::Unchanged;
        }

        let layers = self.layers;
        match &mut self.tool {
            ToolState::Pan(pan) => {
                pan.last = None;
                InteractionOutcome::Unchanged
            }
            ToolState::Select(state) => select::select_up(state, &mut self.selection, ctx, layers),
            ToolState::ScaleCalibration(state) => drawing::calibration_up(state, ctx),
            ToolState::RoofDirection(draft) => drawing::direction_up(draft, ctx),
            ToolState::RoofMask(_)
            | ToolState::Line(_)
            | ToolState::Placement(_)
            | ToolState::Dimension(_)
            | ToolState::AlignEdges(_) => InteractionOutcome::Unchanged,
        }
    }

    /// Zooms about the cursor by `zoom_step` per wheel notch (positive
    /// notches zoom in).
    pub fn wheel(&mut self, ctx: &mut EditorContext, screen: Point, notches: f64) -> InteractionOutcome {
        if notches == 0.0 {
            return InteractionOutcome::Unchanged;
        }
        let before = ctx.viewport.zoom();
        ctx.viewport.zoom_at(screen, ctx.config.view.zoom_step.powf(notches));
        if ctx.viewport.zoom() == before {
            InteractionOutcome::Unchanged
        } else {
            InteractionOutcome::Redraw
        }
    }

    pub fn resize(&mut self, ctx: &mut EditorContext, width: f64, height: f64) -> InteractionOutcome {
        ctx.viewport.resize(width, height);
        InteractionOutcome::Redraw
    }

    pub fn key_down(&mut self, ctx: &mut EditorContext, event: KeyEvent) -> InteractionOutcome {
        let mods = event.modifiers;
        if mods.ctrl {
            if event.is_char('z') && !mods.shift {
                return self.undo(ctx);
            }
            if event.is_char('y') || (event.is_char('z') && mods.shift) {
                return self.redo(ctx);
            }
            if event.is_char('s') {
                return if ctx.scene.is_read_only() {
                    InteractionOutcome::Unchanged
                } else {
                    InteractionOutcome::SaveRequested
                };
            }
            return InteractionOutcome::Unchanged;
        }

        match event.key {
            Key::Escape => self.cancel(),
            Key::Enter => self.complete(ctx),
            Key::Delete | Key::Backspace => select::delete_selected(&mut self.selection, ctx),
            Key::Char(_) if event.is_char('r') => match &mut self.tool {
                ToolState::Placement(state) if !ctx.scene.is_read_only() => placement::rotate(state, ctx),
                _ => InteractionOutcome::Unchanged,
            },
            Key::Char(_) => InteractionOutcome::Unchanged,
        }
    }

    /// Enter: finishes the roof outline or line being drawn.
    pub fn complete(&mut self, ctx: &mut EditorContext) -> InteractionOutcome {
        if ctx.scene.is_read_only() {
            return InteractionOutcome::Unchanged;
        }
        match &mut self.tool {
            ToolState::RoofMask(draft) => drawing::finish_roof(draft, ctx),
            ToolState::Line(line) => drawing::finish_line(line, ctx),
            _ => InteractionOutcome::Unchanged,
        }
    }

    pub fn undo(&mut self, ctx: &mut EditorContext) -> InteractionOutcome {
        self.cancel_drag();
        if ctx.scene.undo() {
            self.selection.retain_existing(ctx.scene.state());
            InteractionOutcome::SceneChanged
        } else {
            InteractionOutcome::Unchanged
        }
    }

    pub fn redo(&mut self, ctx: &mut EditorContext) -> InteractionOutcome {
        self.cancel_drag();
        if ctx.scene.redo() {
            self.selection.retain_existing(ctx.scene.state());
            InteractionOutcome::SceneChanged
        } else {
            InteractionOutcome::Unchanged
        }
    }

    fn cancel_drag(&mut self) {
        if let ToolState::Select(state) = &mut self.tool {
            *state = SelectState::Idle;
        }
    }

    /// Sets the scale from the pending calibration line and the real
    /// distance it represents, in meters.
    pub fn apply_calibration(&mut self, ctx: &mut EditorContext, real_distance_m: f64) -> InteractionOutcome {
        let ToolState::ScaleCalibration(state) = &mut self.tool else {
            return InteractionOutcome::Unchanged;
        };
        let Some(pixel_distance) = state.pending else {
            tracing::debug!("No calibration line waiting for a distance");
            return InteractionOutcome::Unchanged;
        };

        let scale = match ScaleInfo::calibrate(pixel_distance, real_distance_m) {
            Ok(scale) => scale,
            Err(err) => {
                tracing::warn!("Calibration rejected: {}", err);
                return InteractionOutcome::Unchanged;
            }
        };
        *state = CalibrationState::default();
        if ctx.scene.set_scale(scale) {
            InteractionOutcome::SceneChanged
        } else {
            InteractionOutcome::Redraw
        }
    }

    /// What to render: the current snapshot, with an in-progress drag
    /// applied on top.
    pub fn display_state<'a>(&self, ctx: &'a EditorContext) -> Cow<'a, DesignState> {
        match &self.tool {
            ToolState::Select(SelectState::Dragging(drag)) => {
                Cow::Owned(select::drag_preview(drag, ctx.scene.state()))
            }
            _ => Cow::Borrowed(ctx.scene.state()),
        }
    }
}
