//! Scene renderer.
//!
//! Paints the current snapshot (plus any drag preview) and the active
//! tool's overlays into an image with tiny-skia. Geometry is mapped to
//! screen space point by point so stroke widths stay constant at any
//! zoom; only the background image goes through a transform.
//!
//! Drawing order, back to front:
//! - background colour and image
//! - roof masks with their slope arrow
//! - walkways and cable trays
//! - PV arrays with the module grid
//! - equipment
//! - cables
//! - selection highlight
//! - tool overlays (drafts, calibration and direction lines, ghost, snap
//!   indicator, marquee)

use image::{Rgba, RgbaImage};
use tiny_skia::{
    Color, ColorU8, FillRule, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash,
    Transform,
};

use crate::design_state::DesignState;
use crate::geometry::OrientedRect;
use crate::interaction::{
    EditorContext, Ghost, InteractionController, PlacementItem, PlacementState, SelectState,
    ToolState,
};
use crate::layers::LayerVisibility;
use crate::model::{
    CableType, EquipmentItem, EquipmentType, FootprintContext, ItemKind, Placeable,
    PlacedMaterial, Point, PvArrayItem, RoofMask,
};
use crate::viewport::Viewport;

const ARROW_LENGTH: f32 = 36.0;
const VERTEX_RADIUS: f32 = 3.5;

fn bg_color() -> Color {
    Color::from_rgba8(44, 62, 80, 255)
}
fn roof_fill() -> Color {
    Color::from_rgba8(230, 126, 34, 60)
}
fn roof_outline() -> Color {
    Color::from_rgba8(230, 126, 34, 255)
}
fn array_fill() -> Color {
    Color::from_rgba8(31, 58, 147, 200)
}
fn module_grid() -> Color {
    Color::from_rgba8(174, 214, 241, 200)
}
fn walkway_fill() -> Color {
    Color::from_rgba8(149, 165, 166, 180)
}
fn tray_fill() -> Color {
    Color::from_rgba8(127, 140, 141, 220)
}
fn dc_color() -> Color {
    Color::from_rgba8(231, 76, 60, 255)
}
fn ac_color() -> Color {
    Color::from_rgba8(52, 152, 219, 255)
}
fn selection_color() -> Color {
    Color::from_rgba8(255, 235, 59, 255)
}
fn preview_color() -> Color {
    Color::from_rgba8(46, 204, 113, 255)
}
fn ghost_fill() -> Color {
    Color::from_rgba8(46, 204, 113, 90)
}

fn equipment_color(equipment_type: EquipmentType) -> Color {
    match equipment_type {
        EquipmentType::Inverter => Color::from_rgba8(142, 68, 173, 255),
        EquipmentType::DcCombiner => Color::from_rgba8(192, 57, 43, 255),
        EquipmentType::AcDisconnect => Color::from_rgba8(41, 128, 185, 255),
        EquipmentType::MainBoard => Color::from_rgba8(39, 174, 96, 255),
        EquipmentType::SubBoard => Color::from_rgba8(22, 160, 133, 255),
    }
}

fn cable_color(cable_type: CableType) -> Color {
    match cable_type {
        CableType::Dc => dc_color(),
        CableType::Ac => ac_color(),
    }
}

/// A pixmap plus the viewport used to place world geometry on it.
struct Painter<'a> {
    pixmap: Pixmap,
    viewport: &'a Viewport,
}

impl<'a> Painter<'a> {
    fn screen(&self, p: Point) -> (f32, f32) {
        let s = self.viewport.to_screen(p);
        (s.x as f32, s.y as f32)
    }

    fn path(&self, points: &[Point], close: bool) -> Option<Path> {
        let (first, rest) = points.split_first()?;
        let mut pb = PathBuilder::new();
        let (x, y) = self.screen(*first);
        pb.move_to(x, y);
        for p in rest {
            let (x, y) = self.screen(*p);
            pb.line_to(x, y);
        }
        if close {
            pb.close();
        }
        pb.finish()
    }

    fn fill(&mut self, points: &[Point], color: Color) {
        if let Some(path) = self.path(points, true) {
            let mut paint = Paint::default();
            paint.set_color(color);
            paint.anti_alias = true;
            self.pixmap
                .fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
        }
    }

    fn stroke(&mut self, points: &[Point], close: bool, color: Color, width: f32, dashed: bool) {
        let Some(path) = self.path(points, close) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        let stroke = Stroke {
            width,
            dash: if dashed {
                StrokeDash::new(vec![6.0, 4.0], 0.0)
            } else {
                None
            },
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn dot(&mut self, center: Point, radius: f32, color: Color) {
        let (x, y) = self.screen(center);
        if let Some(path) = PathBuilder::from_circle(x, y, radius) {
            let mut paint = Paint::default();
            paint.set_color(color);
            paint.anti_alias = true;
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn rect(&mut self, rect: &OrientedRect, fill: Color, outline: Option<Color>) {
        let corners = rect.corners();
        self.fill(&corners, fill);
        if let Some(outline) = outline {
            self.stroke(&corners, true, outline, 1.0, false);
        }
    }

    fn background(&mut self, image: &RgbaImage) {
        let Some(source) = image_to_pixmap(image) else {
            tracing::warn!("Background image {}x{} could not be converted", image.width(), image.height());
            return;
        };
        let offset = self.viewport.offset();
        let zoom = self.viewport.zoom() as f32;
        let transform = Transform::from_scale(zoom, zoom).post_translate(offset.x as f32, offset.y as f32);
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &PixmapPaint::default(), transform, None);
    }
}

fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

fn draw_roof(painter: &mut Painter<'_>, mask: &RoofMask) {
    painter.fill(&mask.points, roof_fill());
    painter.stroke(&mask.points, true, roof_outline(), 2.0, false);

    // Slope arrow from the centroid, constant length on screen
    let centroid = mask.centroid();
    let rad = mask.direction.to_radians();
    let length = f64::from(ARROW_LENGTH) / painter.viewport.zoom();
    let tip = centroid + Point::new(rad.sin(), -rad.cos()) * length;
    let head = length * 0.3;
    let left = tip + Point::new((rad + 2.6).sin(), -(rad + 2.6).cos()) * head;
    let right = tip + Point::new((rad - 2.6).sin(), -(rad - 2.6).cos()) * head;
    painter.stroke(&[centroid, tip], false, roof_outline(), 2.0, false);
    painter.stroke(&[left, tip, right], false, roof_outline(), 2.0, false);
}

fn draw_array(painter: &mut Painter<'_>, array: &PvArrayItem, ctx: &FootprintContext, fill: Color) {
    let rect = array.footprint(ctx);
    painter.rect(&rect, fill, Some(module_grid()));

    let (hw, hh) = (rect.half_width, rect.half_height);
    for i in 1..array.columns {
        let x = -hw + 2.0 * hw * f64::from(i) / f64::from(array.columns);
        let line = [rect.to_world(Point::new(x, -hh)), rect.to_world(Point::new(x, hh))];
        painter.stroke(&line, false, module_grid(), 1.0, false);
    }
    for j in 1..array.rows {
        let y = -hh + 2.0 * hh * f64::from(j) / f64::from(array.rows);
        let line = [rect.to_world(Point::new(-hw, y)), rect.to_world(Point::new(hw, y))];
        painter.stroke(&line, false, module_grid(), 1.0, false);
    }
}

fn draw_scene(painter: &mut Painter<'_>, state: &DesignState, ctx: &FootprintContext, layers: &LayerVisibility) {
    if layers.roof_masks {
        for mask in state.roof_masks() {
            draw_roof(painter, mask);
        }
    }
    if layers.walkways {
        for walkway in state.placed_walkways() {
            painter.rect(&walkway.footprint(ctx), walkway_fill(), None);
        }
    }
    if layers.cable_trays {
        for tray in state.placed_cable_trays() {
            painter.rect(&tray.footprint(ctx), tray_fill(), None);
        }
    }
    if layers.pv_arrays {
        for array in state.pv_arrays() {
            draw_array(painter, array, ctx, array_fill());
        }
    }
    if layers.equipment {
        for item in state.equipment() {
            painter.rect(&item.footprint(ctx), equipment_color(item.equipment_type), Some(bg_color()));
        }
    }
    if layers.cables {
        for line in state.lines() {
            painter.stroke(&line.points, false, cable_color(line.cable_type), 2.5, false);
        }
    }
}

fn draw_selection(
    painter: &mut Painter<'_>,
    state: &DesignState,
    controller: &InteractionController,
    ctx: &FootprintContext,
) {
    for item in controller.selection().selected() {
        if !controller.layers().is_visible(item.kind) {
            continue;
        }
        if let Some(placeable) = state.placeable(item) {
            let corners = placeable.footprint(ctx).corners();
            painter.stroke(&corners, true, selection_color(), 2.0, true);
            continue;
        }
        match item.kind {
            ItemKind::Cable => {
                if let Some(line) = state.line(&item.id) {
                    painter.stroke(&line.points, false, selection_color(), 4.0, false);
                    for p in &line.points {
                        painter.dot(*p, VERTEX_RADIUS, selection_color());
                    }
                }
            }
            ItemKind::RoofMask => {
                if let Some(mask) = state.roof_mask(&item.id) {
                    painter.stroke(&mask.points, true, selection_color(), 2.0, true);
                    for p in &mask.points {
                        painter.dot(*p, VERTEX_RADIUS, selection_color());
                    }
                }
            }
            _ => {}
        }
    }
}

/// Footprints of the pending placement at the ghost pose.
fn ghost_rects(placement: &PlacementState, ghost: &Ghost, ctx: &FootprintContext) -> Vec<OrientedRect> {
    match &placement.item {
        PlacementItem::Array(spec) => {
            vec![PvArrayItem::new(*spec, ghost.position, ghost.rotation).footprint(ctx)]
        }
        PlacementItem::Equipment(t) => {
            vec![EquipmentItem::new(*t, ghost.position, ghost.rotation).footprint(ctx)]
        }
        PlacementItem::Material(config) => {
            vec![PlacedMaterial::from_config(config, ghost.position, ghost.rotation).footprint(ctx)]
        }
        PlacementItem::Batch(group) => {
            let placed = group.instantiate(ghost.position, ghost.rotation, ctx);
            placed
                .arrays
                .iter()
                .map(|a| a.footprint(ctx))
                .chain(placed.equipment.iter().map(|e| e.footprint(ctx)))
                .chain(placed.walkways.iter().map(|w| w.footprint(ctx)))
                .chain(placed.cable_trays.iter().map(|t| t.footprint(ctx)))
                .collect()
        }
    }
}

/// Outline of whichever rectangle the placement snapped to.
fn snap_target(state: &DesignState, id: &sitemark_core::EntityId, ctx: &FootprintContext) -> Option<OrientedRect> {
    state
        .pv_array(id)
        .map(|a| a.footprint(ctx))
        .or_else(|| state.equipment_item(id).map(|e| e.footprint(ctx)))
        .or_else(|| state.walkway(id).map(|w| w.footprint(ctx)))
        .or_else(|| state.cable_tray(id).map(|t| t.footprint(ctx)))
}

fn draw_draft(painter: &mut Painter<'_>, points: &[Point], cursor: Option<Point>, color: Color) {
    let mut path: Vec<Point> = points.to_vec();
    path.extend(cursor);
    painter.stroke(&path, false, color, 1.5, true);
    for p in points {
        painter.dot(*p, VERTEX_RADIUS, color);
    }
}

fn draw_tool(painter: &mut Painter<'_>, state: &DesignState, tool: &ToolState, ctx: &FootprintContext) {
    match tool {
        ToolState::RoofMask(draft) => draw_draft(painter, &draft.points, draft.cursor, roof_outline()),
        ToolState::Line(line) => {
            draw_draft(painter, &line.draft.points, line.draft.cursor, cable_color(line.cable_type));
            if let Some(snap) = &line.snap {
                painter.dot(snap.position, VERTEX_RADIUS * 2.0, preview_color());
            }
        }
        ToolState::ScaleCalibration(cal) => {
            if let (Some(start), Some(end)) = (cal.start, cal.end) {
                painter.stroke(&[start, end], false, selection_color(), 2.0, false);
                painter.dot(start, VERTEX_RADIUS, selection_color());
                painter.dot(end, VERTEX_RADIUS, selection_color());
            }
        }
        ToolState::RoofDirection(dir) => {
            if let (Some(start), Some(end)) = (dir.start, dir.end) {
                painter.stroke(&[start, end], false, roof_outline(), 2.0, true);
                painter.dot(end, VERTEX_RADIUS, roof_outline());
            }
        }
        ToolState::Placement(placement) => {
            if let Some(ghost) = &placement.ghost {
                if let Some(target) = ghost.snapped_to_id.as_ref().and_then(|id| snap_target(state, id, ctx)) {
                    painter.stroke(&target.corners(), true, preview_color(), 2.0, true);
                }
                for rect in ghost_rects(placement, ghost, ctx) {
                    painter.rect(&rect, ghost_fill(), Some(preview_color()));
                }
            }
        }
        ToolState::Select(SelectState::Dragging(drag)) => {
            if let Some(target) = drag.snap.as_ref().and_then(|s| snap_target(state, &s.snapped_to_id, ctx)) {
                painter.stroke(&target.corners(), true, preview_color(), 2.0, true);
            }
        }
        ToolState::Select(SelectState::Marquee(marquee)) => {
            let corners = marquee.bounds().corners();
            painter.fill(&corners, Color::from_rgba8(52, 152, 219, 40));
            painter.stroke(&corners, true, ac_color(), 1.0, true);
        }
        ToolState::AlignEdges(pick) => {
            for edge in &pick.edges {
                painter.stroke(&[edge.start, edge.end], false, selection_color(), 3.0, false);
            }
        }
        ToolState::Select(SelectState::Idle) | ToolState::Pan(_) | ToolState::Dimension(_) => {}
    }
}

/// Renders the editor's current view at the viewport's size.
///
/// `background` is the decoded background image, drawn with its pixels
/// as world units.
pub fn render(ctx: &EditorContext, controller: &InteractionController, background: Option<&RgbaImage>) -> RgbaImage {
    let width = ctx.viewport.width().round().max(1.0) as u32;
    let height = ctx.viewport.height().round().max(1.0) as u32;
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbaImage::new(width, height);
    };
    pixmap.fill(bg_color());

    let mut painter = Painter {
        pixmap,
        viewport: &ctx.viewport,
    };
    if let Some(image) = background {
        painter.background(image);
    }

    let footprint = ctx.footprint();
    let state = controller.display_state(ctx);
    let layers = controller.layers();
    draw_scene(&mut painter, &state, &footprint, &layers);
    draw_selection(&mut painter, &state, controller, &footprint);
    draw_tool(&mut painter, &state, controller.tool_state(), &footprint);

    pixmap_to_image(&painter.pixmap)
}
