//! Dimension and align-edges pick tools. Neither mutates the scene.

use smallvec::SmallVec;

use super::context::EditorContext;
use super::events::{DimensionInfo, EdgePick, InteractionOutcome};
use super::tools::PickState;
use crate::design_state::DesignState;
use crate::geometry::{distance_to_segment, RectEdge};
use crate::layers::LayerVisibility;
use crate::model::{FootprintContext, ItemKind, ItemRef, Point};
use crate::selection_manager::hit_test;

/// Size of one entity in meters.
pub fn measure(state: &DesignState, item: &ItemRef, ctx: &FootprintContext, scale: Option<f64>) -> Option<DimensionInfo> {
    if let Some(placeable) = state.placeable(item) {
        let rect = placeable.footprint(ctx);
        return Some(DimensionInfo {
            item: item.clone(),
            width_m: ctx.to_meters(rect.half_width * 2.0),
            height_m: ctx.to_meters(rect.half_height * 2.0),
            area_m2: None,
            length_m: None,
        });
    }

    let entity = state.item(item)?;
    let bounds = entity.bounds(ctx);
    let ratio = scale.unwrap_or(0.0);
    let (area_m2, length_m) = match item.kind {
        ItemKind::RoofMask => (state.roof_mask(&item.id).map(|m| m.area), None),
        ItemKind::Cable => (None, state.line(&item.id).map(|l| l.length)),
        _ => (None, None),
    };
    Some(DimensionInfo {
        item: item.clone(),
        width_m: bounds.width() * ratio,
        height_m: bounds.height() * ratio,
        area_m2,
        length_m,
    })
}

pub(super) fn dimension_down(
    pick: &mut PickState,
    ctx: &EditorContext,
    layers: LayerVisibility,
    world: Point,
) -> InteractionOutcome {
    let state = ctx.scene.state();
    let info = hit_test(state, world, &ctx.hit_context(layers))
        .and_then(|item| measure(state, &item, &ctx.footprint(), ctx.scene.meters_per_pixel()));

    match info {
        Some(info) => {
            tracing::debug!("Measured {} {}: {:.2} x {:.2} m", info.item.kind, info.item.id, info.width_m, info.height_m);
            pick.last_dimension = Some(info.clone());
            InteractionOutcome::DimensionPicked(info)
        }
        None => {
            let had = pick.last_dimension.take().is_some();
            if had {
                InteractionOutcome::Redraw
            } else {
                InteractionOutcome::Unchanged
            }
        }
    }
}

/// Every edge of an entity as (index, named side, start, end).
fn edges_of(
    state: &DesignState,
    item: &ItemRef,
    ctx: &FootprintContext,
) -> SmallVec<[(usize, Option<RectEdge>, Point, Point); 8]> {
    let mut edges = SmallVec::new();
    if let Some(placeable) = state.placeable(item) {
        let rect = placeable.footprint(ctx);
        for (index, side) in RectEdge::ALL.into_iter().enumerate() {
            let (a, b) = rect.edge(side);
            edges.push((index, Some(side), a, b));
        }
        return edges;
    }

    match item.kind {
        ItemKind::RoofMask => {
            if let Some(mask) = state.roof_mask(&item.id) {
                let n = mask.points.len();
                for i in 0..n {
                    edges.push((i, None, mask.points[i], mask.points[(i + 1) % n]));
                }
            }
        }
        ItemKind::Cable => {
            if let Some(line) = state.line(&item.id) {
                for (i, pair) in line.points.windows(2).enumerate() {
                    edges.push((i, None, pair[0], pair[1]));
                }
            }
        }
        _ => {}
    }
    edges
}

/// Edge of the hit item nearest to `world`, if within `threshold`.
pub fn pick_edge(
    state: &DesignState,
    item: &ItemRef,
    world: Point,
    threshold: f64,
    ctx: &FootprintContext,
) -> Option<EdgePick> {
    edges_of(state, item, ctx)
        .into_iter()
        .map(|(index, side, a, b)| (distance_to_segment(world, a, b), index, side, a, b))
        .filter(|(d, ..)| *d <= threshold)
        .min_by(|x, y| x.0.total_cmp(&y.0))
        .map(|(_, edge_index, side, start, end)| EdgePick {
            item: item.clone(),
            edge_index,
            side,
            start,
            end,
        })
}

pub(super) fn align_edges_down(
    pick: &mut PickState,
    ctx: &EditorContext,
    layers: LayerVisibility,
    world: Point,
) -> InteractionOutcome {
    let state = ctx.scene.state();
    let hit_ctx = ctx.hit_context(layers);
    let Some(item) = hit_test(state, world, &hit_ctx) else {
        return InteractionOutcome::Unchanged;
    };
    let threshold = ctx.world_tolerance(ctx.config.snapping.edge_pick_threshold_px);
    let Some(edge) = pick_edge(state, &item, world, threshold, &hit_ctx.footprint) else {
        tracing::trace!("Click on {} not near any edge", item.kind);
        return InteractionOutcome::Unchanged;
    };

    if pick.edges.len() >= 2 {
        pick.edges.clear();
    }
    pick.edges.push(edge.clone());
    InteractionOutcome::EdgePicked(edge)
}
