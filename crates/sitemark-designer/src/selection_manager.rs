//! Selection state and the hit tests that drive it.

use crate::design_state::DesignState;
use crate::geometry::{self, Bounds};
use crate::layers::LayerVisibility;
use crate::model::{FootprintContext, ItemKind, ItemRef, Point, SiteItem};

/// Everything a click hit test needs besides the scene.
#[derive(Debug, Clone, Copy)]
pub struct HitTestContext {
    pub footprint: FootprintContext,
    pub layers: LayerVisibility,
    /// Distance from a cable path that still counts as a hit, world units
    pub cable_tolerance: f64,
}

/// Topmost visible item under `point`.
///
/// Categories are tried in priority order: arrays, walkways, cable trays,
/// equipment, cables, roof masks. Within a category the most recently
/// added item wins.
pub fn hit_test(state: &DesignState, point: Point, ctx: &HitTestContext) -> Option<ItemRef> {
    for kind in ItemKind::PRIORITY {
        if !ctx.layers.is_visible(kind) {
            continue;
        }
        let tolerance = if kind == ItemKind::Cable {
            ctx.cable_tolerance
        } else {
            0.0
        };
        let hit = state
            .items()
            .filter(|(r, item)| r.kind == kind && item.contains_point(point, tolerance, &ctx.footprint))
            .last();
        if let Some((item_ref, _)) = hit {
            return Some(item_ref);
        }
    }
    None
}

/// Whether one item is caught by a marquee rectangle.
///
/// Rectangles are caught by their centre, cables when any part of the
/// path crosses the box, roof masks by their centroid.
fn in_marquee(kind: ItemKind, item: &dyn SiteItem, state: &DesignState, item_ref: &ItemRef, rect: &Bounds) -> bool {
    match kind {
        ItemKind::Cable => state
            .line(&item_ref.id)
            .is_some_and(|line| geometry::polyline_intersects_box(&line.points, rect)),
        _ => rect.contains(item.anchor()),
    }
}

/// Every visible item caught by `rect`, in priority order.
pub fn items_in_rect(state: &DesignState, rect: &Bounds, layers: &LayerVisibility) -> Vec<ItemRef> {
    state
        .items()
        .filter(|(r, item)| layers.is_visible(r.kind) && in_marquee(r.kind, *item, state, r, rect))
        .map(|(r, _)| r)
        .collect()
}

/// Manages the set of selected items.
///
/// # Selection Model
///
/// - **Single**: a plain click replaces the selection with the hit item,
///   or clears it when nothing was hit
/// - **Multiple**: a modifier click toggles the hit item's membership and
///   leaves the others alone
/// - **Marquee**: a drag rectangle selects what it catches
///
/// Selection holds references only. Entities that disappear (delete, undo)
/// are dropped by [`SelectionManager::retain_existing`].
///
/// ```
/// use sitemark_designer::selection_manager::SelectionManager;
///
/// let manager = SelectionManager::new();
/// assert!(manager.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    selected: Vec<ItemRef>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[ItemRef] {
        &self.selected
    }

    pub fn is_selected(&self, item: &ItemRef) -> bool {
        self.selected.contains(item)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn select_only(&mut self, item: ItemRef) {
        self.selected.clear();
        self.selected.push(item);
    }

    pub fn add(&mut self, item: ItemRef) {
        if !self.is_selected(&item) {
            self.selected.push(item);
        }
    }

    /// Adds `item` if absent, removes it if present.
    pub fn toggle(&mut self, item: ItemRef) {
        if let Some(pos) = self.selected.iter().position(|r| r == &item) {
            self.selected.remove(pos);
        } else {
            self.selected.push(item);
        }
    }

    /// Click selection.
    ///
    /// # Returns
    ///
    /// The item that was hit, if any.
    pub fn select_at(
        &mut self,
        state: &DesignState,
        point: Point,
        ctx: &HitTestContext,
        multi: bool,
    ) -> Option<ItemRef> {
        let hit = hit_test(state, point, ctx);
        match (&hit, multi) {
            (Some(item), true) => self.toggle(item.clone()),
            (Some(item), false) => self.select_only(item.clone()),
            (None, false) => self.clear(),
            (None, true) => {}
        }
        hit
    }

    /// Marquee selection. With `multi` the caught items are added to the
    /// current selection, otherwise they replace it.
    pub fn select_in_rect(
        &mut self,
        state: &DesignState,
        rect: &Bounds,
        layers: &LayerVisibility,
        multi: bool,
    ) -> usize {
        let caught = items_in_rect(state, rect, layers);
        if !multi {
            self.selected.clear();
        }
        for item in caught {
            self.add(item);
        }
        self.selected.len()
    }

    /// Drops references to entities that no longer exist.
    pub fn retain_existing(&mut self, state: &DesignState) {
        self.selected.retain(|r| state.contains(r));
    }
}
