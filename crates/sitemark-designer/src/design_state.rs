//! Immutable scene snapshots.
//!
//! A [`DesignState`] holds every entity collection behind an `Arc`, so a
//! commit that touches one collection shares the other five with the
//! previous snapshot. Snapshots are never mutated after construction; the
//! `with_*` methods return a new state.

use std::sync::Arc;

use sitemark_core::EntityId;

use crate::geometry::Bounds;
use crate::model::{
    EquipmentItem, FootprintContext, ItemKind, ItemRef, Placeable, PlacedMaterial, Point,
    PvArrayItem, RoofMask, SiteItem, SupplyLine,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignState {
    equipment: Arc<Vec<EquipmentItem>>,
    lines: Arc<Vec<SupplyLine>>,
    roof_masks: Arc<Vec<RoofMask>>,
    pv_arrays: Arc<Vec<PvArrayItem>>,
    placed_walkways: Arc<Vec<PlacedMaterial>>,
    placed_cable_trays: Arc<Vec<PlacedMaterial>>,
}

impl DesignState {
    pub fn new(
        equipment: Vec<EquipmentItem>,
        lines: Vec<SupplyLine>,
        roof_masks: Vec<RoofMask>,
        pv_arrays: Vec<PvArrayItem>,
        placed_walkways: Vec<PlacedMaterial>,
        placed_cable_trays: Vec<PlacedMaterial>,
    ) -> Self {
        Self {
            equipment: Arc::new(equipment),
            lines: Arc::new(lines),
            roof_masks: Arc::new(roof_masks),
            pv_arrays: Arc::new(pv_arrays),
            placed_walkways: Arc::new(placed_walkways),
            placed_cable_trays: Arc::new(placed_cable_trays),
        }
    }

    pub fn equipment(&self) -> &[EquipmentItem] {
        &self.equipment
    }

    pub fn lines(&self) -> &[SupplyLine] {
        &self.lines
    }

    pub fn roof_masks(&self) -> &[RoofMask] {
        &self.roof_masks
    }

    pub fn pv_arrays(&self) -> &[PvArrayItem] {
        &self.pv_arrays
    }

    pub fn placed_walkways(&self) -> &[PlacedMaterial] {
        &self.placed_walkways
    }

    pub fn placed_cable_trays(&self) -> &[PlacedMaterial] {
        &self.placed_cable_trays
    }

    pub fn with_equipment(&self, equipment: Vec<EquipmentItem>) -> Self {
        Self {
            equipment: Arc::new(equipment),
            ..self.clone()
        }
    }

    pub fn with_lines(&self, lines: Vec<SupplyLine>) -> Self {
        Self {
            lines: Arc::new(lines),
            ..self.clone()
        }
    }

    pub fn with_roof_masks(&self, roof_masks: Vec<RoofMask>) -> Self {
        Self {
            roof_masks: Arc::new(roof_masks),
            ..self.clone()
        }
    }

    pub fn with_pv_arrays(&self, pv_arrays: Vec<PvArrayItem>) -> Self {
        Self {
            pv_arrays: Arc::new(pv_arrays),
            ..self.clone()
        }
    }

    pub fn with_placed_walkways(&self, placed_walkways: Vec<PlacedMaterial>) -> Self {
        Self {
            placed_walkways: Arc::new(placed_walkways),
            ..self.clone()
        }
    }

    pub fn with_placed_cable_trays(&self, placed_cable_trays: Vec<PlacedMaterial>) -> Self {
        Self {
            placed_cable_trays: Arc::new(placed_cable_trays),
            ..self.clone()
        }
    }

    /// True when both snapshots share every collection allocation.
    pub fn same_snapshot(&self, other: &DesignState) -> bool {
        Arc::ptr_eq(&self.equipment, &other.equipment)
            && Arc::ptr_eq(&self.lines, &other.lines)
            && Arc::ptr_eq(&self.roof_masks, &other.roof_masks)
            && Arc::ptr_eq(&self.pv_arrays, &other.pv_arrays)
            && Arc::ptr_eq(&self.placed_walkways, &other.placed_walkways)
            && Arc::ptr_eq(&self.placed_cable_trays, &other.placed_cable_trays)
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn item_count(&self) -> usize {
        self.equipment.len()
            + self.lines.len()
            + self.roof_masks.len()
            + self.pv_arrays.len()
            + self.placed_walkways.len()
            + self.placed_cable_trays.len()
    }

    pub fn roof_mask(&self, id: &EntityId) -> Option<&RoofMask> {
        self.roof_masks.iter().find(|m| &m.id == id)
    }

    pub fn pv_array(&self, id: &EntityId) -> Option<&PvArrayItem> {
        self.pv_arrays.iter().find(|a| &a.id == id)
    }

    pub fn equipment_item(&self, id: &EntityId) -> Option<&EquipmentItem> {
        self.equipment.iter().find(|e| &e.id == id)
    }

    pub fn line(&self, id: &EntityId) -> Option<&SupplyLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    pub fn walkway(&self, id: &EntityId) -> Option<&PlacedMaterial> {
        self.placed_walkways.iter().find(|w| &w.id == id)
    }

    pub fn cable_tray(&self, id: &EntityId) -> Option<&PlacedMaterial> {
        self.placed_cable_trays.iter().find(|t| &t.id == id)
    }

    /// Resolves a reference to its entity, if it still exists.
    pub fn item(&self, item: &ItemRef) -> Option<&dyn SiteItem> {
        let id = &item.id;
        match item.kind {
            ItemKind::PvArray => self.pv_array(id).map(|x| x as &dyn SiteItem),
            ItemKind::Walkway => self.walkway(id).map(|x| x as &dyn SiteItem),
            ItemKind::CableTray => self.cable_tray(id).map(|x| x as &dyn SiteItem),
            ItemKind::Equipment => self.equipment_item(id).map(|x| x as &dyn SiteItem),
            ItemKind::Cable => self.line(id).map(|x| x as &dyn SiteItem),
            ItemKind::RoofMask => self.roof_mask(id).map(|x| x as &dyn SiteItem),
        }
    }

    /// Rectangular entity behind `item`; `None` for cables and roof masks.
    pub fn placeable(&self, item: &ItemRef) -> Option<&dyn Placeable> {
        let id = &item.id;
        match item.kind {
            ItemKind::PvArray => self.pv_array(id).map(|x| x as &dyn Placeable),
            ItemKind::Walkway => self.walkway(id).map(|x| x as &dyn Placeable),
            ItemKind::CableTray => self.cable_tray(id).map(|x| x as &dyn Placeable),
            ItemKind::Equipment => self.equipment_item(id).map(|x| x as &dyn Placeable),
            ItemKind::Cable | ItemKind::RoofMask => None,
        }
    }

    pub fn contains(&self, item: &ItemRef) -> bool {
        self.item(item).is_some()
    }

    /// Iterates every entity with its reference, in hit-test priority order.
    pub fn items(&self) -> impl Iterator<Item = (ItemRef, &dyn SiteItem)> + '_ {
        fn tag<'a, T: SiteItem>(
            kind: ItemKind,
            items: &'a [T],
        ) -> impl Iterator<Item = (ItemRef, &'a dyn SiteItem)> + 'a {
            items
                .iter()
                .map(move |x| (ItemRef::new(kind, x.id().clone()), x as &dyn SiteItem))
        }

        tag(ItemKind::PvArray, &self.pv_arrays)
            .chain(tag(ItemKind::Walkway, &self.placed_walkways))
            .chain(tag(ItemKind::CableTray, &self.placed_cable_trays))
            .chain(tag(ItemKind::Equipment, &self.equipment))
            .chain(tag(ItemKind::Cable, &self.lines))
            .chain(tag(ItemKind::RoofMask, &self.roof_masks))
    }

    /// Union of the bounds of every entity, or `None` for an empty scene.
    pub fn bounds(&self, ctx: &FootprintContext) -> Option<Bounds> {
        self.items()
            .map(|(_, item)| item.bounds(ctx))
            .reduce(|acc, b| acc.union(&b))
    }

    /// New state with the referenced entities removed. Collections that lose
    /// nothing keep their allocation.
    pub fn without_items(&self, items: &[ItemRef]) -> Self {
        let doomed = |kind: ItemKind, id: &EntityId| {
            items.iter().any(|r| r.kind == kind && &r.id == id)
        };

        let mut next = self.clone();
        if items.iter().any(|r| r.kind == ItemKind::PvArray) {
            next = next.with_pv_arrays(retain(&self.pv_arrays, |a| !doomed(ItemKind::PvArray, &a.id)));
        }
        if items.iter().any(|r| r.kind == ItemKind::Walkway) {
            next = next.with_placed_walkways(retain(&self.placed_walkways, |w| {
                !doomed(ItemKind::Walkway, &w.id)
            }));
        }
        if items.iter().any(|r| r.kind == ItemKind::CableTray) {
            next = next.with_placed_cable_trays(retain(&self.placed_cable_trays, |t| {
                !doomed(ItemKind::CableTray, &t.id)
            }));
        }
        if items.iter().any(|r| r.kind == ItemKind::Equipment) {
            next = next.with_equipment(retain(&self.equipment, |e| !doomed(ItemKind::Equipment, &e.id)));
        }
        if items.iter().any(|r| r.kind == ItemKind::Cable) {
            next = next.with_lines(retain(&self.lines, |l| !doomed(ItemKind::Cable, &l.id)));
        }
        if items.iter().any(|r| r.kind == ItemKind::RoofMask) {
            next = next.with_roof_masks(retain(&self.roof_masks, |m| !doomed(ItemKind::RoofMask, &m.id)));
        }
        next
    }

    /// New state with every referenced entity translated by the same delta.
    pub fn translated(&self, items: &[ItemRef], dx: f64, dy: f64) -> Self {
        let offsets: Vec<(ItemRef, f64, f64)> = items.iter().map(|r| (r.clone(), dx, dy)).collect();
        self.translated_each(&offsets)
    }

    /// New state with each referenced entity translated by its own delta.
    pub fn translated_each(&self, moves: &[(ItemRef, f64, f64)]) -> Self {
        fn apply<T: SiteItem + Clone>(kind: ItemKind, items: &[T], moves: &[(ItemRef, f64, f64)]) -> Vec<T> {
            items
                .iter()
                .map(|item| {
                    let mut item = item.clone();
                    if let Some((_, dx, dy)) = moves.iter().find(|(r, _, _)| r.kind == kind && &r.id == item.id()) {
                        item.translate(*dx, *dy);
                    }
                    item
                })
                .collect()
        }

        let touches = |kind: ItemKind| moves.iter().any(|(r, _, _)| r.kind == kind);

        let mut next = self.clone();
        if touches(ItemKind::PvArray) {
            next = next.with_pv_arrays(apply(ItemKind::PvArray, &self.pv_arrays, moves));
        }
        if touches(ItemKind::Walkway) {
            next = next.with_placed_walkways(apply(ItemKind::Walkway, &self.placed_walkways, moves));
        }
        if touches(ItemKind::CableTray) {
            next = next.with_placed_cable_trays(apply(ItemKind::CableTray, &self.placed_cable_trays, moves));
        }
        if touches(ItemKind::Equipment) {
            next = next.with_equipment(apply(ItemKind::Equipment, &self.equipment, moves));
        }
        if touches(ItemKind::Cable) {
            next = next.with_lines(apply(ItemKind::Cable, &self.lines, moves));
        }
        if touches(ItemKind::RoofMask) {
            next = next.with_roof_masks(apply(ItemKind::RoofMask, &self.roof_masks, moves));
        }
        next
    }

    /// New state with one rectangular entity moved to `position` and turned
    /// to `rotation`. Cables and roof masks have no pose and are left alone.
    pub fn with_item_pose(&self, item: &ItemRef, position: Point, rotation: f64) -> Self {
        fn pose<T: Placeable + Clone>(items: &[T], id: &EntityId, position: Point, rotation: f64) -> Vec<T> {
            items
                .iter()
                .cloned()
                .map(|mut x| {
                    if x.id() == id {
                        x.set_pose(position, rotation);
                    }
                    x
                })
                .collect()
        }

        match item.kind {
            ItemKind::PvArray => self.with_pv_arrays(pose(&self.pv_arrays, &item.id, position, rotation)),
            ItemKind::Equipment => self.with_equipment(pose(&self.equipment, &item.id, position, rotation)),
            ItemKind::Walkway => {
                self.with_placed_walkways(pose(&self.placed_walkways, &item.id, position, rotation))
            }
            ItemKind::CableTray => {
                self.with_placed_cable_trays(pose(&self.placed_cable_trays, &item.id, position, rotation))
            }
            ItemKind::Cable | ItemKind::RoofMask => self.clone(),
        }
    }
}

fn retain<T: Clone>(items: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|x| keep(x)).cloned().collect()
}
