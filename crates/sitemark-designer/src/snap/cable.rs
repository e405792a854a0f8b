use sitemark_core::EntityId;

use crate::design_state::DesignState;
use crate::model::{CableType, EquipmentType, FootprintContext, ItemKind, Point};

/// A cable endpoint snapped onto a valid terminus.
#[derive(Debug, Clone, PartialEq)]
pub struct CableSnap {
    pub position: Point,
    pub snapped_to_id: EntityId,
    pub snapped_to_type: ItemKind,
    pub equipment_type: Option<EquipmentType>,
}

/// Nearest valid terminus for `cable_type` within `radius` (world units)
/// of `cursor`.
///
/// Equipment anchors at its centre; arrays at their centre and the
/// midpoints of their four edges. AC cables end at inverters or main
/// boards, DC cables at inverters or arrays.
pub fn find_cable_terminus(
    cursor: Point,
    cable_type: CableType,
    state: &DesignState,
    ctx: &FootprintContext,
    radius: f64,
) -> Option<CableSnap> {
    let mut best: Option<(f64, CableSnap)> = None;
    let mut consider = |position: Point, snap: &dyn Fn(Point) -> CableSnap| {
        let d = cursor.distance_to(&position);
        if d <= radius && best.as_ref().map_or(true, |(bd, _)| d < *bd) {
            best = Some((d, snap(position)));
        }
    };

    for item in state.equipment() {
        if !cable_type.accepts_equipment(item.equipment_type) {
            continue;
        }
        consider(item.position, &|position| CableSnap {
            position,
            snapped_to_id: item.id.clone(),
            snapped_to_type: ItemKind::Equipment,
            equipment_type: Some(item.equipment_type),
        });
    }

    if cable_type.accepts_array() {
        for array in state.pv_arrays() {
            let mut anchors = vec![array.position];
            anchors.extend(array.edge_midpoints(ctx));
            for anchor in anchors {
                consider(anchor, &|position| CableSnap {
                    position,
                    snapped_to_id: array.id.clone(),
                    snapped_to_type: ItemKind::PvArray,
                    equipment_type: None,
                });
            }
        }
    }

    best.map(|(_, snap)| snap)
}
