use proptest::prelude::*;
use sitemark_designer::model::{FootprintContext, Placeable};
use sitemark_designer::snap::{find_cable_terminus, snap_array, snap_equipment};
use sitemark_designer::{
    ArraySpec, CableType, DesignState, EquipmentItem, EquipmentType, ItemKind, Orientation, Point,
    PvArrayItem, RoofMask, SnapParams,
};

fn ctx() -> FootprintContext {
    FootprintContext::new(0.01, 1.0, 1.7)
}

fn params() -> SnapParams {
    SnapParams {
        meters_per_pixel: Some(0.01),
        zoom: 1.0,
        tolerance_px: 20.0,
        default_min_spacing_m: 0.3,
        force_align: false,
    }
}

fn roof(direction: f64) -> RoofMask {
    RoofMask::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(3000.0, 0.0),
            Point::new(3000.0, 3000.0),
            Point::new(0.0, 3000.0),
        ],
        20.0,
        direction,
        Some(0.01),
    )
}

fn array_at(x: f64, y: f64) -> PvArrayItem {
    PvArrayItem::new(ArraySpec::new(2, 3, Orientation::Portrait), Point::new(x, y), 0.0)
}

#[test]
fn test_array_lands_exactly_at_spacing() {
    // 3 x 2 portrait modules: 300 px wide at 1 cm/px, spacing 0.3 m = 30 px
    let existing = vec![array_at(500.0, 500.0)];
    let candidate = array_at(840.0, 507.0);
    let snap = snap_array(&candidate, 0.0, &existing, &[roof(180.0)], &params(), &ctx());

    assert_eq!(snap.result.snapped_to_id.as_ref(), Some(&existing[0].id));
    assert!((snap.result.position.x - 830.0).abs() < 1e-6);
    assert!((snap.result.position.y - 500.0).abs() < 1e-6);
}

#[test]
fn test_array_takes_rotation_from_roof() {
    let candidate = array_at(1000.0, 1000.0);
    let snap = snap_array(&candidate, 0.0, &[], &[roof(270.0)], &params(), &ctx());
    assert_eq!(snap.result.rotation, 90.0);
    assert!(snap.roof_mask_id.is_some());
    assert!(!snap.result.is_snapped());
}

#[test]
fn test_no_scale_means_no_snap() {
    let existing = vec![EquipmentItem::new(EquipmentType::Inverter, Point::new(0.0, 0.0), 0.0)];
    let candidate = EquipmentItem::new(EquipmentType::Inverter, Point::new(105.0, 3.0), 0.0);
    let unscaled = SnapParams {
        meters_per_pixel: None,
        ..params()
    };
    let result = snap_equipment(&candidate, &existing, &unscaled, &ctx());
    assert_eq!(result.position, candidate.position);
    assert!(result.snapped_to_id.is_none());
}

#[test]
fn test_far_candidate_is_left_alone() {
    let existing = vec![EquipmentItem::new(EquipmentType::Inverter, Point::new(0.0, 0.0), 0.0)];
    let candidate = EquipmentItem::new(EquipmentType::Inverter, Point::new(400.0, 0.0), 0.0);
    let result = snap_equipment(&candidate, &existing, &params(), &ctx());
    assert!(!result.is_snapped());
}

#[test]
fn test_ac_cable_ignores_arrays() {
    let state = DesignState::default()
        .with_pv_arrays(vec![array_at(0.0, 0.0)])
        .with_equipment(vec![EquipmentItem::new(EquipmentType::MainBoard, Point::new(500.0, 0.0), 0.0)]);

    assert!(find_cable_terminus(Point::new(2.0, 2.0), CableType::Ac, &state, &ctx(), 15.0).is_none());
    let dc = find_cable_terminus(Point::new(2.0, 2.0), CableType::Dc, &state, &ctx(), 15.0);
    assert_eq!(dc.map(|s| s.snapped_to_type), Some(ItemKind::PvArray));

    let ac = find_cable_terminus(Point::new(505.0, 0.0), CableType::Ac, &state, &ctx(), 15.0);
    assert_eq!(ac.and_then(|s| s.equipment_type), Some(EquipmentType::MainBoard));
}

#[test]
fn test_overlapping_candidate_is_pushed_out_to_spacing() {
    // Inverters are 70 x 50 px; these two sit only 20 px apart
    let existing = vec![
        EquipmentItem::new(EquipmentType::Inverter, Point::new(0.0, 0.0), 0.0),
        EquipmentItem::new(EquipmentType::Inverter, Point::new(90.0, 0.0), 0.0),
    ];
    let candidate = EquipmentItem::new(EquipmentType::Inverter, Point::new(-20.0, 0.0), 0.0);
    let result = snap_equipment(&candidate, &existing, &params(), &ctx());

    assert_eq!(result.snapped_to_id.as_ref(), Some(&existing[0].id));
    assert!((result.position.x + 100.0).abs() < 1e-6);
    assert!(result.position.y.abs() < 1e-6);
    let gap = existing[0].position.x - 35.0 - (result.position.x + 35.0);
    assert!((gap - 30.0).abs() < 1e-6);
}

proptest! {
    // Snapping a snapped position again does not move it.
    #[test]
    fn prop_snap_is_stable(dx in 320.0f64..345.0, dy in -15.0f64..15.0) {
        let existing = vec![EquipmentItem::new(EquipmentType::Inverter, Point::new(0.0, 0.0), 0.0)];
        let first = EquipmentItem::new(EquipmentType::Inverter, Point::new(dx - 230.0, dy), 0.0);
        let snapped = snap_equipment(&first, &existing, &params(), &ctx());
        prop_assume!(snapped.is_snapped());

        let mut again = first.clone();
        again.set_pose(snapped.position, snapped.rotation);
        let second = snap_equipment(&again, &existing, &params(), &ctx());
        prop_assert!(second.position.distance_to(&snapped.position) < 1e-6);
    }
}
