use sitemark_designer::geometry::polygon_area;
use sitemark_designer::{
    ArraySpec, BatchGroup, BatchItem, EquipmentType, InteractionOutcome, Key, KeyEvent,
    MaterialConfig, MaterialKind, Orientation, Point, PointerEvent, ScaleInfo, SceneModel, SiteSummary, Tool,
};

use super::{calibrated_editor, click, draw_roof};

const ROOF: [(f64, f64); 4] = [(0.0, 0.0), (1000.0, 0.0), (1000.0, 500.0), (0.0, 500.0)];

#[test]
fn test_calibration_sets_scale() {
    let (ctx, _) = calibrated_editor();
    assert_eq!(ctx.scene.meters_per_pixel(), Some(0.01));
}

#[test]
fn test_roof_area_after_calibration() {
    let (mut ctx, mut controller) = calibrated_editor();
    draw_roof(&mut ctx, &mut controller, ROOF);

    let roofs = ctx.scene.state().roof_masks();
    assert_eq!(roofs.len(), 1);
    assert_eq!(roofs[0].points.len(), 4);
    assert!((roofs[0].area - 50.0).abs() < 1e-9);
    assert_eq!(roofs[0].pitch, ctx.config.placement.default_roof_pitch_deg);
}

#[test]
fn test_second_array_snaps_beside_first() {
    let (mut ctx, mut controller) = calibrated_editor();
    draw_roof(&mut ctx, &mut controller, [(0.0, 0.0), (1500.0, 0.0), (1500.0, 1000.0), (0.0, 1000.0)]);

    let spec = ArraySpec::new(2, 3, Orientation::Portrait);
    controller.set_tool(&ctx, Tool::PvArray(spec));
    click(&mut ctx, &mut controller, 400.0, 500.0);
    click(&mut ctx, &mut controller, 740.0, 504.0);

    let arrays = ctx.scene.state().pv_arrays();
    assert_eq!(arrays.len(), 2);
    let roof_id = &ctx.scene.state().roof_masks()[0].id;
    assert!(arrays.iter().all(|a| a.roof_mask_id.as_ref() == Some(roof_id)));
    assert!((arrays[1].position.x - 730.0).abs() < 1e-6);
    assert!((arrays[1].position.y - 500.0).abs() < 1e-6);
    // Default roof faces 180°, so rows run across the image
    assert_eq!(arrays[0].rotation, 0.0);
}

#[test]
fn test_array_rotation_follows_roof_direction() {
    let (mut ctx, mut controller) = calibrated_editor();
    draw_roof(&mut ctx, &mut controller, ROOF);
    let roof_id = ctx.scene.state().roof_masks()[0].id.clone();
    ctx.scene.set_roof_direction(&roof_id, 270.0);

    controller.set_tool(&ctx, Tool::PvArray(ArraySpec::new(2, 3, Orientation::Portrait)));
    controller.key_down(&mut ctx, KeyEvent::new(Key::Char('r')));
    click(&mut ctx, &mut controller, 300.0, 250.0);

    let array = &ctx.scene.state().pv_arrays()[0];
    assert_eq!(array.roof_mask_id.as_ref(), Some(&roof_id));
    assert!((array.rotation - 135.0).abs() < 1e-9);
}

#[test]
fn test_rotate_key_turns_pending_equipment() {
    let (mut ctx, mut controller) = calibrated_editor();
    controller.set_tool(&ctx, Tool::Equipment(EquipmentType::Inverter));
    controller.key_down(&mut ctx, KeyEvent::new(Key::Char('r')));
    click(&mut ctx, &mut controller, 200.0, 200.0);

    let placed = &ctx.scene.state().equipment()[0];
    assert_eq!(placed.rotation, ctx.config.placement.rotation_step_deg);
}

#[test]
fn test_walkway_and_tray_land_in_their_own_collections() {
    let (mut ctx, mut controller) = calibrated_editor();
    let walkway = MaterialConfig::new(MaterialKind::Walkway, "Walkway 600", 0.6, 3.0);
    let tray = MaterialConfig::new(MaterialKind::CableTray, "Tray 100", 0.1, 3.0);

    controller.set_tool(&ctx, Tool::Material(walkway));
    click(&mut ctx, &mut controller, 100.0, 100.0);
    controller.set_tool(&ctx, Tool::Material(tray));
    click(&mut ctx, &mut controller, 600.0, 100.0);

    assert_eq!(ctx.scene.state().placed_walkways().len(), 1);
    assert_eq!(ctx.scene.state().placed_cable_trays().len(), 1);
}

#[test]
fn test_batch_places_everything_in_one_undo_step() {
    let (mut ctx, mut controller) = calibrated_editor();
    let group = BatchGroup::new("Inverter bay")
        .with_entry(Point::new(0.0, 0.0), BatchItem::Array(ArraySpec::new(1, 4, Orientation::Landscape)), 0.0)
        .with_entry(
            Point::new(0.0, 3.0),
            BatchItem::Equipment {
                equipment_type: EquipmentType::Inverter,
            },
            0.0,
        );
    let depth = ctx.scene.history().undo_depth();

    controller.set_tool(&ctx, Tool::Batch(group));
    let outcome = controller.pointer_down(&mut ctx, PointerEvent::new(800.0, 400.0));
    match outcome {
        InteractionOutcome::Placed { ids } => assert_eq!(ids.len(), 2),
        other => panic!("expected placement, got {:?}", other),
    }
    assert_eq!(ctx.scene.history().undo_depth(), depth + 1);

    controller.undo(&mut ctx);
    assert!(ctx.scene.state().pv_arrays().is_empty());
    assert!(ctx.scene.state().equipment().is_empty());
}

#[test]
fn test_summary_of_drawn_site() {
    let (mut ctx, mut controller) = calibrated_editor();
    draw_roof(&mut ctx, &mut controller, ROOF);
    controller.set_tool(&ctx, Tool::PvArray(ArraySpec::new(2, 3, Orientation::Portrait)));
    click(&mut ctx, &mut controller, 300.0, 250.0);

    let summary = SiteSummary::from_state(ctx.scene.state(), ctx.scene.meters_per_pixel());
    assert_eq!(summary.roofs.len(), 1);
    assert_eq!(summary.module_count, 6);
    assert!((summary.total_roof_area_m2 - 50.0).abs() < 1e-9);
}

#[test]
fn test_direction_drag_sets_roof_azimuth() {
    let (mut ctx, mut controller) = calibrated_editor();
    draw_roof(&mut ctx, &mut controller, ROOF);

    controller.set_tool(&ctx, Tool::RoofDirection);
    controller.pointer_down(&mut ctx, PointerEvent::new(500.0, 250.0));
    controller.pointer_move(&mut ctx, PointerEvent::new(700.0, 250.0));
    let outcome = controller.pointer_up(&mut ctx, PointerEvent::new(700.0, 250.0));

    assert_eq!(outcome, InteractionOutcome::SceneChanged);
    assert!((ctx.scene.state().roof_masks()[0].direction - 90.0).abs() < 1e-9);
}

fn area_matches_active_scale(scene: &SceneModel) -> bool {
    scene.state().roof_masks().iter().all(|roof| {
        (roof.area - polygon_area(&roof.points, scene.meters_per_pixel())).abs() < 1e-9
    })
}

#[test]
fn test_undoing_rescale_restores_scale_with_areas() {
    let (mut ctx, mut controller) = calibrated_editor();
    draw_roof(&mut ctx, &mut controller, ROOF);

    assert!(ctx.scene.set_scale(ScaleInfo::calibrate(100.0, 2.0).unwrap()));
    assert!((ctx.scene.state().roof_masks()[0].area - 200.0).abs() < 1e-9);

    controller.undo(&mut ctx);
    assert_eq!(ctx.scene.meters_per_pixel(), Some(0.01));
    assert!((ctx.scene.state().roof_masks()[0].area - 50.0).abs() < 1e-9);
    assert!(area_matches_active_scale(&ctx.scene));

    // Roof drawing, then the calibration itself
    controller.undo(&mut ctx);
    controller.undo(&mut ctx);
    assert!(ctx.scene.meters_per_pixel().is_none());

    controller.redo(&mut ctx);
    controller.redo(&mut ctx);
    controller.redo(&mut ctx);
    assert!((ctx.scene.meters_per_pixel().unwrap() - 0.02).abs() < 1e-12);
    assert!(area_matches_active_scale(&ctx.scene));
}
