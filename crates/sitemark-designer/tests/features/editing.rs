use sitemark_designer::{
    ArraySpec, EditorContext, EquipmentItem, EquipmentType, InteractionController, InteractionOutcome,
    ItemKind, Key, KeyEvent, Modifiers, Orientation, Point, PointerEvent, PvArrayItem, RectEdge, Tool, ToolState,
};

use super::{calibrated_editor, click};

fn with_two_inverters() -> (EditorContext, InteractionController) {
    let (mut ctx, controller) = calibrated_editor();
    ctx.scene.set_equipment(|_| {
        vec![
            EquipmentItem::new(EquipmentType::Inverter, Point::new(200.0, 200.0), 0.0),
            EquipmentItem::new(EquipmentType::Inverter, Point::new(600.0, 200.0), 0.0),
        ]
    });
    (ctx, controller)
}

fn positions(ctx: &EditorContext) -> Vec<Point> {
    ctx.scene.state().equipment().iter().map(|e| e.position).collect()
}

#[test]
fn test_shift_click_then_group_drag_commits_once() {
    let (mut ctx, mut controller) = with_two_inverters();
    click(&mut ctx, &mut controller, 200.0, 200.0);
    controller.pointer_down(&mut ctx, PointerEvent::new(600.0, 200.0).with_modifiers(Modifiers::shift()));
    controller.pointer_up(&mut ctx, PointerEvent::new(600.0, 200.0));
    assert_eq!(controller.selection().len(), 2);

    let depth = ctx.scene.history().undo_depth();
    controller.pointer_down(&mut ctx, PointerEvent::new(600.0, 200.0));
    controller.pointer_move(&mut ctx, PointerEvent::new(620.0, 230.0));
    controller.pointer_move(&mut ctx, PointerEvent::new(650.0, 250.0));

    // The scene is untouched until release; only the preview moves
    assert_eq!(positions(&ctx), vec![Point::new(200.0, 200.0), Point::new(600.0, 200.0)]);
    let preview: Vec<Point> = controller.display_state(&ctx).equipment().iter().map(|e| e.position).collect();
    assert_eq!(preview, vec![Point::new(250.0, 250.0), Point::new(650.0, 250.0)]);

    let outcome = controller.pointer_up(&mut ctx, PointerEvent::new(650.0, 250.0));
    assert_eq!(outcome, InteractionOutcome::SceneChanged);
    assert_eq!(ctx.scene.history().undo_depth(), depth + 1);
    assert_eq!(positions(&ctx), vec![Point::new(250.0, 250.0), Point::new(650.0, 250.0)]);
}

#[test]
fn test_group_drag_moves_array_and_equipment_only() {
    let (mut ctx, mut controller) = with_two_inverters();
    ctx.scene.set_pv_arrays(|_| {
        vec![PvArrayItem::new(ArraySpec::new(2, 3, Orientation::Portrait), Point::new(400.0, 600.0), 0.0)]
    });
    click(&mut ctx, &mut controller, 400.0, 600.0);
    controller.pointer_down(&mut ctx, PointerEvent::new(600.0, 200.0).with_modifiers(Modifiers::shift()));
    controller.pointer_up(&mut ctx, PointerEvent::new(600.0, 200.0));
    assert_eq!(controller.selection().len(), 2);

    controller.pointer_down(&mut ctx, PointerEvent::new(600.0, 200.0));
    controller.pointer_move(&mut ctx, PointerEvent::new(625.0, 190.0));
    controller.pointer_up(&mut ctx, PointerEvent::new(625.0, 190.0));

    assert_eq!(ctx.scene.state().pv_arrays()[0].position, Point::new(425.0, 590.0));
    assert_eq!(positions(&ctx), vec![Point::new(200.0, 200.0), Point::new(625.0, 190.0)]);
}

#[test]
fn test_undo_redo_keys() {
    let (mut ctx, mut controller) = with_two_inverters();
    click(&mut ctx, &mut controller, 200.0, 200.0);
    controller.key_down(&mut ctx, KeyEvent::new(Key::Delete));
    assert_eq!(ctx.scene.state().equipment().len(), 1);
    assert!(controller.selection().is_empty());

    let ctrl = Modifiers::ctrl();
    controller.key_down(&mut ctx, KeyEvent::new(Key::Char('z')).with_modifiers(ctrl));
    assert_eq!(ctx.scene.state().equipment().len(), 2);

    controller.key_down(&mut ctx, KeyEvent::new(Key::Char('y')).with_modifiers(ctrl));
    assert_eq!(ctx.scene.state().equipment().len(), 1);

    let ctrl_shift = Modifiers {
        shift: true,
        ..Modifiers::ctrl()
    };
    controller.key_down(&mut ctx, KeyEvent::new(Key::Char('z')).with_modifiers(ctrl));
    controller.key_down(&mut ctx, KeyEvent::new(Key::Char('Z')).with_modifiers(ctrl_shift));
    assert_eq!(ctx.scene.state().equipment().len(), 1);
}

#[test]
fn test_undo_drops_selection_of_vanished_items() {
    let (mut ctx, mut controller) = calibrated_editor();
    controller.set_tool(&ctx, Tool::Equipment(EquipmentType::SubBoard));
    click(&mut ctx, &mut controller, 300.0, 300.0);
    controller.set_tool(&ctx, Tool::Select);
    click(&mut ctx, &mut controller, 300.0, 300.0);
    assert_eq!(controller.selection().len(), 1);

    controller.undo(&mut ctx);
    assert!(controller.selection().is_empty());
}

#[test]
fn test_read_only_allows_selection_but_no_edits() {
    let (mut ctx, mut controller) = with_two_inverters();
    ctx.scene.set_read_only(true);

    assert_eq!(controller.set_tool(&ctx, Tool::RoofMask), InteractionOutcome::Unchanged);
    assert!(matches!(controller.tool_state(), ToolState::Select(_)));

    controller.pointer_down(&mut ctx, PointerEvent::new(200.0, 200.0));
    controller.pointer_move(&mut ctx, PointerEvent::new(300.0, 300.0));
    controller.pointer_up(&mut ctx, PointerEvent::new(300.0, 300.0));
    assert_eq!(controller.selection().len(), 1);
    assert_eq!(positions(&ctx)[0], Point::new(200.0, 200.0));

    assert_eq!(controller.key_down(&mut ctx, KeyEvent::new(Key::Delete)), InteractionOutcome::Unchanged);
    let save = KeyEvent::new(Key::Char('s')).with_modifiers(Modifiers::ctrl());
    assert_eq!(controller.key_down(&mut ctx, save), InteractionOutcome::Unchanged);
    assert_eq!(ctx.scene.state().equipment().len(), 2);
}

#[test]
fn test_save_shortcut_is_reported() {
    let (mut ctx, mut controller) = with_two_inverters();
    let save = KeyEvent::new(Key::Char('s')).with_modifiers(Modifiers::ctrl());
    assert_eq!(controller.key_down(&mut ctx, save), InteractionOutcome::SaveRequested);
}

#[test]
fn test_marquee_selects_both_inverters() {
    let (mut ctx, mut controller) = with_two_inverters();
    controller.pointer_down(&mut ctx, PointerEvent::new(100.0, 100.0));
    controller.pointer_move(&mut ctx, PointerEvent::new(700.0, 300.0));
    controller.pointer_up(&mut ctx, PointerEvent::new(700.0, 300.0));
    assert_eq!(controller.selection().len(), 2);

    // A click on empty space clears it again
    click(&mut ctx, &mut controller, 1000.0, 700.0);
    assert!(controller.selection().is_empty());
}

#[test]
fn test_dimension_tool_reports_footprint() {
    let (mut ctx, mut controller) = with_two_inverters();
    controller.set_tool(&ctx, Tool::Dimension);
    let outcome = controller.pointer_down(&mut ctx, PointerEvent::new(200.0, 200.0));

    let InteractionOutcome::DimensionPicked(info) = outcome else {
        panic!("expected a dimension, got {:?}", outcome);
    };
    assert_eq!(info.item.kind, ItemKind::Equipment);
    assert!((info.width_m - 0.7).abs() < 1e-9);
    assert!((info.height_m - 0.5).abs() < 1e-9);
}

#[test]
fn test_align_edges_picks_named_sides() {
    let (mut ctx, mut controller) = with_two_inverters();
    controller.set_tool(&ctx, Tool::AlignEdges);

    // Inverter is 70 x 50 px at 1 cm/px: right edge at x = 235
    let first = controller.pointer_down(&mut ctx, PointerEvent::new(233.0, 200.0));
    let InteractionOutcome::EdgePicked(right) = first else {
        panic!("expected an edge, got {:?}", first);
    };
    assert_eq!(right.side, Some(RectEdge::Right));

    let second = controller.pointer_down(&mut ctx, PointerEvent::new(600.0, 177.0));
    let InteractionOutcome::EdgePicked(top) = second else {
        panic!("expected an edge, got {:?}", second);
    };
    assert_eq!(top.side, Some(RectEdge::Top));
    assert_eq!(ctx.scene.history().undo_depth(), 2);
}
