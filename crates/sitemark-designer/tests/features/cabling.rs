use sitemark_designer::geometry::line_length;
use sitemark_designer::{
    ArraySpec, CableType, EditorContext, EquipmentItem, EquipmentType, InteractionController,
    InteractionOutcome, Key, KeyEvent, Orientation, Point, PointerEvent, PvArrayItem, Tool,
};

use super::{calibrated_editor, click};

fn with_inverter_and_board() -> (EditorContext, InteractionController) {
    let (mut ctx, controller) = calibrated_editor();
    ctx.scene.set_equipment(|_| {
        vec![
            EquipmentItem::new(EquipmentType::Inverter, Point::new(200.0, 200.0), 0.0),
            EquipmentItem::new(EquipmentType::MainBoard, Point::new(800.0, 200.0), 0.0),
        ]
    });
    (ctx, controller)
}

#[test]
fn test_ac_line_completes_on_second_terminus() {
    let (mut ctx, mut controller) = with_inverter_and_board();
    controller.set_tool(&ctx, Tool::Line(CableType::Ac));

    click(&mut ctx, &mut controller, 205.0, 203.0);
    click(&mut ctx, &mut controller, 500.0, 400.0);
    assert!(ctx.scene.state().lines().is_empty());
    click(&mut ctx, &mut controller, 802.0, 198.0);

    let lines = ctx.scene.state().lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line.name, "AC 1");
    assert_eq!(line.cable_type, CableType::Ac);
    assert_eq!(line.points.first(), Some(&Point::new(200.0, 200.0)));
    assert_eq!(line.points.last(), Some(&Point::new(800.0, 200.0)));

    let expected = 2.0 * Point::new(300.0, 200.0).length() * 0.01;
    assert!((line.length - expected).abs() < 1e-9);
    assert!(!controller.tool_state().in_progress());
}

#[test]
fn test_free_line_finishes_on_double_click() {
    let (mut ctx, mut controller) = with_inverter_and_board();
    controller.set_tool(&ctx, Tool::Line(CableType::Dc));
    click(&mut ctx, &mut controller, 100.0, 600.0);
    click(&mut ctx, &mut controller, 400.0, 600.0);
    let outcome = controller.pointer_down(&mut ctx, PointerEvent::new(400.0, 600.0).double_click());

    assert_eq!(outcome, InteractionOutcome::SceneChanged);
    let lines = ctx.scene.state().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].name, "DC 1");
    assert!((lines[0].length - 3.0).abs() < 1e-9);
}

#[test]
fn test_names_count_per_cable_type() {
    let (mut ctx, mut controller) = with_inverter_and_board();
    for cable_type in [CableType::Dc, CableType::Ac, CableType::Dc] {
        controller.set_tool(&ctx, Tool::Line(cable_type));
        click(&mut ctx, &mut controller, 100.0, 600.0);
        click(&mut ctx, &mut controller, 400.0, 700.0);
        controller.key_down(&mut ctx, KeyEvent::new(Key::Enter));
    }
    let names: Vec<&str> = ctx.scene.state().lines().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["DC 1", "AC 1", "DC 2"]);
}

#[test]
fn test_single_point_line_is_not_committed() {
    let (mut ctx, mut controller) = with_inverter_and_board();
    controller.set_tool(&ctx, Tool::Line(CableType::Dc));
    click(&mut ctx, &mut controller, 100.0, 600.0);
    assert_eq!(controller.key_down(&mut ctx, KeyEvent::new(Key::Enter)), InteractionOutcome::Unchanged);
    assert!(ctx.scene.state().lines().is_empty());

    controller.key_down(&mut ctx, KeyEvent::new(Key::Escape));
    assert!(!controller.tool_state().in_progress());
}

#[test]
fn test_ac_line_passes_dc_combiner() {
    let (mut ctx, mut controller) = with_inverter_and_board();
    controller.set_tool(&ctx, Tool::Line(CableType::Ac));
    ctx.scene.set_equipment(|items| {
        let mut items = items.to_vec();
        items.push(EquipmentItem::new(EquipmentType::DcCombiner, Point::new(500.0, 200.0), 0.0));
        items
    });
    click(&mut ctx, &mut controller, 200.0, 200.0);
    click(&mut ctx, &mut controller, 500.0, 200.0);
    assert!(ctx.scene.state().lines().is_empty());
    assert!(controller.tool_state().in_progress());
}

#[test]
fn test_dc_line_completes_on_array() {
    let (mut ctx, mut controller) = with_inverter_and_board();
    ctx.scene.set_pv_arrays(|_| {
        vec![PvArrayItem::new(ArraySpec::new(2, 3, Orientation::Portrait), Point::new(600.0, 600.0), 0.0)]
    });
    controller.set_tool(&ctx, Tool::Line(CableType::Dc));

    click(&mut ctx, &mut controller, 100.0, 650.0);
    click(&mut ctx, &mut controller, 603.0, 598.0);

    let lines = ctx.scene.state().lines();
    assert_eq!(lines.len(), 1);
    let points = vec![Point::new(100.0, 650.0), Point::new(600.0, 600.0)];
    assert_eq!(lines[0].points, points);
    assert!((lines[0].length - line_length(&points, Some(0.01))).abs() < 1e-9);
}
