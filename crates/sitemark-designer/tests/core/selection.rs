use sitemark_designer::model::FootprintContext;
use sitemark_designer::selection_manager::{items_in_rect, HitTestContext};
use sitemark_designer::{
    hit_test, ArraySpec, Bounds, CableType, DesignState, ItemKind, LayerVisibility, Orientation,
    Point, PvArrayItem, RoofMask, SelectionManager, SupplyLine,
};

fn hit_ctx(layers: LayerVisibility) -> HitTestContext {
    HitTestContext {
        footprint: FootprintContext::new(0.01, 1.0, 1.7),
        layers,
        cable_tolerance: 6.0,
    }
}

fn scene() -> DesignState {
    let roof = RoofMask::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(2000.0, 0.0),
            Point::new(2000.0, 2000.0),
            Point::new(0.0, 2000.0),
        ],
        20.0,
        180.0,
        Some(0.01),
    );
    let array = PvArrayItem::new(ArraySpec::new(2, 3, Orientation::Portrait), Point::new(500.0, 500.0), 0.0);
    let cable = SupplyLine::new(
        "DC 1",
        CableType::Dc,
        vec![Point::new(100.0, 1500.0), Point::new(1900.0, 1500.0)],
        Some(0.01),
    );
    DesignState::default()
        .with_roof_masks(vec![roof])
        .with_pv_arrays(vec![array])
        .with_lines(vec![cable])
}

#[test]
fn test_array_wins_over_roof_underneath() {
    let state = scene();
    let hit = hit_test(&state, Point::new(500.0, 500.0), &hit_ctx(LayerVisibility::default()));
    assert_eq!(hit.map(|r| r.kind), Some(ItemKind::PvArray));

    let hit = hit_test(&state, Point::new(1500.0, 500.0), &hit_ctx(LayerVisibility::default()));
    assert_eq!(hit.map(|r| r.kind), Some(ItemKind::RoofMask));
}

#[test]
fn test_cable_hit_uses_tolerance() {
    let state = scene();
    let ctx = hit_ctx(LayerVisibility::default());
    let near = hit_test(&state, Point::new(1000.0, 1505.0), &ctx);
    assert_eq!(near.map(|r| r.kind), Some(ItemKind::Cable));
    let far = hit_test(&state, Point::new(1000.0, 1520.0), &ctx);
    assert_eq!(far.map(|r| r.kind), Some(ItemKind::RoofMask));
}

#[test]
fn test_hidden_layer_is_not_hit() {
    let state = scene();
    let mut layers = LayerVisibility::default();
    layers.set_visible(ItemKind::PvArray, false);
    let hit = hit_test(&state, Point::new(500.0, 500.0), &hit_ctx(layers));
    assert_eq!(hit.map(|r| r.kind), Some(ItemKind::RoofMask));
}

#[test]
fn test_marquee_catches_cable_crossing_without_vertices() {
    let state = scene();
    let rect = Bounds::new(900.0, 1400.0, 1100.0, 1600.0);
    let caught = items_in_rect(&state, &rect, &LayerVisibility::default());
    assert_eq!(caught.len(), 1);
    assert_eq!(caught[0].kind, ItemKind::Cable);
}

#[test]
fn test_marquee_catches_rects_by_centre() {
    let state = scene();
    let partial = Bounds::new(300.0, 300.0, 450.0, 450.0);
    assert!(items_in_rect(&state, &partial, &LayerVisibility::default()).is_empty());
    let centre = Bounds::new(450.0, 450.0, 550.0, 550.0);
    let caught = items_in_rect(&state, &centre, &LayerVisibility::default());
    assert_eq!(caught.iter().map(|r| r.kind).collect::<Vec<_>>(), vec![ItemKind::PvArray]);
}

#[test]
fn test_additive_marquee_keeps_previous_selection() {
    let state = scene();
    let layers = LayerVisibility::default();
    let mut selection = SelectionManager::new();
    selection.select_in_rect(&state, &Bounds::new(450.0, 450.0, 550.0, 550.0), &layers, false);
    assert_eq!(selection.len(), 1);

    selection.select_in_rect(&state, &Bounds::new(900.0, 1400.0, 1100.0, 1600.0), &layers, true);
    assert_eq!(selection.len(), 2);

    selection.select_in_rect(&state, &Bounds::new(900.0, 1400.0, 1100.0, 1600.0), &layers, false);
    assert_eq!(selection.len(), 1);
}

#[test]
fn test_retain_existing_drops_deleted_items() {
    let state = scene();
    let mut selection = SelectionManager::new();
    let array_ref = state.items().find(|(r, _)| r.kind == ItemKind::PvArray).map(|(r, _)| r);
    selection.select_only(array_ref.clone().unwrap());

    let without = state.without_items(&[array_ref.unwrap()]);
    selection.retain_existing(&without);
    assert!(selection.is_empty());
}
