use sitemark_designer::{
    DesignState, EquipmentItem, EquipmentType, History, Point, SceneModel, ScaleInfo,
};

fn with_inverters(n: usize) -> DesignState {
    let items = (0..n)
        .map(|i| EquipmentItem::new(EquipmentType::Inverter, Point::new(i as f64 * 100.0, 0.0), 0.0))
        .collect();
    DesignState::default().with_equipment(items)
}

#[test]
fn test_new_history_has_nothing_to_undo() {
    let history = History::new(DesignState::default(), 50);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.len(), 1);
}

#[test]
fn test_undo_then_redo_restores_same_snapshot() {
    let mut scene = SceneModel::new(0);
    scene.commit(with_inverters(1));
    let committed = scene.snapshot();

    assert!(scene.undo());
    assert!(scene.state().is_empty());
    assert!(scene.redo());
    assert!(scene.state().same_snapshot(&committed));
}

#[test]
fn test_commit_after_undo_drops_redo_tail() {
    let mut scene = SceneModel::new(0);
    scene.commit(with_inverters(1));
    scene.commit(with_inverters(2));
    scene.undo();
    assert!(scene.can_redo());

    scene.commit(with_inverters(3));
    assert!(!scene.can_redo());
    assert_eq!(scene.history().len(), 3);
    assert_eq!(scene.state().equipment().len(), 3);
}

#[test]
fn test_limit_drops_oldest_snapshots() {
    let mut history = History::new(DesignState::default(), 3);
    for n in 1..=5 {
        history.commit(with_inverters(n));
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.undo_depth(), 2);
    while history.undo() {}
    assert_eq!(history.current().equipment().len(), 3);
}

#[test]
fn test_read_only_refuses_every_mutation() {
    let mut scene = SceneModel::new(0);
    scene.commit(with_inverters(1));
    scene.set_read_only(true);

    assert!(!scene.commit(with_inverters(2)));
    assert!(!scene.undo());
    assert!(!scene.can_undo());
    assert!(!scene.set_scale(ScaleInfo::calibrate(100.0, 1.0).unwrap()));
    assert_eq!(scene.state().equipment().len(), 1);
    assert!(scene.meters_per_pixel().is_none());
}

#[test]
fn test_set_scale_recomputes_in_one_step() {
    let mut scene = SceneModel::new(0);
    scene.set_roof_masks(|_| {
        vec![sitemark_designer::RoofMask::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1000.0, 0.0),
                Point::new(1000.0, 500.0),
                Point::new(0.0, 500.0),
            ],
            20.0,
            180.0,
            None,
        )]
    });
    assert_eq!(scene.state().roof_masks()[0].area, 0.0);

    scene.set_scale(ScaleInfo::calibrate(100.0, 1.0).unwrap());
    assert!((scene.state().roof_masks()[0].area - 50.0).abs() < 1e-9);

    scene.undo();
    assert_eq!(scene.state().roof_masks()[0].area, 0.0);
}
