use chrono::TimeZone;
use sitemark_core::{Error, LayoutError};
use sitemark_designer::{
    ArraySpec, BackgroundRef, CableType, EquipmentItem, EquipmentType, LayoutRecord,
    MaterialConfig, MaterialKind, Orientation, PlacedMaterial, Point, PvArrayItem, RoofMask,
    SceneModel, ScaleInfo, SupplyLine,
};

fn square(size: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(size, 0.0),
        Point::new(size, size),
        Point::new(0.0, size),
    ]
}

fn populated_scene() -> SceneModel {
    let mut scene = SceneModel::new(0);
    scene.set_name("Depot roof");
    scene.set_scale(ScaleInfo::from_pixels_per_meter(50.0).unwrap());
    scene.set_background(Some(BackgroundRef::new("uploads/depot.png")));
    scene.apply(|state| {
        let walkway = MaterialConfig::new(MaterialKind::Walkway, "Walkway 600", 0.6, 3.0);
        state
            .with_roof_masks(vec![RoofMask::new(square(1000.0), 15.0, 200.0, Some(0.02))])
            .with_pv_arrays(vec![PvArrayItem::new(
                ArraySpec::new(3, 4, Orientation::Landscape),
                Point::new(400.0, 400.0),
                20.0,
            )])
            .with_equipment(vec![EquipmentItem::new(EquipmentType::DcCombiner, Point::new(50.0, 50.0), 0.0)])
            .with_lines(vec![SupplyLine::new(
                "DC 1",
                CableType::Dc,
                vec![Point::new(50.0, 50.0), Point::new(400.0, 400.0)],
                Some(0.02),
            )])
            .with_placed_walkways(vec![PlacedMaterial::from_config(&walkway, Point::new(700.0, 100.0), 90.0)])
    });
    scene
}

#[test]
fn test_scene_survives_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("depot.json");

    let mut scene = populated_scene();
    assert!(scene.is_dirty());
    scene.save_to_file(&path).unwrap();
    assert!(!scene.is_dirty());

    let mut loaded = SceneModel::new(0);
    loaded.load_from_file(&path).unwrap();

    assert_eq!(loaded.name(), "Depot roof");
    assert_eq!(loaded.meters_per_pixel(), Some(0.02));
    assert_eq!(loaded.background(), scene.background());
    assert_eq!(loaded.state().roof_masks(), scene.state().roof_masks());
    assert_eq!(loaded.state().pv_arrays(), scene.state().pv_arrays());
    assert_eq!(loaded.state().equipment(), scene.state().equipment());
    assert_eq!(loaded.state().lines(), scene.state().lines());
    assert_eq!(loaded.state().placed_walkways(), scene.state().placed_walkways());
    assert!(!loaded.can_undo());
    assert!(!loaded.is_dirty());
}

#[test]
fn test_scale_is_stored_as_pixels_per_meter() {
    let record = populated_scene().to_record();
    let json = record.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["scale_pixels_per_meter"], serde_json::json!(50.0));
    assert!(value.get("roofMasks").is_some());
    assert_eq!(value["lines"][0]["type"], "dc");
}

#[test]
fn test_zero_scale_loads_uncalibrated() {
    let mut record = populated_scene().to_record();
    record.scale_pixels_per_meter = Some(0.0);
    let mut scene = SceneModel::new(0);
    scene.load(&record).unwrap();
    assert!(scene.meters_per_pixel().is_none());
    assert_eq!(scene.state().roof_masks()[0].area, 0.0);
    assert_eq!(scene.state().lines()[0].length, 0.0);
}

#[test]
fn test_derived_values_are_recomputed_on_load() {
    let mut record = populated_scene().to_record();
    record.roof_masks[0].area = 1.0;
    let mut scene = SceneModel::new(0);
    scene.load(&record).unwrap();
    // 1000 px square at 2 cm/px
    assert!((scene.state().roof_masks()[0].area - 400.0).abs() < 1e-9);
}

#[test]
fn test_newer_major_version_is_rejected() {
    let mut record = LayoutRecord::new("Future");
    record.version = "2.0".to_string();
    let err = LayoutRecord::from_json(&record.to_json().unwrap()).unwrap_err();
    assert!(matches!(err, Error::Layout(LayoutError::UnsupportedVersion { .. })));
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let mut record = populated_scene().to_record();
    let twin = record.equipment[0].clone();
    record.equipment.push(twin);
    assert!(matches!(
        record.validate(),
        Err(Error::Layout(LayoutError::DuplicateId { .. }))
    ));
}

#[test]
fn test_degenerate_roof_is_rejected() {
    let mut record = LayoutRecord::new("Broken");
    let mut roof = RoofMask::new(square(10.0), 20.0, 180.0, None);
    roof.points.truncate(2);
    record.roof_masks.push(roof);
    assert!(record.validate().unwrap_err().is_layout_error());
}

#[test]
fn test_failed_load_leaves_scene_untouched() {
    let mut scene = populated_scene();
    let before = scene.snapshot();
    assert!(scene.load_from_file("/nonexistent/layout.json").is_err());
    assert!(scene.state().same_snapshot(&before));
}

#[test]
fn test_load_is_allowed_in_read_only_mode() {
    let record = populated_scene().to_record();
    let mut viewer = SceneModel::new(0);
    viewer.set_read_only(true);
    viewer.load(&record).unwrap();
    assert_eq!(viewer.state().item_count(), 5);
}

#[test]
fn test_saving_loaded_layout_keeps_metadata() {
    let created = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let mut record = populated_scene().to_record();
    record.metadata.created = created;
    record.metadata.modified = created;
    record.metadata.description = "north block".to_string();

    let mut scene = SceneModel::new(0);
    scene.load(&record).unwrap();
    scene.set_name("Depot roof v2");
    let saved = scene.to_record();

    assert_eq!(saved.metadata.created, created);
    assert_eq!(saved.metadata.description, "north block");
    assert_eq!(saved.metadata.name, "Depot roof v2");
    assert!(saved.metadata.modified > created);
}
