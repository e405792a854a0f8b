use sitemark_designer::{JsonFileStore, LayoutRecord, LayoutStore};

#[test]
fn test_missing_directory_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("layouts"));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_save_creates_directory_and_lists_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("layouts"));

    store.save("warehouse", &LayoutRecord::new("Warehouse")).unwrap();
    store.save("barn", &LayoutRecord::new("Barn")).unwrap();
    std::fs::write(dir.path().join("layouts").join("notes.txt"), "ignored").unwrap();

    assert_eq!(store.list().unwrap(), vec!["barn".to_string(), "warehouse".to_string()]);
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let mut record = LayoutRecord::new("Barn");
    record.scale_pixels_per_meter = Some(42.0);
    store.save("barn", &record).unwrap();

    let loaded = store.load("barn").unwrap();
    assert_eq!(loaded.metadata.name, "Barn");
    assert_eq!(loaded.scale_pixels_per_meter, Some(42.0));
    assert!(loaded.metadata.modified >= record.metadata.modified);
}

#[test]
fn test_loading_unknown_layout_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    assert!(store.load("nope").is_err());
}

#[test]
fn test_corrupt_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    let store = JsonFileStore::new(dir.path());
    let err = store.load("broken").unwrap_err();
    assert!(format!("{:#}", err).contains("broken.json"));
}
