use smarttrip_core::{
    load_catalog, load_catalog_or_empty, CatalogLoadError, CatalogSource, Category, TripPlanner,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_catalog(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const SAMPLE: &str = r#"{
  "lastUpdated": "2024-05-01T08:00:00.000Z",
  "attractions": [
    {
      "id": "tp-1", "region": "台北", "district": "信義", "name": "台北101",
      "category": "風景", "description": "城市地標", "suggestedDuration": "2 小時",
      "address": "台北市信義區信義路五段7號", "rating": 4.7, "popularity": 98,
      "lat": 25.0339, "lng": 121.5645
    },
    {
      "id": "tc-1", "region": "台中", "district": "西區", "name": "審計新村",
      "category": "有趣", "description": "文創聚落", "suggestedDuration": "1-2 小時",
      "address": "台中市西區民生路368巷", "rating": 4.3, "popularity": 75
    }
  ]
}"#;

#[test]
fn loads_catalog_from_file() {
    let file = write_catalog(SAMPLE);
    let catalog = load_catalog(&CatalogSource::File(file.path().to_path_buf())).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.last_updated, "2024-05-01T08:00:00.000Z");
    assert_eq!(catalog.attractions[0].coordinates(), Some((25.0339, 121.5645)));
    assert_eq!(catalog.attractions[1].category, Category::Fun);
    assert_eq!(catalog.attractions[1].coordinates(), None);
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = CatalogSource::File(dir.path().join("absent.json"));

    let err = load_catalog(&source).unwrap_err();
    assert!(matches!(err, CatalogLoadError::Io { .. }));
}

#[test]
fn malformed_document_falls_back_to_empty_catalog() {
    let file = write_catalog("{ not json");
    let catalog = load_catalog_or_empty(&CatalogSource::File(file.path().to_path_buf()));

    assert!(catalog.is_empty());
    assert!(catalog.last_updated_at().is_some());
}

#[test]
fn duplicate_ids_keep_first_entry() {
    let doc = SAMPLE.replace("\"tc-1\"", "\"tp-1\"");
    let file = write_catalog(&doc);
    let catalog = load_catalog(&CatalogSource::File(file.path().to_path_buf())).unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.attractions[0].name, "台北101");
}

#[test]
fn planner_load_failure_leaves_usable_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut planner = TripPlanner::new();
    assert!(!planner.is_loaded());

    let ok = planner.load_catalog(&CatalogSource::File(dir.path().join("absent.json")));

    assert!(!ok);
    assert!(planner.is_loaded());
    assert!(planner.visible().is_empty());
    assert!(planner.available_regions().is_empty());
    assert_eq!(planner.selected_id(), None);
}

#[test]
fn planner_load_success_selects_first_attraction() {
    let file = write_catalog(SAMPLE);
    let mut planner = TripPlanner::new();

    assert!(planner.load_catalog(&CatalogSource::File(file.path().to_path_buf())));
    assert_eq!(planner.selected_id().map(|id| id.as_str()), Some("tp-1"));
    assert_eq!(planner.available_regions(), ["台北", "台中"]);
}
