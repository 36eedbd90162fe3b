//! Tests for JSON document stores

#[cfg(test)]
mod tests {
    use floorgen::io::error::FloorplanError;
    use floorgen::io::store::{JsonFileStore, MemoryStore, Store, read_json, write_json};
    use floorgen::spatial::geometry::Rect;
    use floorgen::spatial::layout::Layout;

    fn layout() -> Layout {
        let mut layout = Layout::new();
        layout.insert("Garage", Rect::new(0, 0, 5, 5));
        layout.set_stairs(Rect::new(100, 120, 15, 15));
        layout
    }

    // Tests file store documents live under the root with a JSON extension
    // Verified by saving without the extension
    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("state"));
        assert!(store.load::<Layout>("plan1").unwrap().is_none());

        store.save("plan1", &layout()).unwrap();
        assert!(store.path_for("plan1").is_file());
        assert_eq!(store.path_for("plan1"), store.root().join("plan1.json"));
        assert_eq!(store.load::<Layout>("plan1").unwrap(), Some(layout()));
    }

    // Tests stored layouts keep stairs under the reserved key
    // Verified by writing stairs as a separate field
    #[test]
    fn test_layout_document_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        write_json(&path, &layout()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Stairs\""));
        assert!(text.contains("\"Garage\""));
        assert!(text.contains('\n'));

        let value: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(value["Stairs"]["x"], 100);
    }

    // Tests corrupt documents report the file they came from
    // Verified by returning None for undecodable files
    #[test]
    fn test_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(store.path_for("bandit"), "{ not json").unwrap();
        match store.load::<Layout>("bandit") {
            Err(FloorplanError::Serialization { path, .. }) => {
                assert_eq!(path, store.path_for("bandit"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(read_json::<Layout>(&dir.path().join("missing.json")).is_err());
    }

    // Tests the memory store replaces values per key
    // Verified by appending duplicate keys
    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.save("count", &1_u32).unwrap();
        store.save("count", &2_u32).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load::<u32>("count").unwrap(), Some(2));
        assert!(store.load::<u32>("other").unwrap().is_none());
        assert!(store.load::<Layout>("count").is_err());
    }
}
