use kitchenkit_core::{JsonDirStore, KeyValueStore};

#[test]
fn test_dir_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = JsonDirStore::open(dir.path()).unwrap();
        store.set("kitchen.modules.front", "[]").unwrap();
        store.set("kitchen.layout.v1", "{}").unwrap();
    }

    let store = JsonDirStore::open(dir.path()).unwrap();
    assert_eq!(
        store.get("kitchen.modules.front").unwrap().as_deref(),
        Some("[]")
    );
    assert_eq!(
        store.keys().unwrap(),
        vec!["kitchen.layout.v1".to_string(), "kitchen.modules.front".to_string()]
    );
}

#[test]
fn test_dir_store_remove_missing_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonDirStore::open(dir.path().join("nested")).unwrap();
    store.remove("never.written").unwrap();
    assert_eq!(store.get("never.written").unwrap(), None);
}
