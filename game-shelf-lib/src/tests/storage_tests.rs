use super::*;

#[test]
fn file_store_round_trips_values() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("data")).unwrap();

    assert_eq!(store.read("myGames").unwrap(), None);
    store.write("myGames", "[1,2,3]").unwrap();
    assert_eq!(store.read("myGames").unwrap().as_deref(), Some("[1,2,3]"));
    assert!(dir.path().join("data").join("myGames.json").exists());
    assert!(!dir.path().join("data").join("myGames.json.tmp").exists());
}

#[test]
fn file_store_overwrites_and_removes() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    store.write("tierListState", "{}").unwrap();
    store.write("tierListState", "{\"a\":1}").unwrap();
    assert_eq!(store.read("tierListState").unwrap().as_deref(), Some("{\"a\":1}"));

    store.remove("tierListState").unwrap();
    assert_eq!(store.read("tierListState").unwrap(), None);
    // Removing twice is fine
    store.remove("tierListState").unwrap();
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    assert!(matches!(
        store.write("../escape", "x"),
        Err(StorageError::InvalidKey(_))
    ));
    assert!(matches!(store.read(""), Err(StorageError::InvalidKey(_))));
}

#[test]
fn memory_store_read_only_rejects_writes() {
    let store = MemoryStore::new().with_value("myGames", "[]");
    store.set_read_only(true);
    assert!(matches!(store.write("myGames", "[1]"), Err(StorageError::ReadOnly)));
    assert_eq!(store.get("myGames").as_deref(), Some("[]"));

    store.set_read_only(false);
    store.write("myGames", "[1]").unwrap();
    assert_eq!(store.get("myGames").as_deref(), Some("[1]"));
}

#[test]
fn load_json_treats_malformed_content_as_absent() {
    let store = MemoryStore::new().with_value("myGames", "{not json");
    let loaded: Option<Vec<u32>> = load_json(&store, "myGames");
    assert!(loaded.is_none());
}

#[test]
fn persist_json_swallows_write_failures() {
    let store = MemoryStore::new();
    store.set_read_only(true);
    persist_json(&store, "myGames", &vec![1, 2, 3]);
    assert!(store.get("myGames").is_none());
}
