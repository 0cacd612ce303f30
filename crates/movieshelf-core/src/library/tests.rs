//! Library store tests (memory and file backends).

use crate::library::{
    FileStorage, LibraryStore, MemoryStorage, StorageBackend, StoreError, LIBRARY_KEY,
};
use crate::record::{DisplayRecord, Library, NOT_AVAILABLE};

fn movie(title: &str, year: &str, id: u64) -> DisplayRecord {
    DisplayRecord {
        title: title.to_string(),
        year: year.to_string(),
        id,
        poster: NOT_AVAILABLE.to_string(),
        director: NOT_AVAILABLE.to_string(),
        main_actors: String::new(),
        trailer: NOT_AVAILABLE.to_string(),
    }
}

fn titles(lib: &Library) -> Vec<(&str, &str)> {
    lib.iter().map(|r| (r.title.as_str(), r.year.as_str())).collect()
}

/// Backend whose writes always fail.
struct ReadOnlyStorage(MemoryStorage);

impl StorageBackend for ReadOnlyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: "read-only".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

#[test]
fn absent_key_loads_empty() {
    let store = LibraryStore::open(MemoryStorage::new()).unwrap();
    assert!(store.list().is_empty());
}

#[test]
fn blank_value_loads_empty() {
    let mut backend = MemoryStorage::new();
    backend.set(LIBRARY_KEY, "").unwrap();
    let store = LibraryStore::open(backend).unwrap();
    assert!(store.list().is_empty());
}

#[test]
fn added_records_survive_reload_in_order() {
    let mut store = LibraryStore::open(MemoryStorage::new()).unwrap();
    store.add(movie("Dune", "2021", 1)).unwrap();
    store.add(movie("Alien", "1979", 2)).unwrap();
    store.add(movie("Heat", "1995", 3)).unwrap();

    let reopened = LibraryStore::open(store.into_backend()).unwrap();
    assert_eq!(
        titles(reopened.list()),
        vec![("Dune", "2021"), ("Alien", "1979"), ("Heat", "1995")]
    );
}

#[test]
fn remove_by_title_drops_all_duplicates() {
    let mut store = LibraryStore::open(MemoryStorage::new()).unwrap();
    store.add(movie("Dune", "2021", 438631)).unwrap();
    store.add(movie("Dune", "2021", 438631)).unwrap();
    store.add(movie("Alien", "1979", 348)).unwrap();

    assert_eq!(store.remove_by_title("Dune").unwrap(), 2);
    assert_eq!(titles(store.list()), vec![("Alien", "1979")]);

    let reopened = LibraryStore::open(store.into_backend()).unwrap();
    assert_eq!(titles(reopened.list()), vec![("Alien", "1979")]);
}

#[test]
fn remove_by_title_is_exact_and_case_sensitive() {
    let mut store = LibraryStore::open(MemoryStorage::new()).unwrap();
    store.add(movie("Dune", "1984", 841)).unwrap();
    store.add(movie("dune", "2000", 5)).unwrap();
    store.add(movie("Dune: Part Two", "2024", 693134)).unwrap();

    assert_eq!(store.remove_by_title("Dune").unwrap(), 1);
    assert_eq!(
        titles(store.list()),
        vec![("dune", "2000"), ("Dune: Part Two", "2024")]
    );
    assert_eq!(store.remove_by_title("Missing").unwrap(), 0);
    assert_eq!(store.list().len(), 2);
}

#[test]
fn remove_by_id_keeps_same_titled_remake() {
    let mut store = LibraryStore::open(MemoryStorage::new()).unwrap();
    store.add(movie("Dune", "1984", 841)).unwrap();
    store.add(movie("Dune", "2021", 438631)).unwrap();

    assert_eq!(store.remove_by_id(841).unwrap(), 1);
    assert_eq!(titles(store.list()), vec![("Dune", "2021")]);
}

#[test]
fn snapshot_round_trips_through_backend() {
    let mut store = LibraryStore::open(MemoryStorage::new()).unwrap();
    store.add(movie("Dune", "2021", 1)).unwrap();
    store.add(movie("Alien", "1979", 2)).unwrap();
    store.add(movie("Dune", "2021", 1)).unwrap();
    store.remove_by_title("Alien").unwrap();

    let raw = store.backend().get(LIBRARY_KEY).unwrap().unwrap();
    let parsed: Library = serde_json::from_str(&raw).unwrap();
    assert_eq!(&parsed, store.list());
    assert_eq!(serde_json::to_string(&parsed).unwrap(), raw);
}

#[test]
fn reads_snapshot_written_by_the_page() {
    let raw = r#"[{"title":"Alien","year":"1979","id":348,"poster":"https://image.tmdb.org/t/p/w200/a.jpg","director":"Ridley Scott","mainActors":"Sigourney Weaver, Tom Skerritt, Veronica Cartwright","trailer":"N/A"}]"#;
    let mut backend = MemoryStorage::new();
    backend.set(LIBRARY_KEY, raw).unwrap();
    let store = LibraryStore::open(backend).unwrap();
    let record = &store.list().as_slice()[0];
    assert_eq!(record.director, "Ridley Scott");
    assert_eq!(record.trailer_url(), None);
}

#[test]
fn corrupt_snapshot_is_reported() {
    let mut backend = MemoryStorage::new();
    backend.set(LIBRARY_KEY, "{not json").unwrap();
    let err = LibraryStore::open(backend).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == LIBRARY_KEY));
}

#[test]
fn failed_write_leaves_library_unchanged() {
    let mut seed = MemoryStorage::new();
    seed.set(LIBRARY_KEY, &serde_json::to_string(&vec![movie("Heat", "1995", 949)]).unwrap())
        .unwrap();
    let mut store = LibraryStore::open(ReadOnlyStorage(seed)).unwrap();

    assert!(store.add(movie("Alien", "1979", 348)).is_err());
    assert!(store.remove_by_title("Heat").is_err());
    assert_eq!(titles(store.list()), vec![("Heat", "1995")]);
}

#[test]
fn file_storage_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LibraryStore::open(FileStorage::new(dir.path().join("shelf"))).unwrap();
    assert!(store.list().is_empty());
    store.add(movie("Heat", "1995", 949)).unwrap();

    let path = dir.path().join("shelf").join("movies.json");
    assert!(path.exists());

    let reopened = LibraryStore::open(FileStorage::new(dir.path().join("shelf"))).unwrap();
    assert_eq!(titles(reopened.list()), vec![("Heat", "1995")]);
}

#[test]
fn file_storage_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    assert!(matches!(storage.get("../etc"), Err(StoreError::InvalidKey(_))));
    assert!(matches!(storage.path_for(""), Err(StoreError::InvalidKey(_))));
    assert!(storage.get("movies").unwrap().is_none());
}
