//! Storage Abstraction Layer
//!
//! Two seams:
//! - `KeyValueStore`: where strings live (file, browser localStorage, memory)
//! - `SnapshotStorage`: load/save of the whole designers + objects snapshot
//!
//! `KvSnapshotStore` joins them: it keeps the snapshot as one JSON blob under
//! `STORAGE_KEY`, seeds it on first access and runs the migration chain on
//! every load. Callers only see `SnapshotStorage`, so backends can be swapped
//! without touching them.

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod local;
pub mod memory;
pub mod migrate;

pub use memory::MemoryStore;

use crate::config::StudioConfig;
use crate::model::Snapshot;
use serde_json::Value;
use thiserror::Error;

/// Key the snapshot blob is stored under
pub const STORAGE_KEY: &str = "asset-manager-db";

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt snapshot: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Whole-snapshot persistence, injected into the data-access layer
pub trait SnapshotStorage {
    /// Read the snapshot, seeding on first access and migrating legacy shapes
    fn load(&mut self) -> Result<Snapshot, StorageError>;
    /// Overwrite the snapshot with one write
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError>;
}

/// Snapshot persistence on top of any key-value backend
#[derive(Debug)]
pub struct KvSnapshotStore<K: KeyValueStore> {
    kv: K,
    seed_initial_data: bool,
    /// Milliseconds since the epoch, stamped on seed records
    clock: fn() -> u64,
}

impl<K: KeyValueStore> KvSnapshotStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            seed_initial_data: true,
            clock: crate::api::now_ms,
        }
    }

    /// Start empty instead of writing the demo dataset
    pub fn without_seed(mut self) -> Self {
        self.seed_initial_data = false;
        self
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub fn kv(&self) -> &K {
        &self.kv
    }

    fn first_access(&mut self) -> Result<Snapshot, StorageError> {
        if !self.seed_initial_data {
            return Ok(Snapshot::default());
        }
        log::info!("No stored snapshot under '{}', seeding initial data", STORAGE_KEY);
        let seed = Snapshot::seed((self.clock)());
        self.save(&seed)?;
        Ok(seed)
    }
}

impl<K: KeyValueStore> SnapshotStorage for KvSnapshotStore<K> {
    fn load(&mut self) -> Result<Snapshot, StorageError> {
        let Some(text) = self.kv.get(STORAGE_KEY)? else {
            return self.first_access();
        };

        let raw: Value = serde_json::from_str(&text)?;
        let (migrated, applied) = migrate::migrate(raw)?;
        let mut snapshot: Snapshot = serde_json::from_value(migrated)?;

        let drifted = snapshot.recount();
        if drifted > 0 {
            log::warn!("Repaired object counters on {} designer(s)", drifted);
        }
        if applied > 0 || drifted > 0 {
            self.save(&snapshot)?;
        }
        Ok(snapshot)
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let mut blob = serde_json::to_value(snapshot)?;
        if let Some(map) = blob.as_object_mut() {
            map.insert("version".into(), Value::from(migrate::CURRENT_VERSION));
        }
        self.kv.set(STORAGE_KEY, &serde_json::to_string(&blob)?)
    }
}

/// Pick the snapshot backend for this target
pub fn open_default(config: &StudioConfig) -> Box<dyn SnapshotStorage> {
    if config.in_memory {
        log::info!("Storage: in memory, nothing is persisted");
        return boxed(KvSnapshotStore::new(MemoryStore::new()), config);
    }

    #[cfg(not(target_arch = "wasm32"))]
    let store = {
        let files = match &config.data_dir {
            Some(dir) => local::FileStore::with_base_dir(dir),
            None => local::FileStore::in_data_dir(),
        };
        log::info!("Storage: files under {}", files.base_dir().display());
        KvSnapshotStore::new(files)
    };

    #[cfg(target_arch = "wasm32")]
    let store = {
        log::info!("Storage: browser localStorage");
        KvSnapshotStore::new(browser::BrowserStore::new())
    };

    boxed(store, config)
}

fn boxed<K: KeyValueStore + 'static>(store: KvSnapshotStore<K>, config: &StudioConfig) -> Box<dyn SnapshotStorage> {
    if config.seed_initial_data {
        Box::new(store)
    } else {
        Box::new(store.without_seed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_clock() -> u64 {
        1_700_000_000_000
    }

    fn store_with(blob: Value) -> KvSnapshotStore<MemoryStore> {
        KvSnapshotStore::new(MemoryStore::with_entry(STORAGE_KEY, &blob.to_string())).with_clock(fixed_clock)
    }

    #[test]
    fn test_in_memory_backend() {
        let config = StudioConfig {
            in_memory: true,
            seed_initial_data: false,
            ..Default::default()
        };
        let mut store = open_default(&config);
        assert_eq!(store.load().unwrap(), Snapshot::default());

        let seed = Snapshot::seed(fixed_clock());
        store.save(&seed).unwrap();
        assert_eq!(store.load().unwrap(), seed);

        // A fresh backend shares nothing with the first
        assert_eq!(open_default(&config).load().unwrap(), Snapshot::default());
    }

    #[test]
    fn test_first_load_seeds_and_persists() {
        let mut store = KvSnapshotStore::new(MemoryStore::new()).with_clock(fixed_clock);
        let snap = store.load().unwrap();
        assert_eq!(snap, Snapshot::seed(fixed_clock()));
        assert_eq!(store.kv().writes(), 1);

        // Second load reads what was written
        let again = store.load().unwrap();
        assert_eq!(again, snap);
        assert_eq!(store.kv().writes(), 1);
    }

    #[test]
    fn test_without_seed_starts_empty() {
        let mut store = KvSnapshotStore::new(MemoryStore::new()).without_seed();
        let snap = store.load().unwrap();
        assert!(snap.designers.is_empty());
        assert_eq!(store.kv().writes(), 0);
    }

    #[test]
    fn test_legacy_blob_migrated_on_load() {
        let mut store = store_with(json!({
            "designers": [
                { "id": "d1", "fullName": "Alice", "workingHours": 6, "attachedObjectsCount": 1 },
                { "id": "d2", "fullName": "Bob", "workingHours": 20, "attachedObjectsCount": 0 }
            ],
            "objects": [
                { "id": "o1", "name": "Cube", "designerId": "d1", "color": "#3b82f6" }
            ]
        }));
        let snap = store.load().unwrap();
        assert_eq!(snap.designers[0].working_hours_from, 9);
        assert_eq!(snap.designers[0].working_hours_to, 15);
        assert_eq!(snap.designers[1].working_hours_to, 23);
        assert_eq!(snap.objects[0].shape, crate::model::Shape::Box);

        // Migrated form was written back with the current version
        let stored: Value = serde_json::from_str(&store.kv().get(STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(migrate::blob_version(&stored), migrate::CURRENT_VERSION);
        assert!(stored["designers"][0].get("workingHours").is_none());
    }

    #[test]
    fn test_save_load_round_trip_is_stable() {
        let mut store = KvSnapshotStore::new(MemoryStore::new()).with_clock(fixed_clock);
        let first = store.load().unwrap();
        store.save(&first).unwrap();
        let stored_once = store.kv().get(STORAGE_KEY).unwrap();

        let second = store.load().unwrap();
        store.save(&second).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.kv().get(STORAGE_KEY).unwrap(), stored_once);
    }

    #[test]
    fn test_counter_drift_repaired_on_load() {
        let mut store = store_with(json!({
            "version": 2,
            "designers": [
                { "id": "d1", "fullName": "Alice", "workingHoursFrom": 9, "workingHoursTo": 17,
                  "attachedObjectsCount": -3 }
            ],
            "objects": [
                { "id": "o1", "name": "Cube", "designerId": "d1", "color": "#3b82f6",
                  "shape": "box", "size": "normal", "position": [0.0, 0.5, 0.0] }
            ]
        }));
        let snap = store.load().unwrap();
        assert_eq!(snap.designers[0].attached_objects_count, 1);
    }

    #[test]
    fn test_corrupt_blob_is_serde_error() {
        let mut store = KvSnapshotStore::new(MemoryStore::with_entry(STORAGE_KEY, "{not json"));
        assert!(matches!(store.load(), Err(StorageError::Serde(_))));
    }
}
