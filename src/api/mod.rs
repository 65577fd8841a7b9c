//! In-process data access
//!
//! Every operation loads the snapshot, mutates it, keeps each designer's
//! `attached_objects_count` in step and writes the snapshot back once. There
//! is no validation here; forms do that before a request is ever made.
//!
//! `request` wraps these operations in a latency-simulating queue.

pub mod request;

pub use request::{Request, RequestId, RequestQueue, Response};

use crate::model::{AppObject, Designer, DesignerPatch, InsertDesigner, InsertObject, ObjectPatch, Snapshot};
use crate::storage::{SnapshotStorage, StorageError};
use thiserror::Error;

/// Length of generated record ids
pub const ID_LEN: usize = 9;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    fn designer(id: &str) -> Self {
        ApiError::NotFound {
            entity: "Designer",
            id: id.to_string(),
        }
    }

    fn object(id: &str) -> Self {
        ApiError::NotFound {
            entity: "Object",
            id: id.to_string(),
        }
    }
}

/// Milliseconds since the Unix epoch (works on WASM, unlike `SystemTime`)
pub fn now_ms() -> u64 {
    (macroquad::miniquad::date::now() * 1000.0) as u64
}

/// Random id of `ID_LEN` base-36 characters
pub fn random_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..ID_LEN)
        .map(|_| {
            // Use macroquad's rand which works in WASM
            let i = macroquad::rand::gen_range(0, ALPHABET.len());
            ALPHABET[i] as char
        })
        .collect()
}

/// Designer/object operations over an injected snapshot store
pub struct DataAccess {
    storage: Box<dyn SnapshotStorage>,
    next_id: fn() -> String,
    clock: fn() -> u64,
}

impl DataAccess {
    pub fn new(storage: Box<dyn SnapshotStorage>) -> Self {
        Self {
            storage,
            next_id: random_id,
            clock: now_ms,
        }
    }

    #[cfg(test)]
    pub fn with_ids(mut self, next_id: fn() -> String) -> Self {
        self.next_id = next_id;
        self
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    /// Load, mutate, save. The closure's result is returned only if the
    /// save succeeded.
    fn write<T>(&mut self, f: impl FnOnce(&mut Snapshot) -> Result<T, ApiError>) -> Result<T, ApiError> {
        let mut snapshot = self.storage.load()?;
        let result = f(&mut snapshot)?;
        self.storage.save(&snapshot)?;
        Ok(result)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Designers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn list_designers(&mut self) -> Result<Vec<Designer>, ApiError> {
        Ok(self.storage.load()?.designers)
    }

    pub fn create_designer(&mut self, data: InsertDesigner) -> Result<Designer, ApiError> {
        let designer = Designer {
            id: (self.next_id)(),
            full_name: data.full_name,
            working_hours_from: data.working_hours_from,
            working_hours_to: data.working_hours_to,
            attached_objects_count: 0,
            created_at: (self.clock)(),
        };
        log::debug!("create designer {} ({})", designer.id, designer.full_name);
        self.write(|snap| {
            snap.designers.push(designer.clone());
            Ok(designer)
        })
    }

    pub fn update_designer(&mut self, id: &str, patch: &DesignerPatch) -> Result<Designer, ApiError> {
        log::debug!("update designer {}", id);
        self.write(|snap| {
            let designer = snap.designer_mut(id).ok_or_else(|| ApiError::designer(id))?;
            designer.apply(patch);
            Ok(designer.clone())
        })
    }

    /// Delete a designer and every object it owns
    pub fn delete_designer(&mut self, id: &str) -> Result<(), ApiError> {
        self.write(|snap| {
            let index = snap
                .designers
                .iter()
                .position(|d| d.id == id)
                .ok_or_else(|| ApiError::designer(id))?;
            snap.designers.remove(index);

            let before = snap.objects.len();
            snap.objects.retain(|o| o.designer_id != id);
            log::debug!("delete designer {} (cascaded {} objects)", id, before - snap.objects.len());
            Ok(())
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Objects
    // ─────────────────────────────────────────────────────────────────────────

    pub fn list_objects(&mut self) -> Result<Vec<AppObject>, ApiError> {
        Ok(self.storage.load()?.objects)
    }

    pub fn create_object(&mut self, data: InsertObject) -> Result<AppObject, ApiError> {
        let object = AppObject {
            id: (self.next_id)(),
            name: data.name,
            designer_id: data.designer_id,
            color: data.color,
            shape: data.shape,
            size: data.size,
            position: data.position,
            created_at: (self.clock)(),
        };
        log::debug!("create object {} for designer {}", object.id, object.designer_id);
        self.write(|snap| {
            snap.objects.push(object.clone());
            if let Some(owner) = snap.designer_mut(&object.designer_id) {
                owner.attached_objects_count += 1;
            }
            Ok(object)
        })
    }

    pub fn update_object(&mut self, id: &str, patch: &ObjectPatch) -> Result<AppObject, ApiError> {
        log::debug!("update object {}", id);
        self.write(|snap| {
            let object = snap
                .objects
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| ApiError::object(id))?;
            let previous_owner = object.designer_id.clone();
            object.apply(patch);
            let updated = object.clone();

            if updated.designer_id != previous_owner {
                if let Some(old) = snap.designer_mut(&previous_owner) {
                    old.attached_objects_count = old.attached_objects_count.saturating_sub(1);
                }
                if let Some(new) = snap.designer_mut(&updated.designer_id) {
                    new.attached_objects_count += 1;
                }
            }
            Ok(updated)
        })
    }

    pub fn delete_object(&mut self, id: &str) -> Result<(), ApiError> {
        log::debug!("delete object {}", id);
        self.write(|snap| {
            let index = snap
                .objects
                .iter()
                .position(|o| o.id == id)
                .ok_or_else(|| ApiError::object(id))?;
            let removed = snap.objects.remove(index);
            if let Some(owner) = snap.designer_mut(&removed.designer_id) {
                owner.attached_objects_count = owner.attached_objects_count.saturating_sub(1);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Shape, SizeClass, DEFAULT_COLOR};
    use crate::storage::{KvSnapshotStore, MemoryStore};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT: AtomicUsize = AtomicUsize::new(0);

    fn sequential_id() -> String {
        format!("t{}", NEXT.fetch_add(1, Ordering::SeqCst))
    }

    fn zero_clock() -> u64 {
        0
    }

    /// Data access over the seeded in-memory store
    pub(crate) fn seeded() -> DataAccess {
        DataAccess::new(Box::new(KvSnapshotStore::new(MemoryStore::new()).with_clock(zero_clock)))
            .with_ids(sequential_id)
            .with_clock(zero_clock)
    }

    pub(crate) fn insert_object(name: &str, designer_id: &str) -> InsertObject {
        InsertObject {
            name: name.into(),
            designer_id: designer_id.into(),
            color: DEFAULT_COLOR.into(),
            shape: Shape::Box,
            size: SizeClass::Normal,
            position: [0.0, 0.5, 0.0],
        }
    }

    /// Keeps the snapshot exactly as saved: no migration, no counter repair
    struct RawStore(Rc<RefCell<Snapshot>>);

    impl SnapshotStorage for RawStore {
        fn load(&mut self) -> Result<Snapshot, StorageError> {
            Ok(self.0.borrow().clone())
        }

        fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
            *self.0.borrow_mut() = snapshot.clone();
            Ok(())
        }
    }

    /// Seeded data access whose stored counters are only ever touched by
    /// the operations themselves
    fn unrepaired() -> (DataAccess, Rc<RefCell<Snapshot>>) {
        let stored = Rc::new(RefCell::new(Snapshot::seed(0)));
        let api = DataAccess::new(Box::new(RawStore(Rc::clone(&stored))))
            .with_ids(sequential_id)
            .with_clock(zero_clock);
        (api, stored)
    }

    fn assert_counts_consistent(stored: &RefCell<Snapshot>) {
        let snap = stored.borrow();
        for d in &snap.designers {
            let live = snap.objects.iter().filter(|o| o.designer_id == d.id).count() as u32;
            assert_eq!(d.attached_objects_count, live, "designer {}", d.id);
        }
        assert_eq!(snap.clone().recount(), 0);
    }

    fn count_of(stored: &RefCell<Snapshot>, designer_id: &str) -> u32 {
        stored
            .borrow()
            .designers
            .iter()
            .find(|d| d.id == designer_id)
            .map(|d| d.attached_objects_count)
            .unwrap()
    }

    #[test]
    fn test_random_id_shape() {
        let id = random_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_create_designer_starts_at_zero() {
        let mut api = seeded();
        let d = api
            .create_designer(InsertDesigner {
                full_name: "Carol Danvers".into(),
                working_hours_from: 10,
                working_hours_to: 18,
            })
            .unwrap();
        assert_eq!(d.attached_objects_count, 0);
        assert_eq!(api.list_designers().unwrap().len(), 3);
    }

    #[test]
    fn test_object_create_increments_owner() {
        let (mut api, stored) = unrepaired();
        api.create_object(insert_object("Crate", "d2")).unwrap();
        assert_eq!(count_of(&stored, "d2"), 2);
        assert_counts_consistent(&stored);
    }

    #[test]
    fn test_object_for_unknown_designer_is_stored() {
        let (mut api, stored) = unrepaired();
        let obj = api.create_object(insert_object("Orphan", "nobody")).unwrap();
        assert!(api.list_objects().unwrap().iter().any(|o| o.id == obj.id));
        assert_eq!(count_of(&stored, "d1"), 2);
        assert_eq!(count_of(&stored, "d2"), 1);
    }

    #[test]
    fn test_reassign_moves_count() {
        let (mut api, stored) = unrepaired();
        api.update_object(
            "o1",
            &ObjectPatch {
                designer_id: Some("d2".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(count_of(&stored, "d1"), 1);
        assert_eq!(count_of(&stored, "d2"), 2);
    }

    #[test]
    fn test_position_update_keeps_counts() {
        let (mut api, stored) = unrepaired();
        let moved = api.update_object("o2", &ObjectPatch::position([3.0, 0.3, 1.0])).unwrap();
        assert_eq!(moved.position, [3.0, 0.3, 1.0]);
        assert_eq!(count_of(&stored, "d1"), 2);
        assert_counts_consistent(&stored);
    }

    #[test]
    fn test_delete_designer_cascades_exactly() {
        let (mut api, stored) = unrepaired();
        api.create_object(insert_object("Extra", "d2")).unwrap();
        api.delete_designer("d1").unwrap();

        let objects = api.list_objects().unwrap();
        assert!(objects.iter().all(|o| o.designer_id != "d1"));
        assert_eq!(objects.len(), 2);
        assert_eq!(api.list_designers().unwrap().len(), 1);
        assert_counts_consistent(&stored);
    }

    #[test]
    fn test_delete_object_decrements_owner() {
        let (mut api, stored) = unrepaired();
        api.delete_object("o1").unwrap();
        assert_eq!(count_of(&stored, "d1"), 1);
        assert_counts_consistent(&stored);
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let mut api = seeded();
        assert!(matches!(
            api.update_designer("nope", &DesignerPatch::default()),
            Err(ApiError::NotFound { entity: "Designer", .. })
        ));
        assert!(matches!(api.delete_designer("nope"), Err(ApiError::NotFound { .. })));
        assert!(matches!(
            api.update_object("nope", &ObjectPatch::default()),
            Err(ApiError::NotFound { entity: "Object", .. })
        ));
        let err = api.delete_object("nope").unwrap_err();
        assert_eq!(err.to_string(), "Object not found: nope");
    }

    #[test]
    fn test_counts_hold_over_mutation_sequence() {
        let (mut api, stored) = unrepaired();
        let owners = ["d1", "d2"];
        let mut state: u32 = 12345;
        let mut step = || {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (state >> 16) as usize
        };

        for i in 0..60 {
            let objects = api.list_objects().unwrap();
            match step() % 3 {
                0 => {
                    let owner = owners[step() % owners.len()];
                    api.create_object(insert_object(&format!("obj {}", i), owner)).unwrap();
                }
                1 if !objects.is_empty() => {
                    let target = &objects[step() % objects.len()];
                    let owner = owners[step() % owners.len()];
                    api.update_object(
                        &target.id,
                        &ObjectPatch {
                            designer_id: Some(owner.into()),
                            ..Default::default()
                        },
                    )
                    .unwrap();
                }
                2 if !objects.is_empty() => {
                    let target = &objects[step() % objects.len()];
                    api.delete_object(&target.id).unwrap();
                }
                _ => {}
            }
            assert_counts_consistent(&stored);
        }
    }
}
