// ── Generic entity collection ──
//
// Concurrent storage for one record kind. `DashMap` gives O(1) lookups
// without a global lock; an insertion sequence keeps snapshots in the
// order records were added.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::model::{Entity, EntityId};

struct Slot<T> {
    seq: u64,
    record: T,
}

/// Storage for a single entity kind, owned by the [`DataStore`](super::DataStore).
pub struct EntityCollection<T: Entity> {
    by_id: DashMap<EntityId, Slot<T>>,
    next_seq: AtomicU64,
}

impl<T: Entity> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        Self {
            by_id: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Store a record built from `request` under a fresh, unused id.
    pub(crate) fn create(&self, request: T::Create) -> T {
        loop {
            match self.by_id.entry(EntityId::generate()) {
                Entry::Vacant(slot) => {
                    let record = T::from_request(slot.key().clone(), request);
                    slot.insert(Slot {
                        seq: self.bump_seq(),
                        record: record.clone(),
                    });
                    return record;
                }
                Entry::Occupied(_) => {}
            }
        }
    }

    /// Store a record under its own id. Returns `false` if the id is taken.
    pub(crate) fn insert(&self, record: T) -> bool {
        match self.by_id.entry(record.id().clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Slot {
                    seq: self.bump_seq(),
                    record,
                });
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub(crate) fn get(&self, id: &EntityId) -> Option<T> {
        self.by_id.get(id).map(|slot| slot.record.clone())
    }

    /// Shallow-merge `update` into the stored record and return the result.
    pub(crate) fn update(&self, id: &EntityId, update: T::Update) -> Option<T> {
        self.by_id.get_mut(id).map(|mut slot| {
            slot.record.apply(update);
            slot.record.clone()
        })
    }

    /// Returns whether a record was actually removed.
    pub(crate) fn remove(&self, id: &EntityId) -> bool {
        self.by_id.remove(id).is_some()
    }

    /// Copy of every record, in insertion order.
    pub(crate) fn snapshot(&self) -> Vec<T> {
        let mut slots: Vec<(u64, T)> = self
            .by_id
            .iter()
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();
        slots.sort_unstable_by_key(|(seq, _)| *seq);
        slots.into_iter().map(|(_, record)| record).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    fn bump_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Department;
    use crate::requests::{CreateDepartmentRequest, UpdateDepartmentRequest};

    fn request(name: &str) -> CreateDepartmentRequest {
        CreateDepartmentRequest {
            name: name.into(),
            code: name.to_uppercase(),
            description: String::new(),
        }
    }

    #[test]
    fn create_assigns_a_fresh_id() {
        let col: EntityCollection<Department> = EntityCollection::new();
        let a = col.create(request("art"));
        let b = col.create(request("bio"));
        assert_ne!(a.id, b.id);
        assert_eq!(col.get(&a.id).unwrap().name, "art");
    }

    #[test]
    fn insert_rejects_a_taken_id() {
        let col: EntityCollection<Department> = EntityCollection::new();
        let dept = Department::from_request(EntityId::from("1"), request("art"));
        assert!(col.insert(dept.clone()));
        assert!(!col.insert(dept));
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn snapshot_keeps_insertion_order() {
        let col: EntityCollection<Department> = EntityCollection::new();
        for name in ["zoology", "art", "music", "botany", "chemistry"] {
            col.create(request(name));
        }
        let names: Vec<String> = col.snapshot().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["zoology", "art", "music", "botany", "chemistry"]);
    }

    #[test]
    fn update_touches_only_given_fields() {
        let col: EntityCollection<Department> = EntityCollection::new();
        let dept = col.create(request("art"));
        let updated = col
            .update(
                &dept.id,
                UpdateDepartmentRequest {
                    description: Some("Fine arts".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "art");
        assert_eq!(updated.description, "Fine arts");
    }

    #[test]
    fn update_and_remove_of_missing_id() {
        let col: EntityCollection<Department> = EntityCollection::new();
        let missing = EntityId::from("nope");
        assert!(col.update(&missing, UpdateDepartmentRequest::default()).is_none());
        assert!(!col.remove(&missing));
    }
}
