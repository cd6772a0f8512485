//! Main store implementation.
//!
//! The `Store` keeps every record in a single `HashMap` behind one mutex.
//! Operations take the lock only long enough to copy out or insert a whole
//! record, so callers never hold it across serialization or network I/O.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::seq::IteratorRandom;

use crate::error::{StoreError, StoreResult};
use crate::id::IdGenerator;
use crate::models::Fish;

/// In-memory, append-only fish store.
///
/// Invariant: every key equals the `id` of the record stored under it.
#[derive(Debug, Default)]
pub struct Store {
    fishes: Mutex<HashMap<String, Fish>>,
    ids: IdGenerator,
}

impl Store {
    /// Create an empty store using the system clock for identifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a custom identifier generator.
    pub fn with_id_generator(ids: IdGenerator) -> Self {
        Self {
            fishes: Mutex::new(HashMap::new()),
            ids,
        }
    }

    // Values are inserted whole, so a panic elsewhere cannot leave the map
    // half-written and a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Fish>> {
        self.fishes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot every record. Order is unspecified.
    pub fn list_all(&self) -> Vec<Fish> {
        self.lock().values().cloned().collect()
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: &str) -> StoreResult<Fish> {
        self.lock()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Assign a fresh identifier to `candidate`, store it and return the
    /// stored copy. Any identifier already on the candidate is discarded.
    pub fn insert(&self, mut candidate: Fish) -> Fish {
        candidate.id = self.ids.next_id();

        let mut fishes = self.lock();
        // The generator never repeats, but keep the map append-only even so.
        while fishes.contains_key(&candidate.id) {
            candidate.id = self.ids.next_id();
        }
        fishes.insert(candidate.id.clone(), candidate.clone());
        drop(fishes);

        tracing::debug!(id = %candidate.id, "Inserted fish");
        candidate
    }

    /// Pick one identifier uniformly at random.
    pub fn pick_random(&self) -> StoreResult<String> {
        let mut rng = rand::thread_rng();
        self.lock()
            .keys()
            .choose(&mut rng)
            .cloned()
            .ok_or(StoreError::Empty)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
