//! Read-through artifact cache.
//!
//! Each (plan, step, kind) artifact is produced at most once and then served
//! from the record store until it is explicitly invalidated. Concurrent
//! requests for the same key inside one process are serialized on a per-key
//! lock, so the producer runs once even when several callers miss together.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    error::Result,
    models::StepId,
    store::{keys, RecordStore},
};

/// Table of per-key locks shared by every cache handle of an engine.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn acquire(&self, key: &str) -> Arc<Mutex<()>> {
        self.table()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn release(&self, key: &str, lock: Arc<Mutex<()>>) {
        let mut table = self.table();
        // Handles are only cloned under the table lock: the table's own
        // handle plus ours means nobody else is waiting.
        if Arc::strong_count(&lock) == 2 {
            table.remove(key);
        }
    }

    /// Number of keys with a live lock.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache handle over a record store.
pub struct ArtifactCache<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    locks: &'a KeyLocks,
}

impl<'a, S: RecordStore + ?Sized> ArtifactCache<'a, S> {
    pub fn new(store: &'a S, locks: &'a KeyLocks) -> Self {
        Self { store, locks }
    }

    /// Returns the cached payload without producing anything.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.store.get(key)
    }

    /// Returns the payload under `key`, producing and storing it on a miss.
    ///
    /// `producer` runs at most once per key while the entry exists. If it
    /// fails, nothing is stored and the error is returned.
    pub fn get_or_create<F>(&self, key: &str, producer: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(hit) = self.store.get(key)? {
            log::debug!("Artifact cache hit for {key}");
            return Ok(hit);
        }

        let lock = self.locks.acquire(key);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.fill(key, producer)
        };
        self.locks.release(key, lock);
        result
    }

    fn fill<F>(&self, key: &str, producer: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        // Another caller may have filled the entry while we waited.
        if let Some(hit) = self.store.get(key)? {
            log::debug!("Artifact cache hit for {key} after waiting");
            return Ok(hit);
        }
        log::debug!("Artifact cache miss for {key}");
        let payload = producer()?;
        self.store.set(key, &payload)?;
        Ok(payload)
    }

    /// Drops every cached artifact of one step.
    pub fn invalidate(&self, plan_id: u64, step: StepId) -> Result<usize> {
        let removed = self
            .store
            .delete_scope(&keys::artifact_step_scope(plan_id, step))?;
        log::debug!("Invalidated {removed} artifacts for plan {plan_id} step {step}");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread,
        time::Duration,
    };

    use super::*;
    use crate::{error::EngineError, models::ArtifactKind, store::MemoryStore};

    #[test]
    fn test_producer_runs_once() {
        let store = MemoryStore::new();
        let locks = KeyLocks::new();
        let cache = ArtifactCache::new(&store, &locks);
        let key = keys::artifact(1, StepId(0), ArtifactKind::Explanation);
        let calls = AtomicUsize::new(0);

        let produce = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok("# Explanation".to_string())
        };
        let first = cache.get_or_create(&key, produce).unwrap();
        let second = cache.get_or_create(&key, produce).unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_producer_error_caches_nothing() {
        let store = MemoryStore::new();
        let locks = KeyLocks::new();
        let cache = ArtifactCache::new(&store, &locks);
        let key = keys::artifact(1, StepId(0), ArtifactKind::Exercises);

        let failed = cache.get_or_create(&key, || {
            Err(EngineError::invalid_input("payload").with_reason("bad"))
        });
        assert!(failed.is_err());
        assert_eq!(cache.get(&key).unwrap(), None);

        let ok = cache.get_or_create(&key, || Ok("{}".to_string())).unwrap();
        assert_eq!(ok, "{}");
    }

    #[test]
    fn test_concurrent_callers_share_one_production() {
        let store = MemoryStore::new();
        let locks = KeyLocks::new();
        let key = keys::artifact(4, StepId(2), ArtifactKind::Explanation);
        let calls = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let cache = ArtifactCache::new(&store, &locks);
                    cache
                        .get_or_create(&key, || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(20));
                            Ok("shared".to_string())
                        })
                        .unwrap()
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("shared"));
    }

    #[test]
    fn test_invalidate_forces_regeneration() {
        let store = MemoryStore::new();
        let locks = KeyLocks::new();
        let cache = ArtifactCache::new(&store, &locks);
        let explain = keys::artifact(1, StepId(3), ArtifactKind::Explanation);
        let exercises = keys::artifact(1, StepId(3), ArtifactKind::Exercises);
        let other = keys::artifact(1, StepId(4), ArtifactKind::Explanation);
        for key in [&explain, &exercises, &other] {
            cache.get_or_create(key, || Ok("v1".to_string())).unwrap();
        }

        assert_eq!(cache.invalidate(1, StepId(3)).unwrap(), 2);
        let regenerated = cache
            .get_or_create(&explain, || Ok("v2".to_string()))
            .unwrap();
        assert_eq!(regenerated, "v2");
        assert_eq!(cache.get(&other).unwrap().as_deref(), Some("v1"));
    }
}
