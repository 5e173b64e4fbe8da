//! In-process record store.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, MutexGuard},
};

use super::{Record, RecordStore};
use crate::error::Result;

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<String, String>,
    sequences: HashMap<String, u64>,
}

/// [`RecordStore`] kept entirely in memory.
///
/// Useful for tests and throwaway sessions; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave a map half-written.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()
            .records
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn list(&self, scope: &str) -> Result<Vec<Record>> {
        let inner = self.lock();
        Ok(inner
            .records
            .range(scope.to_string()..)
            .take_while(|(key, _)| key.starts_with(scope))
            .map(|(key, value)| Record {
                key: key.clone(),
                value: value.clone(),
            })
            .collect())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.lock().records.remove(key).is_some())
    }

    fn next_id(&self, sequence: &str) -> Result<u64> {
        let mut inner = self.lock();
        let counter = inner.sequences.entry(sequence.to_string()).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    fn delete_scope(&self, scope: &str) -> Result<usize> {
        let mut inner = self.lock();
        let before = inner.records.len();
        inner.records.retain(|key, _| !key.starts_with(scope));
        Ok(before - inner.records.len())
    }
}
