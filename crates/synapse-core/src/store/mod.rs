//! Key-value record storage.
//!
//! Everything the engine persists (plans, progress entries, step metadata and
//! cached artifacts) is a JSON text value under a slash-separated key. The
//! [`RecordStore`] trait is the only storage surface the engine needs;
//! [`crate::db::Database`] implements it on SQLite and [`MemoryStore`] keeps
//! records in process memory.
//!
//! Key layout:
//!
//! | Record             | Key                                     |
//! |--------------------|-----------------------------------------|
//! | plan               | `plan/{plan_id}`                        |
//! | progress entry     | `progress/{plan_id}/{step_id}`          |
//! | step metadata      | `meta/{plan_id}/{step_id}`              |
//! | cached artifact    | `artifact/{plan_id}/{step_id}/{kind}`   |
//!
//! Scopes passed to [`RecordStore::list`] are plain key prefixes and always
//! end with `/`, so plan `1` never matches plan `12`.

use crate::{
    error::Result,
    models::{ArtifactKind, StepId},
};

mod memory;

pub use memory::MemoryStore;

/// Sequence used to allocate plan ids.
pub const PLAN_SEQUENCE: &str = "plan";

/// A stored key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub value: String,
}

/// Minimal persistent key-value storage.
///
/// Every method takes `&self`; implementations handle their own interior
/// mutability.
pub trait RecordStore {
    /// Fetches the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Inserts or replaces the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Lists records whose key starts with `scope`, ordered by key.
    fn list(&self, scope: &str) -> Result<Vec<Record>>;

    /// Removes `key`; returns whether a record existed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Returns the next value of a monotonically increasing sequence,
    /// starting at 1.
    fn next_id(&self, sequence: &str) -> Result<u64>;

    /// Removes every record under `scope`; returns how many were removed.
    fn delete_scope(&self, scope: &str) -> Result<usize> {
        let mut removed = 0;
        for record in self.list(scope)? {
            if self.delete(&record.key)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Key construction for every record type.
pub mod keys {
    use super::{ArtifactKind, StepId};

    pub const PLANS: &str = "plan/";

    pub fn plan(plan_id: u64) -> String {
        format!("plan/{plan_id}")
    }

    pub fn progress(plan_id: u64, step: StepId) -> String {
        format!("progress/{plan_id}/{step}")
    }

    pub fn progress_scope(plan_id: u64) -> String {
        format!("progress/{plan_id}/")
    }

    pub fn meta(plan_id: u64, step: StepId) -> String {
        format!("meta/{plan_id}/{step}")
    }

    pub fn meta_scope(plan_id: u64) -> String {
        format!("meta/{plan_id}/")
    }

    pub fn artifact(plan_id: u64, step: StepId, kind: ArtifactKind) -> String {
        format!("artifact/{plan_id}/{step}/{kind}")
    }

    pub fn artifact_step_scope(plan_id: u64, step: StepId) -> String {
        format!("artifact/{plan_id}/{step}/")
    }

    pub fn artifact_scope(plan_id: u64) -> String {
        format!("artifact/{plan_id}/")
    }

    /// Parses the step id out of a `progress/` or `meta/` key.
    pub fn trailing_step_id(key: &str) -> Option<StepId> {
        key.rsplit('/').next()?.parse().ok().map(StepId)
    }
}
