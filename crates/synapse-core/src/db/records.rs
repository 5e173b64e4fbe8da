//! Record CRUD queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    store::{Record, RecordStore},
};

const SELECT_RECORD_SQL: &str = "SELECT value FROM records WHERE key = ?1";
const UPSERT_RECORD_SQL: &str = "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const LIST_RECORDS_SQL: &str =
    "SELECT key, value FROM records WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key";
const DELETE_RECORD_SQL: &str = "DELETE FROM records WHERE key = ?1";
const DELETE_SCOPE_SQL: &str = "DELETE FROM records WHERE substr(key, 1, length(?1)) = ?1";
const NEXT_SEQUENCE_SQL: &str = "INSERT INTO sequences (name, value) VALUES (?1, 1) \
     ON CONFLICT(name) DO UPDATE SET value = value + 1 RETURNING value";

impl RecordStore for super::Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_RECORD_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to load record")
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(UPSERT_RECORD_SQL, params![key, value, now])
            .db_context("Failed to store record")?;
        Ok(())
    }

    fn list(&self, scope: &str) -> Result<Vec<Record>> {
        let mut stmt = self
            .connection
            .prepare_cached(LIST_RECORDS_SQL)
            .db_context("Failed to prepare record listing")?;

        let rows = stmt
            .query_map(params![scope], |row| {
                Ok(Record {
                    key: row.get(0)?,
                    value: row.get(1)?,
                })
            })
            .db_context("Failed to list records")?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read record row")
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let affected = self
            .connection
            .execute(DELETE_RECORD_SQL, params![key])
            .db_context("Failed to delete record")?;
        Ok(affected > 0)
    }

    fn next_id(&self, sequence: &str) -> Result<u64> {
        let value: i64 = self
            .connection
            .query_row(NEXT_SEQUENCE_SQL, params![sequence], |row| row.get(0))
            .db_context("Failed to advance sequence")?;
        Ok(value as u64)
    }

    fn delete_scope(&self, scope: &str) -> Result<usize> {
        self.connection
            .execute(DELETE_SCOPE_SQL, params![scope])
            .db_context("Failed to delete record scope")
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::db::Database;

    #[test]
    fn test_upsert_and_get() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.get("plan/1").unwrap(), None);
        db.set("plan/1", "{}").unwrap();
        db.set("plan/1", r#"{"a":1}"#).unwrap();
        assert_eq!(db.get("plan/1").unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_list_scope_excludes_sibling_prefixes() {
        let db = Database::in_memory().unwrap();
        db.set("artifact/1/0/explain_md", "a").unwrap();
        db.set("artifact/1/0/exercises_json", "b").unwrap();
        db.set("artifact/1/1/explain_md", "c").unwrap();
        db.set("artifact/10/0/explain_md", "d").unwrap();

        let records = db.list("artifact/1/0/").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "artifact/1/0/exercises_json");

        assert_eq!(db.list("artifact/1/").unwrap().len(), 3);
    }

    #[test]
    fn test_like_wildcards_are_literal() {
        let db = Database::in_memory().unwrap();
        db.set("a_b/1", "x").unwrap();
        db.set("axb/1", "y").unwrap();
        assert_eq!(db.list("a_b/").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_and_scope_delete() {
        let db = Database::in_memory().unwrap();
        db.set("progress/2/0", "\"done\"").unwrap();
        db.set("progress/2/1", "\"doing\"").unwrap();
        db.set("progress/3/0", "\"done\"").unwrap();

        assert!(db.delete("progress/3/0").unwrap());
        assert!(!db.delete("progress/3/0").unwrap());
        assert_eq!(db.delete_scope("progress/2/").unwrap(), 2);
        assert!(db.list("progress/").unwrap().is_empty());
    }

    #[test]
    fn test_sequence_persists_across_connections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seq.db");
        {
            let db = Database::new(&path).unwrap();
            assert_eq!(db.next_id("plan").unwrap(), 1);
            assert_eq!(db.next_id("plan").unwrap(), 2);
        }
        let db = Database::new(&path).unwrap();
        assert_eq!(db.next_id("plan").unwrap(), 3);
        assert_eq!(db.next_id("other").unwrap(), 1);
    }
}
