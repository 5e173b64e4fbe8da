use synapse_core::{Engine, EngineBuilder};
use tempfile::TempDir;

/// Helper function to create an offline test engine
pub async fn create_test_engine() -> (TempDir, Engine) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let engine = open_engine(&temp_dir).await;
    (temp_dir, engine)
}

/// Opens another engine over the database in `temp_dir`.
pub async fn open_engine(temp_dir: &TempDir) -> Engine {
    EngineBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .expect("Failed to create engine")
}
