//! Async facade over the learning content engine.
//!
//! [`Engine`] is the public operation surface. Every operation opens its own
//! SQLite connection inside [`tokio::task::spawn_blocking`], because both the
//! database and the text generator block. The generator adapter and the
//! artifact cache's per-key lock table are shared across calls.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Engine      │    │  PlanStore,     │    │    Database     │
//! │  (plan_ops,     │───▶│  ArtifactCache, │───▶│  (RecordStore)  │
//! │   content_ops,  │    │  ProgressTracker│    │                 │
//! │   progress_ops, │    └─────────────────┘    └─────────────────┘
//! │   map_ops)      │───▶ ContentGenerator ───▶ TextGenerator
//! └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use synapse_core::{
//!     models::{GoalMode, Level},
//!     params::{CreatePlan, StepRef},
//!     EngineBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = EngineBuilder::new()
//!     .with_database_path(Some("/tmp/synapse.db"))
//!     .build()
//!     .await?;
//!
//! let plan = engine
//!     .generate_plan(&CreatePlan {
//!         owner_id: "local".to_string(),
//!         topic: "Graph theory".to_string(),
//!         level: Level::Beginner,
//!         goals: None,
//!         goal_mode: GoalMode::Balanced,
//!         time_per_day: 30,
//!     })
//!     .await?;
//!
//! let explanation = engine.explain_step(&StepRef::new(plan.id, 0)).await?;
//! println!("{}", explanation.content);
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    cache::KeyLocks,
    db::Database,
    error::{EngineError, Result},
    generator::ContentGenerator,
};

pub mod builder;
pub mod content_ops;
pub mod map_ops;
pub mod plan_ops;
pub mod progress_ops;


pub use builder::EngineBuilder;
pub use content_ops::{Artifact, ArtifactOrigin, ExerciseReport};
pub use map_ops::RenderedMap;
pub use plan_ops::ExpandOutcome;
pub use progress_ops::PlanProgress;

/// Main engine interface.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) db_path: PathBuf,
    pub(crate) generator: Arc<ContentGenerator>,
    pub(crate) locks: Arc<KeyLocks>,
}

impl Engine {
    pub(crate) fn new(db_path: PathBuf, generator: ContentGenerator) -> Self {
        Self {
            db_path,
            generator: Arc::new(generator),
            locks: Arc::new(KeyLocks::new()),
        }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Whether an external text generator is configured.
    pub fn has_generator(&self) -> bool {
        self.generator.has_backend()
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            op(&db)
        })
        .await
        .map_err(EngineError::join)?
    }
}
