//! Core library for the Synapse learning content engine.
//!
//! The engine turns a topic into a structured study plan, produces per-step
//! explanations and exercises on demand (cached so each is generated once),
//! tracks learner progress and renders the plan as a concept map.
//!
//! # Layers
//!
//! - **Storage** ([`store`], [`db`]): a keyed record store with a SQLite
//!   implementation and an in-memory one for tests
//! - **Domain** ([`plans`], [`progress`], [`cache`]): plan persistence,
//!   per-step progress and metadata, and the single-flight artifact cache
//! - **Generation** ([`generator`], [`contract`]): an OpenAI-compatible text
//!   generator behind the [`generator::TextGenerator`] trait, output
//!   validation and a deterministic offline fallback
//! - **Concept maps** ([`graph`], [`render`]): layouts and SVG/PNG encoding
//! - **Facade** ([`engine`], [`session`]): the async operation surface and a
//!   per-user session
//! - **Display** ([`display`]): markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use synapse_core::{
//!     generator::PlanRequest,
//!     models::{GoalMode, Level, ProgressStatus},
//!     EngineBuilder, Session,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = EngineBuilder::new()
//!     .with_database_path(Some("synapse.db"))
//!     .build()
//!     .await?;
//!
//! let mut session = Session::new(engine, "local");
//! let plan = session
//!     .create_plan(PlanRequest {
//!         topic: "Probability".to_string(),
//!         level: Level::Beginner,
//!         goals: None,
//!         goal_mode: GoalMode::Balanced,
//!         time_per_day: 30,
//!     })
//!     .await?;
//! println!("{plan}");
//!
//! let summary = session.set_progress(0, ProgressStatus::Done).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod contract;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod generator;
pub mod graph;
pub mod models;
pub mod params;
pub mod plans;
pub mod progress;
pub mod render;
pub mod session;
pub mod store;

pub use config::GeneratorConfig;
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, OperationStatus, PlanAgendas, PlanSummaries, UpdateResult,
};
pub use engine::{
    Artifact, ArtifactOrigin, Engine, EngineBuilder, ExerciseReport, PlanProgress, RenderedMap,
};
pub use error::{EngineError, Result};
pub use generator::{ContentGenerator, Generated, TextGenerator};
pub use models::{Plan, PlanSummary, ProgressStatus, Step};
pub use params::{MapFormat, MapStyle};
pub use session::Session;
