//! Data models for plans, steps and their derived state.
//!
//! This module contains the domain types shared by the engine. Display
//! implementations live in [`crate::display`] so the structures stay free of
//! presentation logic.
//!
//! - [`Plan`] and [`Step`] hold the current plan revision. Steps carry a
//!   stable [`StepId`]; callers address them by index.
//! - [`PlanDraft`] and [`ExerciseSet`] are the typed contracts generator
//!   output is validated against.
//! - [`ProgressStatus`], [`StepMeta`] and [`ArtifactKind`] describe the
//!   per-step state stored next to a plan.
//!
//! # Examples
//!
//! ```rust
//! use synapse_core::models::{GoalMode, Level, ProgressStatus};
//!
//! assert_eq!("exam".parse::<GoalMode>().unwrap(), GoalMode::ExamPrep);
//! assert_eq!("advanced".parse::<Level>().unwrap(), Level::Advanced);
//! assert_eq!("todo".parse::<ProgressStatus>().unwrap(), ProgressStatus::Todo);
//! ```

pub mod artifact;
pub mod exercises;
pub mod meta;
pub mod plan;
pub mod status;
pub mod summary;


pub use artifact::ArtifactKind;
pub use exercises::{
    ExerciseSet, GuidedExercise, QuizQuestion, QuizScore, WordCountCheck, WritingTask,
    QUIZ_OPTIONS,
};
pub use meta::{Agenda, AgendaItem, StepMeta};
pub use plan::{ContentSource, Plan, PlanDraft, PlanHeader, Step, StepDraft, StepId};
pub use status::{GoalMode, Level, ProgressStatus};
pub use summary::{completion_percent, PlanSummary, ProgressSummary};
