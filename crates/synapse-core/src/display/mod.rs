//! Markdown formatting for engine results.
//!
//! Domain models implement `Display` directly (see [`models`]); collections and
//! operation outcomes get newtype wrappers so front ends can print any result
//! with `{}` and hand the markdown to a renderer.
//!
//! - [`collections`]: wrappers for lists (plan summaries, agendas)
//! - [`results`]: create/update/delete outcomes, generated artifacts and
//!   status messages
//! - [`datetime`]: timestamp and due-date formatting
//! - [`models`]: `Display` implementations for domain models
//!
//! # Example
//!
//! ```rust
//! use synapse_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Marked step 3 as done");
//! assert!(status.to_string().starts_with("✓"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{PlanAgendas, PlanSummaries};
pub use datetime::{DueDate, LocalDateTime};
pub use results::{CreateResult, DeleteResult, OperationStatus, UpdateResult};
