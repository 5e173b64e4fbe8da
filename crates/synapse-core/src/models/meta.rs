//! Per-step scheduling metadata and the daily agenda.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Learner-managed notes and due date for a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StepMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(default)]
    pub notes: String,
}

/// A step that shows up on the agenda.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgendaItem {
    /// Current zero-based index of the step
    pub index: usize,
    pub title: String,
    pub due_date: Date,
}

/// Unfinished steps due today or already past due.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agenda {
    pub today: Date,
    pub due_today: Vec<AgendaItem>,
    pub overdue: Vec<AgendaItem>,
}

impl Agenda {
    pub fn is_empty(&self) -> bool {
        self.due_today.is_empty() && self.overdue.is_empty()
    }
}
