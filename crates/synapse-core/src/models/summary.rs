//! Plan and progress summary types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{GoalMode, Level, Plan};

/// Percentage of done steps, rounded down.
///
/// Returns 0 for a plan without steps and never exceeds 100.
///
/// ```rust
/// use synapse_core::models::completion_percent;
///
/// assert_eq!(completion_percent(0, 0), 0);
/// assert_eq!(completion_percent(1, 3), 33);
/// assert_eq!(completion_percent(3, 3), 100);
/// ```
pub fn completion_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    // done <= total, so the quotient is within 0..=100
    ((done * 100) / total) as u8
}

/// Aggregate of step states for one plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub total: usize,
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
}

impl ProgressSummary {
    pub fn percent(&self) -> u8 {
        completion_percent(self.done, self.total)
    }
}

/// Summary information about a plan with progress statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Topic of the plan
    pub topic: String,
    pub level: Level,
    pub goal_mode: GoalMode,
    /// Owner identifier
    pub owner_id: String,
    /// Whether the content was synthesized locally
    pub fallback: bool,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Step statistics
    pub progress: ProgressSummary,
}

impl PlanSummary {
    /// Create a PlanSummary from a Plan and its progress aggregate
    pub fn from_plan(plan: &Plan, progress: ProgressSummary) -> Self {
        Self {
            id: plan.id,
            topic: plan.topic.clone(),
            level: plan.level,
            goal_mode: plan.goal_mode,
            owner_id: plan.owner_id.clone(),
            fallback: plan.source.is_fallback(),
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            progress,
        }
    }

    pub fn completion_percent(&self) -> u8 {
        self.progress.percent()
    }
}
