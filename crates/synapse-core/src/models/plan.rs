//! Plan and step model definitions.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{GoalMode, Level};
use crate::{
    contract::Contract,
    error::{EngineError, Result},
};

/// Stable identifier of a step within its plan.
///
/// Assigned once when the step enters the plan and never reused, so derived
/// state (progress, metadata, cached artifacts) survives reordering and
/// can be purged precisely when a step is removed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct StepId(pub u32);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single unit of a learning plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Stable identifier within the plan
    pub id: StepId,

    /// Short title shown in lists and concept maps
    pub title: String,

    /// What the learner should be able to do after the step
    #[serde(default)]
    pub objective: String,

    /// Key points covered by the step
    #[serde(default)]
    pub theory_outline: Vec<String>,

    /// Short explanations of the outline points, pitched at the plan level
    #[serde(default)]
    pub theory_explanations: Vec<String>,

    /// Hands-on activities
    #[serde(default)]
    pub practice_tasks: Vec<String>,

    /// Links or kinds of material to consult
    #[serde(default)]
    pub suggested_resources: Vec<String>,
}

/// A step as produced by a generator, before it receives an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StepDraft {
    pub title: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub theory_outline: Vec<String>,
    #[serde(default)]
    pub theory_explanations: Vec<String>,
    #[serde(default)]
    pub practice_tasks: Vec<String>,
    #[serde(default)]
    pub suggested_resources: Vec<String>,
}

impl StepDraft {
    fn into_step(self, id: StepId) -> Step {
        Step {
            id,
            title: self.title,
            objective: self.objective,
            theory_outline: self.theory_outline,
            theory_explanations: self.theory_explanations,
            practice_tasks: self.practice_tasks,
            suggested_resources: self.suggested_resources,
        }
    }
}

/// The structured content of a plan as returned by a generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlanDraft {
    pub overview: String,
    pub steps: Vec<StepDraft>,
    #[serde(default)]
    pub review_strategy: Vec<String>,
}

impl Contract for PlanDraft {
    const NAME: &'static str = "plan";

    fn validate(&self) -> std::result::Result<(), String> {
        if self.overview.trim().is_empty() {
            return Err("overview must not be empty".to_string());
        }
        if self.steps.is_empty() {
            return Err("a plan needs at least one step".to_string());
        }
        if let Some(position) = self.steps.iter().position(|s| s.title.trim().is_empty()) {
            return Err(format!("step {position} has an empty title"));
        }
        Ok(())
    }
}

/// Where a plan's content came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentSource {
    /// Produced by the configured text generator
    #[default]
    Generated,
    /// Synthesized locally; `error` carries the generator failure, if any
    Fallback {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl ContentSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ContentSource::Fallback { .. })
    }
}

/// Represents a complete learning plan with its steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Opaque owner identifier
    pub owner_id: String,

    /// Subject being studied (doubles as the plan's display name)
    pub topic: String,

    pub level: Level,

    /// Free-form learner goals
    #[serde(default)]
    pub goals: Option<String>,

    #[serde(default)]
    pub goal_mode: GoalMode,

    /// Minutes the learner can spend per day
    pub time_per_day: u32,

    pub overview: String,

    pub steps: Vec<Step>,

    #[serde(default)]
    pub review_strategy: Vec<String>,

    #[serde(default)]
    pub source: ContentSource,

    /// Next unused step id
    pub next_step_id: u32,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

/// Fields describing what a new plan is about.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanHeader {
    pub owner_id: String,
    pub topic: String,
    pub level: Level,
    pub goals: Option<String>,
    pub goal_mode: GoalMode,
    pub time_per_day: u32,
}

impl Plan {
    /// Builds a plan from generator output, assigning step ids from zero.
    pub fn from_draft(
        id: u64,
        header: PlanHeader,
        draft: PlanDraft,
        source: ContentSource,
        now: Timestamp,
    ) -> Self {
        let mut plan = Plan {
            id,
            owner_id: header.owner_id,
            topic: header.topic,
            level: header.level,
            goals: header.goals,
            goal_mode: header.goal_mode,
            time_per_day: header.time_per_day,
            overview: String::new(),
            steps: Vec::new(),
            review_strategy: Vec::new(),
            source: ContentSource::Generated,
            next_step_id: 0,
            created_at: now,
            updated_at: now,
        };
        plan.replace_content(draft, source, now);
        plan
    }

    /// Returns the step at `index` or a typed out-of-range error.
    pub fn step_at(&self, index: usize) -> Result<&Step> {
        self.steps
            .get(index)
            .ok_or(EngineError::StepIndexOutOfRange {
                plan_id: self.id,
                index,
                len: self.steps.len(),
            })
    }

    /// Current index of the step with the given id.
    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    /// Replaces overview, steps and review strategy with a new revision.
    ///
    /// New steps get fresh ids. Returns the ids of all steps that were
    /// dropped so their derived state can be purged.
    pub fn replace_content(
        &mut self,
        draft: PlanDraft,
        source: ContentSource,
        now: Timestamp,
    ) -> Vec<StepId> {
        let removed = self.steps.iter().map(|step| step.id).collect();
        let mut steps = Vec::with_capacity(draft.steps.len());
        for step in draft.steps {
            let id = StepId(self.next_step_id);
            self.next_step_id += 1;
            steps.push(step.into_step(id));
        }
        self.overview = draft.overview;
        self.steps = steps;
        self.review_strategy = draft.review_strategy;
        self.source = source;
        self.updated_at = now;
        removed
    }

    /// Number of steps in the current revision.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
