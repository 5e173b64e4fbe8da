//! Per-user session context.
//!
//! A [`Session`] carries what a front end would otherwise keep in global
//! state: who the user is, which plan is open, which plans were already
//! auto-expanded and whether writes are allowed. Plans owned by someone else
//! are opened read-only.

use std::collections::HashSet;

use crate::{
    engine::{Engine, ExpandOutcome},
    error::{EngineError, Result},
    generator::PlanRequest,
    models::{Plan, ProgressStatus, ProgressSummary, StepMeta},
    params::{CreatePlan, Id, RenamePlan, SetProgress, SetStepMeta, StepRef},
};

/// Plans with fewer steps are regenerated once when opened.
pub const MIN_EXPANDED_STEPS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenPlan {
    id: u64,
    owner_id: String,
}

/// Session state for one user of the engine.
#[derive(Debug, Clone)]
pub struct Session {
    engine: Engine,
    owner_id: String,
    read_only: bool,
    selected: Option<OpenPlan>,
    expanded: HashSet<u64>,
}

impl Session {
    pub fn new(engine: Engine, owner_id: impl Into<String>) -> Self {
        Self {
            engine,
            owner_id: owner_id.into(),
            read_only: false,
            selected: None,
            expanded: HashSet::new(),
        }
    }

    /// Makes every write through this session fail.
    #[must_use]
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// ID of the open plan.
    pub fn selected_plan(&self) -> Option<u64> {
        self.selected.as_ref().map(|open| open.id)
    }

    /// Whether writes to the open plan are refused.
    pub fn is_read_only(&self) -> bool {
        self.read_only
            || self
                .selected
                .as_ref()
                .is_some_and(|open| open.owner_id != self.owner_id)
    }

    fn require_selected(&self) -> Result<u64> {
        self.selected_plan()
            .ok_or_else(|| EngineError::invalid_input("plan").with_reason("No plan is open"))
    }

    fn ensure_writable(&self) -> Result<u64> {
        let plan_id = self.require_selected()?;
        if self.is_read_only() {
            return Err(EngineError::ReadOnly { plan_id });
        }
        Ok(plan_id)
    }

    /// Generates a plan for this session's owner and opens it.
    pub async fn create_plan(&mut self, request: PlanRequest) -> Result<Plan> {
        if self.read_only {
            return Err(EngineError::invalid_input("session")
                .with_reason("Session is read-only; plans cannot be created"));
        }
        let plan = self
            .engine
            .generate_plan(&CreatePlan {
                owner_id: self.owner_id.clone(),
                topic: request.topic,
                level: request.level,
                goals: request.goals,
                goal_mode: request.goal_mode,
                time_per_day: request.time_per_day,
            })
            .await?;
        self.select(&plan);
        Ok(plan)
    }

    /// Opens a plan for viewing.
    ///
    /// A writable plan with fewer than [`MIN_EXPANDED_STEPS`] steps is
    /// expanded the first time it is opened in this session.
    pub async fn open_plan(&mut self, id: u64) -> Result<Plan> {
        let plan = self.select_plan(id).await?;
        if plan.len() >= MIN_EXPANDED_STEPS || self.is_read_only() || !self.expanded.insert(id) {
            return Ok(plan);
        }
        let ExpandOutcome { plan, .. } = self.engine.expand_plan(&Id { id }).await?;
        Ok(plan)
    }

    /// Opens a plan as stored, without expanding it.
    pub async fn select_plan(&mut self, id: u64) -> Result<Plan> {
        let plan = self
            .engine
            .get_plan(&Id { id })
            .await?
            .ok_or(EngineError::PlanNotFound { id })?;
        self.select(&plan);
        Ok(plan)
    }

    fn select(&mut self, plan: &Plan) {
        self.selected = Some(OpenPlan {
            id: plan.id,
            owner_id: plan.owner_id.clone(),
        });
    }

    /// Closes the open plan.
    pub fn close_plan(&mut self) {
        self.selected = None;
    }

    pub async fn rename_plan(&self, topic: &str) -> Result<Plan> {
        let id = self.ensure_writable()?;
        self.engine
            .rename_plan(&RenamePlan {
                id,
                topic: topic.to_string(),
            })
            .await
    }

    /// Deletes the open plan and closes it.
    pub async fn delete_plan(&mut self) -> Result<Plan> {
        let id = self.ensure_writable()?;
        let plan = self.engine.delete_plan(&Id { id }).await?;
        self.selected = None;
        self.expanded.remove(&id);
        Ok(plan)
    }

    /// Regenerates the open plan; see [`Engine::expand_plan`].
    pub async fn expand_plan(&mut self) -> Result<ExpandOutcome> {
        let id = self.ensure_writable()?;
        self.expanded.insert(id);
        self.engine.expand_plan(&Id { id }).await
    }

    /// Drops the cached content of a step of the open plan.
    pub async fn invalidate_artifacts(&self, index: usize) -> Result<usize> {
        let plan_id = self.ensure_writable()?;
        self.engine
            .invalidate_artifacts(&StepRef::new(plan_id, index))
            .await
    }

    pub async fn set_progress(&self, index: usize, status: ProgressStatus) -> Result<ProgressSummary> {
        let plan_id = self.ensure_writable()?;
        self.engine
            .set_progress(&SetProgress {
                step: StepRef::new(plan_id, index),
                status,
            })
            .await
    }

    pub async fn set_step_meta(&self, index: usize, meta: StepMeta) -> Result<StepMeta> {
        let plan_id = self.ensure_writable()?;
        self.engine
            .set_step_meta(&SetStepMeta {
                step: StepRef::new(plan_id, index),
                meta,
            })
            .await
    }
}
