//! Progress and scheduling operations for the Engine.

use std::collections::BTreeMap;

use super::Engine;
use crate::{
    error::Result,
    models::{Agenda, Plan, ProgressStatus, ProgressSummary, StepMeta},
    params::{AgendaQuery, Id, SetProgress, SetStepMeta, StepRef},
    plans::PlanStore,
    progress::{summarize, ProgressTracker},
};

/// A plan with the status of every step.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanProgress {
    pub plan: Plan,
    /// One status per step, in plan order
    pub statuses: Vec<ProgressStatus>,
    pub summary: ProgressSummary,
}

impl Engine {
    /// Records the status of one step.
    pub async fn set_progress(&self, params: &SetProgress) -> Result<ProgressSummary> {
        let StepRef { plan_id, index } = params.step;
        let status = params.status;
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            let tracker = ProgressTracker::new(db);
            tracker.set(&plan, index, status)?;
            log::debug!("Plan {plan_id} step {index} is now {status}");
            tracker.summary(&plan)
        })
        .await
    }

    /// Explicitly recorded statuses keyed by step index.
    pub async fn progress_map(&self, params: &Id) -> Result<BTreeMap<usize, ProgressStatus>> {
        let plan_id = params.id;
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            ProgressTracker::new(db).progress_map(&plan)
        })
        .await
    }

    pub async fn progress_summary(&self, params: &Id) -> Result<ProgressSummary> {
        let plan_id = params.id;
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            ProgressTracker::new(db).summary(&plan)
        })
        .await
    }

    /// Loads a plan together with the status of each of its steps.
    pub async fn plan_progress(&self, params: &Id) -> Result<PlanProgress> {
        let plan_id = params.id;
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            let statuses = ProgressTracker::new(db).statuses(&plan)?;
            let summary = summarize(&statuses);
            Ok(PlanProgress {
                plan,
                statuses,
                summary,
            })
        })
        .await
    }

    pub async fn step_meta(&self, step: &StepRef) -> Result<StepMeta> {
        let StepRef { plan_id, index } = *step;
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            ProgressTracker::new(db).meta(&plan, index)
        })
        .await
    }

    /// Replaces a step's due date and notes.
    pub async fn set_step_meta(&self, params: &SetStepMeta) -> Result<StepMeta> {
        let StepRef { plan_id, index } = params.step;
        let meta = params.meta.clone();
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            ProgressTracker::new(db).set_meta(&plan, index, &meta)?;
            Ok(meta)
        })
        .await
    }

    /// Unfinished steps of a plan that are due today or overdue.
    pub async fn agenda(&self, params: &AgendaQuery) -> Result<Agenda> {
        let plan_id = params.plan_id;
        let today = params.today;
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            ProgressTracker::new(db).agenda(&plan, today)
        })
        .await
    }
}
