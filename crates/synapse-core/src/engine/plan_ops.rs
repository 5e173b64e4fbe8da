//! Plan operations for the Engine.

use super::Engine;
use crate::{
    error::{EngineError, Result},
    generator::{FallbackReason, Generated, PlanRequest},
    models::{ContentSource, Plan, PlanDraft, PlanSummary},
    params::{CreatePlan, Id, ListPlans, RenamePlan},
    plans::PlanStore,
    progress::ProgressTracker,
};

/// Result of [`Engine::expand_plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandOutcome {
    /// The plan after the operation
    pub plan: Plan,
    /// Whether the regenerated revision replaced the stored one
    pub replaced: bool,
    /// Step count before expansion
    pub previous_len: usize,
}

/// Splits generator output into the draft and the source annotation stored
/// on the plan.
fn into_source(generated: Generated<PlanDraft>) -> (PlanDraft, ContentSource) {
    match generated {
        Generated::Generated(draft) => (draft, ContentSource::Generated),
        Generated::Fallback { content, reason } => {
            let error = match reason {
                FallbackReason::Disabled => None,
                FallbackReason::Failed(message) => Some(message),
            };
            (content, ContentSource::Fallback { error })
        }
    }
}

fn validate_create(params: &CreatePlan) -> Result<()> {
    if params.owner_id.trim().is_empty() {
        return Err(EngineError::invalid_input("owner_id").with_reason("Owner cannot be empty"));
    }
    if params.topic.trim().is_empty() {
        return Err(EngineError::invalid_input("topic").with_reason("Topic cannot be empty"));
    }
    if params.time_per_day == 0 {
        return Err(EngineError::invalid_input("time_per_day")
            .with_reason("Time per day must be at least one minute"));
    }
    Ok(())
}

impl Engine {
    /// Generates and stores a new plan.
    ///
    /// Falls back to local synthesis when the generator is unavailable, so
    /// the result always has at least one step and a non-empty overview.
    pub async fn generate_plan(&self, params: &CreatePlan) -> Result<Plan> {
        validate_create(params)?;
        let header = params.header();
        let request = params.request();
        let generator = self.generator.clone();

        self.with_db(move |db| {
            let (draft, source) = into_source(generator.generate_plan(&request)?);
            PlanStore::new(db).create(header, draft, source)
        })
        .await
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let id = params.id;
        self.with_db(move |db| PlanStore::new(db).get(id)).await
    }

    /// Lists an owner's plans, newest first, with completion statistics.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<PlanSummary>> {
        let owner_id = params.owner_id.clone();
        self.with_db(move |db| {
            let tracker = ProgressTracker::new(db);
            let mut summaries = Vec::new();
            for plan in PlanStore::new(db).list_by_owner(&owner_id)? {
                let progress = tracker.summary(&plan)?;
                summaries.push(PlanSummary::from_plan(&plan, progress));
            }
            Ok(summaries)
        })
        .await
    }

    pub async fn rename_plan(&self, params: &RenamePlan) -> Result<Plan> {
        let id = params.id;
        let topic = params.topic.clone();
        self.with_db(move |db| PlanStore::new(db).rename(id, &topic))
            .await
    }

    /// Deletes a plan together with its progress, step metadata and cached
    /// artifacts. Returns the deleted plan.
    pub async fn delete_plan(&self, params: &Id) -> Result<Plan> {
        let id = params.id;
        self.with_db(move |db| PlanStore::new(db).delete(id)).await
    }

    /// Regenerates the plan from its stored request and keeps the new
    /// revision only if it has more steps.
    ///
    /// Progress, metadata and artifacts of replaced steps are purged.
    pub async fn expand_plan(&self, params: &Id) -> Result<ExpandOutcome> {
        let id = params.id;
        let generator = self.generator.clone();
        self.with_db(move |db| {
            let store = PlanStore::new(db);
            let plan = store.require(id)?;
            let previous_len = plan.len();
            let request = PlanRequest {
                topic: plan.topic.clone(),
                level: plan.level,
                goals: plan.goals.clone(),
                goal_mode: plan.goal_mode,
                time_per_day: plan.time_per_day,
            };
            let (draft, source) = into_source(generator.generate_plan(&request)?);
            if draft.steps.len() <= previous_len {
                log::info!(
                    "Kept plan {id}: regenerated revision has {} steps, current has {previous_len}",
                    draft.steps.len()
                );
                return Ok(ExpandOutcome {
                    plan,
                    replaced: false,
                    previous_len,
                });
            }
            let plan = store.replace_content(id, draft, source)?;
            log::info!("Expanded plan {id} from {previous_len} to {} steps", plan.len());
            Ok(ExpandOutcome {
                plan,
                replaced: true,
                previous_len,
            })
        })
        .await
    }
}
