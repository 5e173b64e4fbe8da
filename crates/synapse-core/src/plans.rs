//! Plan persistence on top of a [`RecordStore`].

use jiff::Timestamp;

use crate::{
    error::{EngineError, Result},
    models::{ContentSource, Plan, PlanDraft, PlanHeader, StepId},
    store::{keys, RecordStore, PLAN_SEQUENCE},
};

/// Repository for plans and the per-step state hanging off them.
pub struct PlanStore<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> PlanStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Allocates an id and persists a plan built from `draft`.
    pub fn create(&self, header: PlanHeader, draft: PlanDraft, source: ContentSource) -> Result<Plan> {
        let id = self.store.next_id(PLAN_SEQUENCE)?;
        let plan = Plan::from_draft(id, header, draft, source, Timestamp::now());
        self.save(&plan)?;
        log::info!(
            "Created plan {} '{}' with {} steps",
            plan.id,
            plan.topic,
            plan.steps.len()
        );
        Ok(plan)
    }

    pub fn get(&self, id: u64) -> Result<Option<Plan>> {
        match self.store.get(&keys::plan(id))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Loads a plan or fails with [`EngineError::PlanNotFound`].
    pub fn require(&self, id: u64) -> Result<Plan> {
        self.get(id)?.ok_or(EngineError::PlanNotFound { id })
    }

    /// Plans owned by `owner_id`, newest first.
    pub fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Plan>> {
        let mut plans = Vec::new();
        for record in self.store.list(keys::PLANS)? {
            let plan: Plan = serde_json::from_str(&record.value)?;
            if plan.owner_id == owner_id {
                plans.push(plan);
            }
        }
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(plans)
    }

    pub fn save(&self, plan: &Plan) -> Result<()> {
        let raw = serde_json::to_string(plan)?;
        self.store.set(&keys::plan(plan.id), &raw)
    }

    /// Changes the plan's topic (its display name).
    pub fn rename(&self, id: u64, topic: &str) -> Result<Plan> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(EngineError::invalid_input("topic").with_reason("Topic cannot be empty"));
        }
        let mut plan = self.require(id)?;
        plan.topic = topic.to_string();
        plan.updated_at = Timestamp::now();
        self.save(&plan)?;
        Ok(plan)
    }

    /// Swaps in a new plan revision and purges state of the removed steps.
    pub fn replace_content(
        &self,
        id: u64,
        draft: PlanDraft,
        source: ContentSource,
    ) -> Result<Plan> {
        let mut plan = self.require(id)?;
        let removed = plan.replace_content(draft, source, Timestamp::now());
        self.save(&plan)?;
        for step in removed {
            self.purge_step(id, step)?;
        }
        Ok(plan)
    }

    /// Deletes the plan with its progress, metadata and cached artifacts.
    ///
    /// Returns the deleted plan.
    pub fn delete(&self, id: u64) -> Result<Plan> {
        let plan = self.require(id)?;
        let progress = self.store.delete_scope(&keys::progress_scope(id))?;
        let meta = self.store.delete_scope(&keys::meta_scope(id))?;
        let artifacts = self.store.delete_scope(&keys::artifact_scope(id))?;
        self.store.delete(&keys::plan(id))?;
        log::info!(
            "Deleted plan {id} ({progress} progress entries, {meta} metadata entries, {artifacts} artifacts)"
        );
        Ok(plan)
    }

    fn purge_step(&self, plan_id: u64, step: StepId) -> Result<()> {
        self.store.delete(&keys::progress(plan_id, step))?;
        self.store.delete(&keys::meta(plan_id, step))?;
        self.store
            .delete_scope(&keys::artifact_step_scope(plan_id, step))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{GoalMode, Level, StepDraft},
        store::MemoryStore,
    };

    fn header(owner: &str, topic: &str) -> PlanHeader {
        PlanHeader {
            owner_id: owner.to_string(),
            topic: topic.to_string(),
            level: Level::Intermediate,
            goals: Some("pass the exam".to_string()),
            goal_mode: GoalMode::ExamPrep,
            time_per_day: 45,
        }
    }

    fn draft(n: usize) -> PlanDraft {
        PlanDraft {
            overview: "Overview".to_string(),
            steps: (0..n)
                .map(|i| StepDraft {
                    title: format!("Step {i}"),
                    ..StepDraft::default()
                })
                .collect(),
            review_strategy: vec![],
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = MemoryStore::new();
        let plans = PlanStore::new(&store);
        let plan = plans
            .create(header("alice", "Hegel"), draft(3), ContentSource::Generated)
            .unwrap();
        assert_eq!(plan.id, 1);
        assert_eq!(plans.require(1).unwrap(), plan);
        assert!(plans.get(2).unwrap().is_none());
        assert!(matches!(
            plans.require(2),
            Err(EngineError::PlanNotFound { id: 2 })
        ));
    }

    #[test]
    fn test_list_by_owner_newest_first() {
        let store = MemoryStore::new();
        let plans = PlanStore::new(&store);
        plans
            .create(header("alice", "First"), draft(1), ContentSource::Generated)
            .unwrap();
        plans
            .create(header("bob", "Other"), draft(1), ContentSource::Generated)
            .unwrap();
        plans
            .create(header("alice", "Second"), draft(1), ContentSource::Generated)
            .unwrap();

        let topics: Vec<String> = plans
            .list_by_owner("alice")
            .unwrap()
            .into_iter()
            .map(|p| p.topic)
            .collect();
        assert_eq!(topics, vec!["Second", "First"]);
        assert!(plans.list_by_owner("carol").unwrap().is_empty());
    }

    #[test]
    fn test_rename_rejects_blank_topic() {
        let store = MemoryStore::new();
        let plans = PlanStore::new(&store);
        let plan = plans
            .create(header("alice", "Old"), draft(1), ContentSource::Generated)
            .unwrap();
        assert!(plans.rename(plan.id, "   ").is_err());
        let renamed = plans.rename(plan.id, "  New name ").unwrap();
        assert_eq!(renamed.topic, "New name");
        assert_eq!(plans.require(plan.id).unwrap().topic, "New name");
    }

    #[test]
    fn test_delete_cascades_to_step_state() {
        let store = MemoryStore::new();
        let plans = PlanStore::new(&store);
        let keep = plans
            .create(header("alice", "Keep"), draft(1), ContentSource::Generated)
            .unwrap();
        let doomed = plans
            .create(header("alice", "Doomed"), draft(2), ContentSource::Generated)
            .unwrap();
        store
            .set(&keys::progress(doomed.id, StepId(0)), "\"done\"")
            .unwrap();
        store.set(&keys::meta(doomed.id, StepId(1)), "{}").unwrap();
        store
            .set(
                &keys::artifact(doomed.id, StepId(0), crate::models::ArtifactKind::Explanation),
                "text",
            )
            .unwrap();
        store
            .set(&keys::progress(keep.id, StepId(0)), "\"doing\"")
            .unwrap();

        plans.delete(doomed.id).unwrap();

        assert!(plans.get(doomed.id).unwrap().is_none());
        // only the surviving plan and its progress entry remain
        assert_eq!(store.len(), 2);
        assert!(matches!(
            plans.delete(doomed.id),
            Err(EngineError::PlanNotFound { .. })
        ));
    }

    #[test]
    fn test_replace_content_purges_removed_steps() {
        let store = MemoryStore::new();
        let plans = PlanStore::new(&store);
        let plan = plans
            .create(header("alice", "Topic"), draft(2), ContentSource::Generated)
            .unwrap();
        store
            .set(&keys::progress(plan.id, StepId(1)), "\"done\"")
            .unwrap();

        let updated = plans
            .replace_content(plan.id, draft(8), ContentSource::Generated)
            .unwrap();
        assert_eq!(updated.steps.len(), 8);
        assert_eq!(updated.steps[0].id, StepId(2));
        assert!(store
            .get(&keys::progress(plan.id, StepId(1)))
            .unwrap()
            .is_none());
    }
}
