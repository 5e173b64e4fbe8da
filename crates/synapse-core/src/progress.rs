//! Per-step progress tracking and step metadata.

use std::collections::{BTreeMap, HashMap};

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{Agenda, AgendaItem, Plan, ProgressStatus, ProgressSummary, StepId, StepMeta},
    store::{keys, RecordStore},
};

/// Records and aggregates step states for plans in a record store.
pub struct ProgressTracker<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> ProgressTracker<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Upserts the status of one step. Setting the same status twice is a
    /// no-op in effect.
    pub fn set(&self, plan: &Plan, index: usize, status: ProgressStatus) -> Result<()> {
        let step = plan.step_at(index)?;
        let raw = serde_json::to_string(&status)?;
        self.store.set(&keys::progress(plan.id, step.id), &raw)
    }

    /// Statuses keyed by step id, recorded entries only.
    fn recorded(&self, plan_id: u64) -> Result<HashMap<StepId, ProgressStatus>> {
        let mut recorded = HashMap::new();
        for record in self.store.list(&keys::progress_scope(plan_id))? {
            if let Some(step) = keys::trailing_step_id(&record.key) {
                recorded.insert(step, serde_json::from_str(&record.value)?);
            }
        }
        Ok(recorded)
    }

    /// Explicitly recorded statuses keyed by current step index.
    ///
    /// Steps that were never written are absent; callers treat them as
    /// [`ProgressStatus::Todo`].
    pub fn progress_map(&self, plan: &Plan) -> Result<BTreeMap<usize, ProgressStatus>> {
        let recorded = self.recorded(plan.id)?;
        Ok(plan
            .steps
            .iter()
            .enumerate()
            .filter_map(|(index, step)| recorded.get(&step.id).map(|status| (index, *status)))
            .collect())
    }

    /// Status of every step in plan order, defaulting to to-do.
    pub fn statuses(&self, plan: &Plan) -> Result<Vec<ProgressStatus>> {
        let recorded = self.recorded(plan.id)?;
        Ok(plan
            .steps
            .iter()
            .map(|step| recorded.get(&step.id).copied().unwrap_or_default())
            .collect())
    }

    pub fn summary(&self, plan: &Plan) -> Result<ProgressSummary> {
        Ok(summarize(&self.statuses(plan)?))
    }

    pub fn meta(&self, plan: &Plan, index: usize) -> Result<StepMeta> {
        let step = plan.step_at(index)?;
        match self.store.get(&keys::meta(plan.id, step.id))? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(StepMeta::default()),
        }
    }

    pub fn set_meta(&self, plan: &Plan, index: usize, meta: &StepMeta) -> Result<()> {
        let step = plan.step_at(index)?;
        let raw = serde_json::to_string(meta)?;
        self.store.set(&keys::meta(plan.id, step.id), &raw)
    }

    /// Unfinished steps due on `today` or earlier.
    pub fn agenda(&self, plan: &Plan, today: Date) -> Result<Agenda> {
        let statuses = self.statuses(plan)?;
        let mut metas = HashMap::new();
        for record in self.store.list(&keys::meta_scope(plan.id))? {
            if let Some(step) = keys::trailing_step_id(&record.key) {
                metas.insert(step, serde_json::from_str::<StepMeta>(&record.value)?);
            }
        }

        let mut agenda = Agenda {
            today,
            due_today: Vec::new(),
            overdue: Vec::new(),
        };
        for (index, step) in plan.steps.iter().enumerate() {
            if statuses[index] == ProgressStatus::Done {
                continue;
            }
            let Some(due_date) = metas.get(&step.id).and_then(|meta| meta.due_date) else {
                continue;
            };
            let item = AgendaItem {
                index,
                title: step.title.clone(),
                due_date,
            };
            if due_date == today {
                agenda.due_today.push(item);
            } else if due_date < today {
                agenda.overdue.push(item);
            }
        }
        agenda.overdue.sort_by_key(|item| (item.due_date, item.index));
        Ok(agenda)
    }
}

/// Counts statuses into a summary.
pub fn summarize(statuses: &[ProgressStatus]) -> ProgressSummary {
    let mut summary = ProgressSummary {
        total: statuses.len(),
        ..ProgressSummary::default()
    };
    for status in statuses {
        match status {
            ProgressStatus::Todo => summary.todo += 1,
            ProgressStatus::Doing => summary.doing += 1,
            ProgressStatus::Done => summary.done += 1,
        }
    }
    summary
}
