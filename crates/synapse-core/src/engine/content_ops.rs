//! Cached per-step content: explanations, exercises and tutor answers.

use super::Engine;
use crate::{
    cache::ArtifactCache,
    error::Result,
    generator::{FallbackReason, Generated},
    models::{ArtifactKind, ExerciseSet, QuizScore, WordCountCheck},
    params::{AskTutor, GradeExercises, StepRef},
    plans::PlanStore,
    store::keys,
};

/// Where an artifact returned by the engine came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOrigin {
    /// Read from the cache
    Cached,
    /// Produced by the text generator on this call
    Generated,
    /// Synthesized locally on this call
    Fallback(FallbackReason),
}

/// Content for one step together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact<T> {
    pub content: T,
    pub origin: ArtifactOrigin,
}

impl<T> Artifact<T> {
    fn fresh(generated: Generated<T>) -> Self {
        match generated {
            Generated::Generated(content) => Self {
                content,
                origin: ArtifactOrigin::Generated,
            },
            Generated::Fallback { content, reason } => Self {
                content,
                origin: ArtifactOrigin::Fallback(reason),
            },
        }
    }

    pub fn is_cached(&self) -> bool {
        self.origin == ArtifactOrigin::Cached
    }
}

/// Graded exercise answers.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseReport {
    pub exercises: ExerciseSet,
    pub answers: Vec<usize>,
    pub score: QuizScore,
    /// Word-count verdict for the writing task, when text was submitted
    pub writing: Option<WordCountCheck>,
}

impl Engine {
    /// Returns the cached payload under (step, kind), running `producer` on a
    /// miss. Concurrent callers for the same key run it at most once.
    pub async fn get_or_create_cached<F>(
        &self,
        step: &StepRef,
        kind: ArtifactKind,
        producer: F,
    ) -> Result<String>
    where
        F: FnOnce() -> Result<String> + Send + 'static,
    {
        let StepRef { plan_id, index } = *step;
        let locks = self.locks.clone();
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            let key = keys::artifact(plan_id, plan.step_at(index)?.id, kind);
            ArtifactCache::new(db, &locks).get_or_create(&key, producer)
        })
        .await
    }

    /// Markdown explanation of a step, generated once and then cached.
    pub async fn explain_step(&self, step: &StepRef) -> Result<Artifact<String>> {
        let StepRef { plan_id, index } = *step;
        let generator = self.generator.clone();
        let locks = self.locks.clone();
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            let step_id = plan.step_at(index)?.id;
            let key = keys::artifact(plan_id, step_id, ArtifactKind::Explanation);

            let mut fresh = None;
            let content = ArtifactCache::new(db, &locks).get_or_create(&key, || {
                let generated = generator.explain_step(&plan, index, plan.level, plan.goal_mode)?;
                let artifact = Artifact::fresh(generated);
                let payload = artifact.content.clone();
                fresh = Some(artifact.origin);
                Ok(payload)
            })?;
            Ok(Artifact {
                content,
                origin: fresh.unwrap_or(ArtifactOrigin::Cached),
            })
        })
        .await
    }

    /// Exercise set of a step, generated once and then cached as JSON.
    pub async fn generate_exercises(&self, step: &StepRef) -> Result<Artifact<ExerciseSet>> {
        let StepRef { plan_id, index } = *step;
        let generator = self.generator.clone();
        let locks = self.locks.clone();
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            let step_id = plan.step_at(index)?.id;
            let key = keys::artifact(plan_id, step_id, ArtifactKind::Exercises);

            let mut fresh = None;
            let payload = ArtifactCache::new(db, &locks).get_or_create(&key, || {
                let generated =
                    generator.generate_exercises(&plan, index, plan.level, plan.goal_mode)?;
                let artifact = Artifact::fresh(generated);
                let payload = serde_json::to_string(&artifact.content)?;
                fresh = Some(artifact.origin);
                Ok(payload)
            })?;
            Ok(Artifact {
                content: serde_json::from_str(&payload)?,
                origin: fresh.unwrap_or(ArtifactOrigin::Cached),
            })
        })
        .await
    }

    /// Scores quiz answers and checks the writing task against the step's
    /// exercise set.
    pub async fn grade_exercises(&self, params: &GradeExercises) -> Result<ExerciseReport> {
        let exercises = self.generate_exercises(&params.step).await?.content;
        let score = exercises.score(&params.answers);
        let writing = params
            .essay
            .as_deref()
            .map(|text| exercises.writing.check(text));
        Ok(ExerciseReport {
            exercises,
            answers: params.answers.clone(),
            score,
            writing,
        })
    }

    /// Drops every cached artifact of a step so the next request
    /// regenerates it. Returns how many entries were removed.
    pub async fn invalidate_artifacts(&self, step: &StepRef) -> Result<usize> {
        let StepRef { plan_id, index } = *step;
        let locks = self.locks.clone();
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            let step_id = plan.step_at(index)?.id;
            ArtifactCache::new(db, &locks).invalidate(plan_id, step_id)
        })
        .await
    }

    /// Answers a learner question about a plan. Answers are not cached.
    pub async fn ask_tutor(&self, params: &AskTutor) -> Result<Generated<String>> {
        let plan_id = params.plan_id;
        let question = params.question.clone();
        let generator = self.generator.clone();
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            generator.tutor_answer(&plan, &question)
        })
        .await
    }
}
