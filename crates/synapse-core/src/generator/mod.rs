//! Content generation with deterministic fallback.
//!
//! [`ContentGenerator`] wraps an optional [`TextGenerator`] backend. When the
//! backend is missing or fails, it synthesizes the content locally (see
//! [`fallback`]) and says so through [`Generated::Fallback`]. Backend output
//! that does not satisfy its contract is an error, not a fallback.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    config::{GeneratorConfig, DEFAULT_LANGUAGE},
    contract::parse_contract,
    error::{EngineError, Result},
    models::{ExerciseSet, GoalMode, Level, Plan, PlanDraft},
};

pub mod fallback;
mod openai;
pub mod prompts;

pub use openai::OpenAiGenerator;

const PLAN_TEMPERATURE: f32 = 0.3;
const CONTENT_TEMPERATURE: f32 = 0.3;
const TUTOR_TEMPERATURE: f32 = 0.2;

/// Failures of a text generation backend.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: HTTP {status} - {body}")]
    Server { status: u16, body: String },

    #[error("Empty response")]
    EmptyResponse,

    #[error("Generator unavailable: {0}")]
    Unavailable(String),
}

/// A text completion capability.
pub trait TextGenerator: Send + Sync {
    /// Completes `prompt`; may block for the duration of a network call.
    fn complete(&self, prompt: &str, temperature: f32) -> std::result::Result<String, GeneratorError>;
}

/// Why fallback content was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No backend configured, or demo mode
    Disabled,
    /// The backend call failed
    Failed(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Disabled => f.write_str("generator disabled"),
            FallbackReason::Failed(message) => write!(f, "generator failed: {message}"),
        }
    }
}

/// Content together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    Generated(T),
    Fallback { content: T, reason: FallbackReason },
}

impl<T> Generated<T> {
    pub fn content(&self) -> &T {
        match self {
            Generated::Generated(content) | Generated::Fallback { content, .. } => content,
        }
    }

    pub fn into_content(self) -> T {
        match self {
            Generated::Generated(content) | Generated::Fallback { content, .. } => content,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Generated::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Generated::Generated(_) => None,
            Generated::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Generated<U> {
        match self {
            Generated::Generated(content) => Generated::Generated(f(content)),
            Generated::Fallback { content, reason } => Generated::Fallback {
                content: f(content),
                reason,
            },
        }
    }
}

/// What a new plan should cover.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub topic: String,
    pub level: Level,
    pub goals: Option<String>,
    pub goal_mode: GoalMode,
    pub time_per_day: u32,
}

/// The content generator adapter.
#[derive(Clone)]
pub struct ContentGenerator {
    backend: Option<Arc<dyn TextGenerator>>,
    language: String,
}

impl fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("backend", &self.backend.is_some())
            .field("language", &self.language)
            .finish()
    }
}

impl Default for ContentGenerator {
    fn default() -> Self {
        Self::offline()
    }
}

impl ContentGenerator {
    pub fn new(backend: Option<Arc<dyn TextGenerator>>, language: impl Into<String>) -> Self {
        Self {
            backend,
            language: language.into(),
        }
    }

    /// A generator that always synthesizes locally.
    pub fn offline() -> Self {
        Self::new(None, DEFAULT_LANGUAGE)
    }

    /// Builds the adapter from configuration; demo mode or a missing key
    /// yields an offline generator.
    pub fn from_config(config: &GeneratorConfig, language: impl Into<String>) -> Self {
        let backend: Option<Arc<dyn TextGenerator>> = if config.generator_enabled() {
            match OpenAiGenerator::new(config.clone()) {
                Ok(generator) => Some(Arc::new(generator)),
                Err(e) => {
                    log::warn!("Text generator disabled: {e}");
                    None
                }
            }
        } else {
            None
        };
        Self::new(backend, language)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Calls the backend. `Err` carries the fallback reason.
    fn call(&self, what: &str, prompt: &str, temperature: f32) -> std::result::Result<String, FallbackReason> {
        let Some(backend) = &self.backend else {
            return Err(FallbackReason::Disabled);
        };
        match backend.complete(prompt, temperature) {
            Ok(text) if text.trim().is_empty() => {
                log::warn!("Generator returned an empty {what}; using fallback");
                Err(FallbackReason::Failed(GeneratorError::EmptyResponse.to_string()))
            }
            Ok(text) => Ok(text),
            Err(e) => {
                log::warn!("Generator failed for {what}; using fallback: {e}");
                Err(FallbackReason::Failed(e.to_string()))
            }
        }
    }

    /// Produces a plan draft for the request.
    pub fn generate_plan(&self, request: &PlanRequest) -> Result<Generated<PlanDraft>> {
        if request.topic.trim().is_empty() {
            return Err(EngineError::invalid_input("topic").with_reason("Topic cannot be empty"));
        }
        let prompt = prompts::plan_prompt(request, &self.language);
        match self.call("plan", &prompt, PLAN_TEMPERATURE) {
            Ok(raw) => {
                let mut draft = parse_contract::<PlanDraft>(&raw)?;
                for step in &mut draft.steps {
                    if step.theory_explanations.is_empty() && !step.theory_outline.is_empty() {
                        step.theory_explanations = fallback::explain_points(
                            &step.theory_outline,
                            request.level,
                            &request.topic,
                        );
                    }
                }
                Ok(Generated::Generated(draft))
            }
            Err(reason) => Ok(Generated::Fallback {
                content: fallback::plan(request),
                reason,
            }),
        }
    }

    /// Markdown explanation of the step at `index`.
    pub fn explain_step(
        &self,
        plan: &Plan,
        index: usize,
        level: Level,
        goal_mode: GoalMode,
    ) -> Result<Generated<String>> {
        let step = plan.step_at(index)?;
        let prompt = prompts::explain_prompt(plan, index, step, level, goal_mode, &self.language);
        match self.call("explanation", &prompt, CONTENT_TEMPERATURE) {
            Ok(markdown) => Ok(Generated::Generated(markdown.trim().to_string())),
            Err(reason) => Ok(Generated::Fallback {
                content: fallback::explanation(plan, index, step, level),
                reason,
            }),
        }
    }

    /// Exercise set for the step at `index`.
    pub fn generate_exercises(
        &self,
        plan: &Plan,
        index: usize,
        level: Level,
        goal_mode: GoalMode,
    ) -> Result<Generated<ExerciseSet>> {
        let step = plan.step_at(index)?;
        let prompt = prompts::exercise_prompt(plan, index, step, level, goal_mode, &self.language);
        match self.call("exercise set", &prompt, CONTENT_TEMPERATURE) {
            Ok(raw) => Ok(Generated::Generated(parse_contract::<ExerciseSet>(&raw)?)),
            Err(reason) => Ok(Generated::Fallback {
                content: fallback::exercises(step, level),
                reason,
            }),
        }
    }

    /// Answers a learner question in the context of a plan.
    pub fn tutor_answer(&self, plan: &Plan, question: &str) -> Result<Generated<String>> {
        let question = question.trim();
        if question.is_empty() {
            return Err(EngineError::invalid_input("question").with_reason("Question cannot be empty"));
        }
        let prompt = prompts::tutor_prompt(plan, question, &self.language);
        match self.call("tutor answer", &prompt, TUTOR_TEMPERATURE) {
            Ok(answer) => Ok(Generated::Generated(answer.trim().to_string())),
            Err(reason) => Ok(Generated::Fallback {
                content: fallback::tutor(plan, question),
                reason,
            }),
        }
    }
}
