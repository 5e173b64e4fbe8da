//! Parameter structures for engine operations.
//!
//! These are plain data types shared by every front end. They carry no
//! framework derives beyond serde; interface layers (the CLI) define their own
//! argument types and convert into these.
//!
//! Steps are always addressed by their zero-based index in the current plan
//! revision. Front ends that show 1-based numbers convert before building a
//! parameter.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    generator::PlanRequest,
    models::{GoalMode, Level, PlanHeader, ProgressStatus, StepMeta},
};

/// Generic parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The plan to operate on
    pub id: u64,
}

/// Parameters for generating a new plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Opaque owner identifier
    pub owner_id: String,
    /// Subject to study
    pub topic: String,
    #[serde(default)]
    pub level: Level,
    /// Free-form learner goals
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub goal_mode: GoalMode,
    /// Minutes available per day
    pub time_per_day: u32,
}

impl CreatePlan {
    /// What the generator is asked for.
    pub fn request(&self) -> PlanRequest {
        PlanRequest {
            topic: self.topic.trim().to_string(),
            level: self.level,
            goals: self
                .goals
                .as_deref()
                .map(str::trim)
                .filter(|goals| !goals.is_empty())
                .map(str::to_string),
            goal_mode: self.goal_mode,
            time_per_day: self.time_per_day,
        }
    }

    pub(crate) fn header(&self) -> PlanHeader {
        let request = self.request();
        PlanHeader {
            owner_id: self.owner_id.clone(),
            topic: request.topic,
            level: request.level,
            goals: request.goals,
            goal_mode: request.goal_mode,
            time_per_day: request.time_per_day,
        }
    }
}

/// Parameters for listing an owner's plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlans {
    pub owner_id: String,
}

/// Parameters for renaming a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub id: u64,
    /// New topic, used as the plan's display name
    pub topic: String,
}

/// A step of a plan, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRef {
    pub plan_id: u64,
    /// Zero-based step index
    pub index: usize,
}

impl StepRef {
    pub fn new(plan_id: u64, index: usize) -> Self {
        Self { plan_id, index }
    }
}

/// Parameters for recording a step status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetProgress {
    pub step: StepRef,
    pub status: ProgressStatus,
}

/// Parameters for replacing a step's due date and notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStepMeta {
    pub step: StepRef,
    pub meta: StepMeta,
}

/// Parameters for grading a learner's exercise answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeExercises {
    pub step: StepRef,
    /// Chosen option per quiz question, in question order
    pub answers: Vec<usize>,
    /// Text submitted for the writing task
    #[serde(default)]
    pub essay: Option<String>,
}

/// Parameters for a tutor question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskTutor {
    pub plan_id: u64,
    pub question: String,
}

/// Parameters for the due-today / overdue view of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaQuery {
    pub plan_id: u64,
    pub today: Date,
}

/// Concept map layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    #[default]
    Linear,
    Radial,
    Tiered,
}

impl MapStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapStyle::Linear => "linear",
            MapStyle::Radial => "radial",
            MapStyle::Tiered => "tiered",
        }
    }
}

impl FromStr for MapStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "row" => Ok(MapStyle::Linear),
            "radial" | "mindmap" => Ok(MapStyle::Radial),
            "tiered" | "tiers" | "textbook" => Ok(MapStyle::Tiered),
            _ => Err(format!("Invalid map style: {s}")),
        }
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concept map output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapFormat {
    #[default]
    Svg,
    Png,
}

impl MapFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            MapFormat::Svg => "svg",
            MapFormat::Png => "png",
        }
    }
}

impl FromStr for MapFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "svg" => Ok(MapFormat::Svg),
            "png" => Ok(MapFormat::Png),
            _ => Err(format!("Invalid map format: {s}")),
        }
    }
}

impl fmt::Display for MapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Parameters for rendering a plan's concept map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderMap {
    pub plan_id: u64,
    #[serde(default)]
    pub style: MapStyle,
    #[serde(default)]
    pub format: MapFormat,
    /// Step index to mark with the highlight marker
    #[serde(default)]
    pub highlight: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_plan_request_trims_and_drops_blank_goals() {
        let params = CreatePlan {
            owner_id: "ada".to_string(),
            topic: "  Linear algebra ".to_string(),
            level: Level::Advanced,
            goals: Some("   ".to_string()),
            goal_mode: GoalMode::QuizPrep,
            time_per_day: 30,
        };
        let request = params.request();
        assert_eq!(request.topic, "Linear algebra");
        assert_eq!(request.goals, None);

        let header = params.header();
        assert_eq!(header.owner_id, "ada");
        assert_eq!(header.topic, "Linear algebra");
        assert_eq!(header.goal_mode, GoalMode::QuizPrep);
    }

    #[test]
    fn test_map_style_and_format_parse() {
        assert_eq!("Radial".parse::<MapStyle>().unwrap(), MapStyle::Radial);
        assert_eq!("textbook".parse::<MapStyle>().unwrap(), MapStyle::Tiered);
        assert!("spiral".parse::<MapStyle>().is_err());
        assert_eq!("PNG".parse::<MapFormat>().unwrap(), MapFormat::Png);
        assert_eq!(MapFormat::Svg.to_string(), "svg");
    }

    #[test]
    fn test_render_map_defaults_from_json() {
        let params: RenderMap = serde_json::from_str(r#"{"plan_id": 3}"#).unwrap();
        assert_eq!(params.style, MapStyle::Linear);
        assert_eq!(params.format, MapFormat::Svg);
        assert_eq!(params.highlight, None);
    }
}
