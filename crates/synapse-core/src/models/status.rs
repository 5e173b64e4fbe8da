//! Enumerations for learner level, goal mode and step progress.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Learner proficiency the content is pitched at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(format!("Invalid level: {s}")),
        }
    }
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    /// How explanations should be phrased for this level.
    pub fn tone(&self) -> &'static str {
        match self {
            Level::Beginner => "in simple words with a concrete example",
            Level::Intermediate => "relating the concepts to one another",
            Level::Advanced => "concisely and formally",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Didactic profile of a plan.
///
/// Selects the fallback stage list and nudges the step count and the exercise
/// style.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GoalMode {
    /// Preparing for a written or oral exam
    #[serde(rename = "exam-prep")]
    ExamPrep,
    /// Preparing for quizzes and short-answer checks
    #[serde(rename = "quiz-prep")]
    QuizPrep,
    /// Mix of understanding and practice
    #[default]
    #[serde(rename = "balanced")]
    Balanced,
}

impl FromStr for GoalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exam-prep" | "exam" | "exam_prep" => Ok(GoalMode::ExamPrep),
            "quiz-prep" | "quiz" | "quiz_prep" => Ok(GoalMode::QuizPrep),
            "balanced" | "mixed" => Ok(GoalMode::Balanced),
            _ => Err(format!("Invalid goal mode: {s}")),
        }
    }
}

impl GoalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalMode::ExamPrep => "exam-prep",
            GoalMode::QuizPrep => "quiz-prep",
            GoalMode::Balanced => "balanced",
        }
    }
}

impl fmt::Display for GoalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe enumeration of step progress states.
///
/// Transitions are unrestricted; a step moves only when the learner says so.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ProgressStatus {
    /// Step not started (also the implied state of unrecorded steps)
    #[default]
    #[serde(rename = "to-do")]
    Todo,
    /// Step is being worked on
    #[serde(rename = "doing")]
    Doing,
    /// Step has been completed
    #[serde(rename = "done")]
    Done,
}

impl FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "to-do" | "todo" | "to_do" => Ok(ProgressStatus::Todo),
            "doing" | "in-progress" | "inprogress" => Ok(ProgressStatus::Doing),
            "done" => Ok(ProgressStatus::Done),
            _ => Err(format!("Invalid progress status: {s}")),
        }
    }
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Todo => "to-do",
            ProgressStatus::Doing => "doing",
            ProgressStatus::Done => "done",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use synapse_core::models::ProgressStatus;
    ///
    /// assert_eq!(ProgressStatus::Done.with_icon(), "✓ Done");
    /// assert_eq!(ProgressStatus::Doing.with_icon(), "➤ Doing");
    /// assert_eq!(ProgressStatus::Todo.with_icon(), "○ To-do");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ProgressStatus::Done => "✓ Done",
            ProgressStatus::Doing => "➤ Doing",
            ProgressStatus::Todo => "○ To-do",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
