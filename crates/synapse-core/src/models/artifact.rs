//! Kinds of cached per-step artifacts.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Generated content attached to a single step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Markdown explanation of the step
    #[serde(rename = "explain_md")]
    Explanation,
    /// JSON-encoded [`ExerciseSet`](super::ExerciseSet)
    #[serde(rename = "exercises_json")]
    Exercises,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Explanation, ArtifactKind::Exercises];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Explanation => "explain_md",
            ArtifactKind::Exercises => "exercises_json",
        }
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "explain_md" | "explanation" | "explain" => Ok(ArtifactKind::Explanation),
            "exercises_json" | "exercises" => Ok(ArtifactKind::Exercises),
            _ => Err(format!("Invalid artifact kind: {s}")),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
