//! Result wrapper types for displaying operation outcomes.
//!
//! Create, update and delete results get a confirmation line followed by the
//! resource. Generated content notes when it came from the offline fallback.

use std::fmt;

use crate::{
    engine::{Artifact, ArtifactOrigin},
    generator::{FallbackReason, Generated},
    models::{ContentSource, ExerciseSet, Plan},
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust,no_run
/// use synapse_core::{display::CreateResult, params::CreatePlan, EngineBuilder};
///
/// # async fn example() -> synapse_core::Result<()> {
/// let engine = EngineBuilder::new().build().await?;
/// let plan = engine
///     .generate_plan(&CreatePlan {
///         owner_id: "local".to_string(),
///         topic: "Linear algebra".to_string(),
///         level: Default::default(),
///         goals: None,
///         goal_mode: Default::default(),
///         time_per_day: 45,
///     })
///     .await?;
/// println!("{}", CreateResult::new(plan));
/// # Ok(())
/// # }
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        if let Some(reason) = fallback_of(&self.resource) {
            writeln!(f, "\n> Offline template used ({reason}).")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

fn fallback_of(plan: &Plan) -> Option<String> {
    match &plan.source {
        ContentSource::Fallback { error: Some(error) } => {
            Some(format!("generator failed: {error}"))
        }
        ContentSource::Fallback { error: None } => {
            Some(FallbackReason::Disabled.to_string())
        }
        ContentSource::Generated => None,
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// Optionally lists the changes made.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.topic, self.resource.id
        )
    }
}

/// A one-line status message.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.success { "✓" } else { "✗" };
        writeln!(f, "{icon} {}", self.message)
    }
}

fn write_origin(f: &mut fmt::Formatter<'_>, origin: &ArtifactOrigin) -> fmt::Result {
    match origin {
        ArtifactOrigin::Fallback(reason) => writeln!(f, "\n> Offline template used ({reason})."),
        ArtifactOrigin::Cached | ArtifactOrigin::Generated => Ok(()),
    }
}

impl fmt::Display for Artifact<String> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.content.trim_end())?;
        write_origin(f, &self.origin)
    }
}

impl fmt::Display for Artifact<ExerciseSet> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)?;
        write_origin(f, &self.origin)
    }
}

impl fmt::Display for Generated<String> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.content().trim_end())?;
        match self.fallback_reason() {
            Some(reason) => writeln!(f, "\n> Offline answer ({reason})."),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        assert_eq!(OperationStatus::success("Saved").to_string(), "✓ Saved\n");
        assert_eq!(OperationStatus::failure("Nope").to_string(), "✗ Nope\n");
    }

    #[test]
    fn test_artifact_notes_fallback_origin() {
        let cached = Artifact {
            content: "Ownership moves values.\n\n".to_string(),
            origin: ArtifactOrigin::Cached,
        };
        assert_eq!(cached.to_string(), "Ownership moves values.\n");

        let offline = Artifact {
            content: "Template text".to_string(),
            origin: ArtifactOrigin::Fallback(FallbackReason::Failed("timeout".to_string())),
        };
        assert!(offline
            .to_string()
            .contains("Offline template used (generator failed: timeout)"));
    }

    #[test]
    fn test_generated_answer_display() {
        let answer = Generated::Generated("Use a BTreeMap.".to_string());
        assert_eq!(answer.to_string(), "Use a BTreeMap.\n");

        let offline = Generated::Fallback {
            content: "Review step 2.".to_string(),
            reason: FallbackReason::Disabled,
        };
        assert!(offline.to_string().contains("Offline answer (generator disabled)"));
    }
}
