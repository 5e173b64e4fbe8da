//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Agenda, PlanSummary};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// Handles empty collections gracefully and leaves titles to the caller.
///
/// # Examples
///
/// ```rust
/// use synapse_core::display::PlanSummaries;
///
/// let summaries = PlanSummaries(vec![]);
/// assert_eq!(summaries.to_string(), "No plans found.\n");
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

/// Agendas of several plans, keyed by plan topic.
///
/// Plans with nothing due are left out.
pub struct PlanAgendas(pub Vec<(String, Agenda)>);

impl fmt::Display for PlanAgendas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut due = self.0.iter().filter(|(_, agenda)| !agenda.is_empty()).peekable();
        if due.peek().is_none() {
            return writeln!(f, "Nothing due today.");
        }
        for (topic, agenda) in due {
            writeln!(f, "## {topic}")?;
            writeln!(f)?;
            write!(f, "{agenda}")?;
        }
        Ok(())
    }
}
