//! Display implementations for domain models.
//!
//! Steps are numbered from 1 in all output; the engine addresses them by
//! zero-based index.

use std::fmt;

use super::datetime::{DueDate, LocalDateTime};
use crate::{
    engine::{ExerciseReport, PlanProgress},
    models::{
        Agenda, AgendaItem, ExerciseSet, Plan, PlanSummary, ProgressSummary, QuizScore, Step,
        StepMeta, WordCountCheck,
    },
};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

fn option_label(index: usize) -> char {
    OPTION_LABELS.get(index).copied().unwrap_or('?')
}

fn write_list(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "#### {heading}")?;
    writeln!(f)?;
    for item in items {
        writeln!(f, "- {item}")?;
    }
    writeln!(f)
}

fn write_plan_header(f: &mut fmt::Formatter<'_>, plan: &Plan) -> fmt::Result {
    writeln!(f, "# {}. {}", plan.id, plan.topic)?;
    writeln!(f)?;
    writeln!(f, "- Level: {}", plan.level)?;
    writeln!(f, "- Goal mode: {}", plan.goal_mode)?;
    if let Some(goals) = &plan.goals {
        writeln!(f, "- Goals: {goals}")?;
    }
    writeln!(f, "- Time per day: {} min", plan.time_per_day)?;
    writeln!(f, "- Created: {}", LocalDateTime(&plan.created_at))?;
    writeln!(f, "- Updated: {}", LocalDateTime(&plan.updated_at))?;
    if plan.source.is_fallback() {
        writeln!(f, "- Content: offline template")?;
    }
    Ok(())
}

impl Step {
    fn fmt_step(&self, f: &mut fmt::Formatter<'_>, number: usize) -> fmt::Result {
        writeln!(f, "### {number}. {}", self.title)?;
        writeln!(f)?;
        if !self.objective.is_empty() {
            writeln!(f, "{}", self.objective)?;
            writeln!(f)?;
        }
        write_list(f, "Theory", &self.theory_outline)?;
        write_list(f, "Practice", &self.practice_tasks)?;
        write_list(f, "Resources", &self.suggested_resources)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plan_header(f, self)?;

        if !self.overview.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.overview)?;
        }

        if self.steps.is_empty() {
            return writeln!(f, "\nNo steps in this plan.");
        }
        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        for (index, step) in self.steps.iter().enumerate() {
            step.fmt_step(f, index + 1)?;
        }

        if !self.review_strategy.is_empty() {
            writeln!(f, "## Review")?;
            writeln!(f)?;
            for item in &self.review_strategy {
                writeln!(f, "- {item}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}% complete ({} done, {} doing, {} to-do)",
            self.percent(),
            self.done,
            self.doing,
            self.todo
        )
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offline = if self.fallback { " [offline]" } else { "" };
        writeln!(
            f,
            "## {} (ID: {}) {}%{offline}",
            self.topic,
            self.id,
            self.completion_percent()
        )?;
        writeln!(f)?;
        writeln!(f, "- **Level**: {}", self.level)?;
        writeln!(f, "- **Goal mode**: {}", self.goal_mode)?;
        writeln!(
            f,
            "- **Steps**: {}/{} done",
            self.progress.done, self.progress.total
        )?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for PlanProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.plan.id, self.plan.topic)?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        for (index, (step, status)) in self.plan.steps.iter().zip(&self.statuses).enumerate() {
            writeln!(f, "{}. {} ({})", index + 1, step.title, status.with_icon())?;
        }
        Ok(())
    }
}

impl fmt::Display for StepMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.due_date {
            Some(due) => writeln!(f, "- Due: {due}")?,
            None => writeln!(f, "- Due: not scheduled")?,
        }
        if !self.notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.notes)?;
        }
        Ok(())
    }
}

impl AgendaItem {
    fn fmt_item(&self, f: &mut fmt::Formatter<'_>, today: jiff::civil::Date) -> fmt::Result {
        writeln!(
            f,
            "- {}. {}, due {}",
            self.index + 1,
            self.title,
            DueDate {
                due: self.due_date,
                today,
            }
        )
    }
}

impl fmt::Display for Agenda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Nothing due on {}.", self.today);
        }
        if !self.overdue.is_empty() {
            writeln!(f, "### Overdue")?;
            writeln!(f)?;
            for item in &self.overdue {
                item.fmt_item(f, self.today)?;
            }
            writeln!(f)?;
        }
        if !self.due_today.is_empty() {
            writeln!(f, "### Due today")?;
            writeln!(f)?;
            for item in &self.due_today {
                item.fmt_item(f, self.today)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders the exercises without revealing quiz answers.
impl fmt::Display for ExerciseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Guided exercise: {}", self.guided.title)?;
        writeln!(f)?;
        for (i, step) in self.guided.steps.iter().enumerate() {
            writeln!(f, "{}. {step}", i + 1)?;
        }

        writeln!(f, "\n## Quiz")?;
        for (i, question) in self.quiz.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "**{}. {}**", i + 1, question.question)?;
            writeln!(f)?;
            for (j, option) in question.options.iter().enumerate() {
                writeln!(f, "- {}) {option}", option_label(j))?;
            }
        }

        writeln!(f, "\n## Writing")?;
        writeln!(f)?;
        writeln!(f, "{}", self.writing.prompt)?;
        writeln!(f)?;
        writeln!(f, "Length: {} to {} words", self.writing.min, self.writing.max)?;
        if !self.writing.rubric.is_empty() {
            writeln!(f)?;
            for criterion in &self.writing.rubric {
                writeln!(f, "- {criterion}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for QuizScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} correct", self.correct, self.total)
    }
}

impl fmt::Display for WordCountCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordCountCheck::TooShort { words, min } => {
                write!(f, "{words} words, at least {min} required")
            }
            WordCountCheck::WithinRange { words } => write!(f, "{words} words, within range"),
            WordCountCheck::TooLong { words, max } => {
                write!(f, "{words} words, at most {max} allowed")
            }
        }
    }
}

impl fmt::Display for ExerciseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Score: {}", self.score)?;
        writeln!(f)?;
        for (i, question) in self.exercises.quiz.iter().enumerate() {
            let given = self.answers.get(i).copied();
            let icon = if given == Some(question.answer) { "✓" } else { "✗" };
            let given = given.map_or_else(|| "-".to_string(), |g| option_label(g).to_string());
            writeln!(
                f,
                "- {icon} {}. answered {given}, correct {}",
                i + 1,
                option_label(question.answer)
            )?;
            if !question.explanation.is_empty() {
                writeln!(f, "  {}", question.explanation)?;
            }
        }
        if let Some(check) = &self.writing {
            let icon = if check.is_ok() { "✓" } else { "✗" };
            writeln!(f)?;
            writeln!(f, "Writing: {icon} {check}")?;
        }
        Ok(())
    }
}
