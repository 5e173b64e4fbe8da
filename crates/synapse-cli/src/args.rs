//! Command-line argument definitions using clap's derive API.
//!
//! Argument structs are CLI-only types; handlers in [`crate::cli`] convert
//! them into the core parameter types. Step numbers are 1-based here and
//! converted to zero-based indices at that boundary.

use std::path::PathBuf;

use clap::{builder::RangedU64ValueParser, Args as ClapArgs, Parser, Subcommand};
use jiff::civil::Date;
use synapse_core::{
    generator::PlanRequest,
    models::{GoalMode, Level, ProgressStatus},
    params::StepRef,
    MapFormat, MapStyle,
};

/// Synapse turns a topic into a step-by-step study plan, explains each step,
/// generates exercises, tracks progress and draws the plan as a concept map.
///
/// Content comes from an OpenAI-compatible endpoint when `OPENAI_API_KEY` is
/// set; otherwise (or with `--demo`) it is synthesized offline.
#[derive(Parser)]
#[command(version, about, name = "synapse")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/synapse/synapse.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Owner id plans are created and listed under
    #[arg(long, global = true, default_value = "local")]
    pub user: String,

    /// Never call the text generator; use offline content only
    #[arg(long, global = true)]
    pub demo: bool,

    /// Language generated content is written in
    #[arg(long, global = true)]
    pub language: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Work on the steps of a plan
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Show the status of every step of a plan
    Progress(PlanIdArgs),
    /// List steps due today or overdue across your plans
    Today(TodayArgs),
    /// Render a plan's concept map to a file
    Map(MapArgs),
    /// Ask the tutor a question about a plan
    Tutor(TutorArgs),
}

#[derive(ClapArgs)]
pub struct PlanIdArgs {
    /// ID of the plan
    pub plan_id: u64,
}

/// Generate a new plan
#[derive(ClapArgs)]
pub struct NewPlanArgs {
    /// Subject to study
    pub topic: String,
    /// beginner, intermediate or advanced
    #[arg(short, long, default_value = "beginner")]
    pub level: Level,
    /// exam-prep, quiz-prep or balanced
    #[arg(short, long, default_value = "balanced")]
    pub mode: GoalMode,
    /// Free-form goals, e.g. "pass the final exam"
    #[arg(short, long)]
    pub goals: Option<String>,
    /// Minutes available per day
    #[arg(short = 't', long, default_value_t = 30)]
    pub minutes: u32,
}

impl From<NewPlanArgs> for PlanRequest {
    fn from(val: NewPlanArgs) -> Self {
        PlanRequest {
            topic: val.topic,
            level: val.level,
            goals: val.goals,
            goal_mode: val.mode,
            time_per_day: val.minutes,
        }
    }
}

#[derive(ClapArgs)]
pub struct RenamePlanArgs {
    /// ID of the plan to rename
    pub plan_id: u64,
    /// New topic
    pub topic: String,
}

/// Delete a plan permanently
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub plan_id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Generate a new plan
    #[command(aliases = ["n", "create"])]
    New(NewPlanArgs),
    /// List your plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan with all its steps
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Change a plan's topic
    Rename(RenamePlanArgs),
    /// Delete a plan and everything derived from it
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Regenerate a short plan, keeping the result only if it is longer
    Expand(PlanIdArgs),
}

/// A step of a plan, numbered from 1.
#[derive(ClapArgs, Clone, Copy)]
pub struct StepArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Step number, starting at 1
    #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub step: usize,
}

impl From<StepArgs> for StepRef {
    fn from(val: StepArgs) -> Self {
        StepRef::new(val.plan_id, val.step - 1)
    }
}

#[derive(ClapArgs)]
pub struct ContentArgs {
    #[command(flatten)]
    pub step: StepArgs,
    /// Discard cached content and generate it again
    #[arg(long)]
    pub refresh: bool,
}

#[derive(ClapArgs)]
pub struct StatusArgs {
    #[command(flatten)]
    pub step: StepArgs,
    /// to-do, doing or done
    pub status: ProgressStatus,
}

#[derive(ClapArgs)]
pub struct CheckArgs {
    #[command(flatten)]
    pub step: StepArgs,
    /// Quiz answers as letters, comma-separated (e.g. A,C,B,D,A)
    #[arg(short, long, value_delimiter = ',', value_parser = parse_answer)]
    pub answers: Vec<usize>,
    /// Text for the writing task
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(ClapArgs)]
pub struct DueArgs {
    #[command(flatten)]
    pub step: StepArgs,
    /// Due date (YYYY-MM-DD); shows the current schedule when omitted
    pub date: Option<Date>,
    /// Replace the step's notes
    #[arg(short, long)]
    pub note: Option<String>,
    /// Remove the due date
    #[arg(long, conflicts_with = "date")]
    pub clear: bool,
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Explain a step
    #[command(alias = "e")]
    Explain(ContentArgs),
    /// Show the exercises of a step
    #[command(alias = "x")]
    Exercises(ContentArgs),
    /// Record a step's status
    Status(StatusArgs),
    /// Grade quiz answers and the writing task
    Check(CheckArgs),
    /// Show or set a step's due date and notes
    Due(DueArgs),
}

#[derive(ClapArgs)]
pub struct TodayArgs {
    /// Day to check instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<Date>,
}

#[derive(ClapArgs)]
pub struct MapArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// linear, radial or tiered
    #[arg(short, long, default_value = "linear")]
    pub style: MapStyle,
    /// svg or png
    #[arg(short, long, default_value = "svg")]
    pub format: MapFormat,
    /// Output file; defaults to plan-<id>-<style>.<format>
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Step number to highlight
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub highlight: Option<usize>,
}

#[derive(ClapArgs)]
pub struct TutorArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Question for the tutor
    pub question: String,
}

/// Parses a quiz answer letter into a zero-based option index.
fn parse_answer(raw: &str) -> Result<usize, String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "A" => Ok(0),
        "B" => Ok(1),
        "C" => Ok(2),
        "D" => Ok(3),
        _ => Err(format!("invalid answer '{raw}', expected A, B, C or D")),
    }
}
