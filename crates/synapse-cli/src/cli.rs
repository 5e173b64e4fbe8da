//! Command handlers.
//!
//! Each handler converts clap arguments into core parameters, runs the
//! operation through the session (writes) or the engine (reads and
//! generated content) and renders the markdown result.

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use jiff::Zoned;
use log::{debug, info};
use synapse_core::{
    display::{CreateResult, DeleteResult, OperationStatus, PlanAgendas, PlanSummaries, UpdateResult},
    models::Plan,
    params::{AgendaQuery, AskTutor, GradeExercises, Id, ListPlans, RenderMap, StepRef},
    Engine, Session,
};

use crate::{
    args::{
        CheckArgs, ContentArgs, DeletePlanArgs, DueArgs, MapArgs, PlanCommands, StatusArgs,
        StepCommands, TodayArgs, TutorArgs,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    session: Session,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(session: Session, renderer: TerminalRenderer) -> Self {
        Self { session, renderer }
    }

    fn engine(&self) -> &Engine {
        self.session.engine()
    }

    /// Opens a plan in the session, which decides whether it is writable.
    /// Only `plan show` auto-expands short plans.
    async fn open(&mut self, plan_id: u64) -> Result<Plan> {
        self.session
            .select_plan(plan_id)
            .await
            .with_context(|| format!("Failed to open plan {plan_id}"))
    }

    pub async fn handle_plan_command(&mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::New(args) => {
                let plan = self
                    .session
                    .create_plan(args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string());
            }
            PlanCommands::List => self.list_plans().await?,
            PlanCommands::Show(args) => {
                let plan = self
                    .session
                    .open_plan(args.plan_id)
                    .await
                    .with_context(|| format!("Failed to open plan {}", args.plan_id))?;
                if self.session.is_read_only() {
                    self.renderer
                        .render("> Read-only: this plan belongs to another user.\n\n");
                }
                self.renderer.render(&plan.to_string());
            }
            PlanCommands::Rename(args) => {
                let previous = self.open(args.plan_id).await?.topic;
                let plan = self
                    .session
                    .rename_plan(&args.topic)
                    .await
                    .context("Failed to rename plan")?;
                let change = format!("Renamed from '{previous}' to '{}'", plan.topic);
                self.renderer
                    .render(&UpdateResult::with_changes(plan, vec![change]).to_string());
            }
            PlanCommands::Delete(args) => self.delete_plan(args).await?,
            PlanCommands::Expand(args) => {
                self.open(args.plan_id).await?;
                let outcome = self
                    .session
                    .expand_plan()
                    .await
                    .context("Failed to expand plan")?;
                let status = if outcome.replaced {
                    OperationStatus::success(format!(
                        "Expanded plan {} from {} to {} steps",
                        outcome.plan.id,
                        outcome.previous_len,
                        outcome.plan.len()
                    ))
                } else {
                    OperationStatus::failure(format!(
                        "Kept plan {}: the regenerated plan was not longer than {} steps",
                        outcome.plan.id, outcome.previous_len
                    ))
                };
                self.renderer.render(&status.to_string());
            }
        }
        Ok(())
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self
            .engine()
            .list_plans(&ListPlans {
                owner_id: self.session.owner_id().to_string(),
            })
            .await
            .context("Failed to list plans")?;
        debug!("Listing {} plans", summaries.len());
        self.renderer.render(&format!(
            "# Plans\n\n{}",
            PlanSummaries(summaries)
        ));
        Ok(())
    }

    async fn delete_plan(&mut self, args: DeletePlanArgs) -> Result<()> {
        if !args.confirm {
            bail!(
                "Deleting plan {} removes its progress and generated content. \
                 Re-run with --confirm to proceed.",
                args.plan_id
            );
        }
        self.open(args.plan_id).await?;
        let plan = self
            .session
            .delete_plan()
            .await
            .context("Failed to delete plan")?;
        self.renderer.render(&DeleteResult::new(plan).to_string());
        Ok(())
    }

    pub async fn handle_step_command(&mut self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Explain(args) => {
                let step = self.prepare_content(&args).await?;
                let artifact = self
                    .engine()
                    .explain_step(&step)
                    .await
                    .context("Failed to explain step")?;
                self.renderer.render(&artifact.to_string());
            }
            StepCommands::Exercises(args) => {
                let step = self.prepare_content(&args).await?;
                let artifact = self
                    .engine()
                    .generate_exercises(&step)
                    .await
                    .context("Failed to generate exercises")?;
                self.renderer.render(&artifact.to_string());
            }
            StepCommands::Status(args) => self.set_status(args).await?,
            StepCommands::Check(args) => self.check_exercises(args).await?,
            StepCommands::Due(args) => self.step_due(args).await?,
        }
        Ok(())
    }

    /// Opens the plan and drops cached content when a refresh is requested.
    async fn prepare_content(&mut self, args: &ContentArgs) -> Result<StepRef> {
        let step = StepRef::from(args.step);
        self.open(step.plan_id).await?;
        if args.refresh {
            let removed = self.session.invalidate_artifacts(step.index).await?;
            info!(
                "Dropped {removed} cached artifacts for plan {} step {}",
                step.plan_id, args.step.step
            );
        }
        Ok(step)
    }

    async fn set_status(&mut self, args: StatusArgs) -> Result<()> {
        let step = StepRef::from(args.step);
        self.open(step.plan_id).await?;
        let summary = self
            .session
            .set_progress(step.index, args.status)
            .await
            .context("Failed to record progress")?;
        let message = format!(
            "Step {} is now {}. Plan is {summary}.",
            args.step.step,
            args.status.with_icon()
        );
        self.renderer
            .render(&OperationStatus::success(message).to_string());
        Ok(())
    }

    async fn check_exercises(&mut self, args: CheckArgs) -> Result<()> {
        let step = StepRef::from(args.step);
        self.open(step.plan_id).await?;
        let report = self
            .engine()
            .grade_exercises(&GradeExercises {
                step,
                answers: args.answers,
                essay: args.text,
            })
            .await
            .context("Failed to grade exercises")?;
        self.renderer.render(&report.to_string());
        Ok(())
    }

    async fn step_due(&mut self, args: DueArgs) -> Result<()> {
        let step = StepRef::from(args.step);
        self.open(step.plan_id).await?;
        let mut meta = self.engine().step_meta(&step).await?;

        if args.date.is_none() && args.note.is_none() && !args.clear {
            self.renderer
                .render(&format!("## Step {}\n\n{meta}", args.step.step));
            return Ok(());
        }
        if args.clear {
            meta.due_date = None;
        }
        if let Some(date) = args.date {
            meta.due_date = Some(date);
        }
        if let Some(note) = args.note {
            meta.notes = note;
        }
        let meta = self
            .session
            .set_step_meta(step.index, meta)
            .await
            .context("Failed to update step schedule")?;
        self.renderer.render(&format!(
            "{}\n{meta}",
            OperationStatus::success(format!("Updated step {}", args.step.step))
        ));
        Ok(())
    }

    pub async fn show_progress(&mut self, plan_id: u64) -> Result<()> {
        self.open(plan_id).await?;
        let progress = self
            .engine()
            .plan_progress(&Id { id: plan_id })
            .await
            .context("Failed to load progress")?;
        self.renderer.render(&progress.to_string());
        Ok(())
    }

    /// Agenda of every plan owned by the session user.
    pub async fn show_today(&self, args: TodayArgs) -> Result<()> {
        let today = args.date.unwrap_or_else(|| Zoned::now().date());
        let summaries = self
            .engine()
            .list_plans(&ListPlans {
                owner_id: self.session.owner_id().to_string(),
            })
            .await
            .context("Failed to list plans")?;

        let mut agendas = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let agenda = self
                .engine()
                .agenda(&AgendaQuery {
                    plan_id: summary.id,
                    today,
                })
                .await?;
            agendas.push((summary.topic, agenda));
        }
        self.renderer
            .render(&format!("# Agenda for {today}\n\n{}", PlanAgendas(agendas)));
        Ok(())
    }

    pub async fn render_map(&mut self, args: MapArgs) -> Result<()> {
        self.open(args.plan_id).await?;
        let rendered = self
            .engine()
            .render_map(&RenderMap {
                plan_id: args.plan_id,
                style: args.style,
                format: args.format,
                highlight: args.highlight.map(|step| step - 1),
            })
            .await
            .context("Failed to render concept map")?;
        let Some(map) = rendered else {
            bail!("PNG output is not available in this build; use --format svg");
        };

        let output = args.output.unwrap_or_else(|| {
            PathBuf::from(format!(
                "plan-{}-{}.{}",
                args.plan_id,
                map.style,
                map.format.extension()
            ))
        });
        fs::write(&output, &map.bytes)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        let message = format!(
            "Wrote {} {}x{} {} map to {}",
            map.style,
            map.width,
            map.height,
            map.format,
            output.display()
        );
        self.renderer
            .render(&OperationStatus::success(message).to_string());
        Ok(())
    }

    pub async fn ask_tutor(&mut self, args: TutorArgs) -> Result<()> {
        self.open(args.plan_id).await?;
        let answer = self
            .engine()
            .ask_tutor(&AskTutor {
                plan_id: args.plan_id,
                question: args.question,
            })
            .await
            .context("Failed to ask the tutor")?;
        self.renderer.render(&answer.to_string());
        Ok(())
    }
}
