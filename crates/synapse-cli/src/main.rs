//! Synapse command-line application.
//!
//! One invocation is one session: `--user` names the owner, and plans owned
//! by someone else open read-only.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use synapse_core::{EngineBuilder, GeneratorConfig, Session};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        demo,
        language,
        command,
    } = Args::parse();

    let mut config = GeneratorConfig::from_env().context("Invalid generator configuration")?;
    config.demo_mode |= demo;

    let mut builder = EngineBuilder::new()
        .with_database_path(database_file)
        .with_generator_config(config);
    if let Some(language) = language {
        builder = builder.with_language(language);
    }
    let engine = builder.build().await.context("Failed to initialize engine")?;

    info!(
        "Synapse started (generator {})",
        if engine.has_generator() { "online" } else { "offline" }
    );

    let mut cli = Cli::new(Session::new(engine, user), TerminalRenderer::new(!no_color));
    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(Progress(args)) => cli.show_progress(args.plan_id).await,
        Some(Today(args)) => cli.show_today(args).await,
        Some(Map(args)) => cli.render_map(args).await,
        Some(Tutor(args)) => cli.ask_tutor(args).await,
        None => cli.list_plans().await,
    }
}
