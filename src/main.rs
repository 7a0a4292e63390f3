use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use crewload::cli::handlers::{
    handle_breakdown, handle_daily, handle_goal, handle_init, handle_member, handle_mutate,
    handle_project, handle_query, handle_rebalance, handle_review, handle_scores, handle_serve,
    handle_task, handle_unlock,
};
use crewload::cli::{Cli, CommandContext, Commands};
use crewload::config::CrewConfig;
use crewload::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    match cli.command {
        // Init runs before any workspace exists
        Commands::Init { path, id_length } => handle_init(path, id_length),
        command => {
            let ctx = load_context(cli.config.as_deref())?;
            dispatch(ctx, command)
        }
    }
}

fn dispatch(ctx: CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Init { path, id_length } => handle_init(path, id_length),
        Commands::Member { action } => handle_member(&ctx, action),
        Commands::Task { action } => handle_task(&ctx, action),
        Commands::Project { action } => handle_project(&ctx, action),
        Commands::Goal { action } => handle_goal(&ctx, action),
        Commands::Scores { json } => handle_scores(&ctx, json),
        Commands::Review { task_id, json } => handle_review(&ctx, task_id, json),
        Commands::Rebalance { dry_run, json } => handle_rebalance(&ctx, dry_run, json),
        Commands::Breakdown { json } => handle_breakdown(&ctx, json),
        Commands::Daily { days, json } => handle_daily(&ctx, days, json),
        Commands::Serve { port } => handle_serve(ctx, port),
        Commands::Query { query, variables } => handle_query(ctx, query, variables),
        Commands::Mutate {
            mutation,
            variables,
        } => handle_mutate(ctx, mutation, variables),
        Commands::Unlock => handle_unlock(&ctx),
    }
}

fn load_context(config_path: Option<&str>) -> Result<CommandContext> {
    let (config, root) = match config_path {
        Some(path) => CrewConfig::load_from(Path::new(path))
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => {
            let cwd = std::env::current_dir()?;
            CrewConfig::load(&cwd).context("Failed to load crewload configuration")?
        }
    };
    Ok(CommandContext::new(config, root))
}
