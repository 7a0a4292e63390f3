use crate::assignment::{self, AssignmentStore, MovePhase};
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_scores(ctx: &CommandContext, json: bool) -> Result<()> {
    let snapshot = ctx.workspace.snapshot()?;
    let scores = snapshot.scores(&ctx.aggregator());

    if json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    if scores.is_empty() {
        println!("No team members found.");
        return Ok(());
    }
    for member in snapshot.eligible_members() {
        let score = scores.get(&member.id).copied().unwrap_or(0);
        println!(
            "{:>4}  {} {}",
            score.to_string().bold(),
            member.id.cyan(),
            member.name
        );
    }
    Ok(())
}

pub fn handle_review(ctx: &CommandContext, task_id: String, json: bool) -> Result<()> {
    let picked = assignment::assign_reviewer(&ctx.workspace, &ctx.aggregator(), &task_id)?;

    if json {
        let value = serde_json::json!({ "task_id": task_id, "reviewer": picked });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match picked {
        Some(member_id) => println!(
            "{} {} to {}",
            "Assigned".green(),
            member_id.cyan(),
            task_id.cyan()
        ),
        None => println!("{}", "No team members available, nobody assigned".yellow()),
    }
    Ok(())
}

pub fn handle_rebalance(ctx: &CommandContext, dry_run: bool, json: bool) -> Result<()> {
    let outcome = assignment::rebalance_goals(
        &ctx.workspace,
        &ctx.aggregator(),
        &ctx.config.rebalance,
        dry_run,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if dry_run {
        println!("{}", "Dry run, nothing written".yellow());
    }
    for m in &outcome.moves {
        let from = m.from.as_deref().unwrap_or("nobody");
        let phase = match m.phase {
            MovePhase::Initial => "assign",
            MovePhase::Equalize => "move",
        };
        println!(
            "  {:<6} {} {} -> {}",
            phase,
            m.goal_id.cyan(),
            from.dimmed(),
            m.to.cyan()
        );
    }
    println!(
        "{} {} orphaned, {} moved",
        "Rebalanced".green(),
        outcome.assigned,
        outcome.rebalanced
    );
    Ok(())
}
