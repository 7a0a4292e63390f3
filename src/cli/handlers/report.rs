use crate::assignment::{AssignmentStore, SourceKind, build_breakdown, build_daily};
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use super::CommandContext;

pub fn handle_breakdown(ctx: &CommandContext, json: bool) -> Result<()> {
    let snapshot = ctx.workspace.snapshot()?;
    let breakdown = build_breakdown(
        &snapshot.members,
        &snapshot.tasks,
        &snapshot.projects,
        &snapshot.goals,
        &ctx.aggregator(),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    if breakdown.is_empty() {
        println!("No team members found.");
        return Ok(());
    }
    for entry in &breakdown {
        println!(
            "{} {} {}",
            entry.member_id.cyan(),
            entry.name.bold(),
            format!("({})", entry.total).bold()
        );
        for item in &entry.items {
            let kind = match item.kind {
                SourceKind::Task => "task",
                SourceKind::Project => "project",
                SourceKind::Goal => "goal",
            };
            println!(
                "  {:>2}  {:<8} {} {}",
                item.points,
                kind,
                item.id.cyan(),
                item.title
            );
        }
    }
    Ok(())
}

pub fn handle_daily(ctx: &CommandContext, days: Option<u32>, json: bool) -> Result<()> {
    let days = days.unwrap_or(ctx.config.report.days);
    let snapshot = ctx.workspace.snapshot()?;
    let report = build_daily(&snapshot, days, Utc::now().date_naive(), &ctx.aggregator())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("No team members found.");
        return Ok(());
    }
    println!("Today and daily average over {} day(s)", days);
    for summary in report.values() {
        println!(
            "{} {}  today +{} -{} = {}  avg +{:.2} -{:.2} = {:.2}",
            summary.member_id.cyan(),
            summary.name.bold(),
            summary.today_plus,
            summary.today_minus,
            summary.today_net,
            summary.avg_daily_plus,
            summary.avg_daily_minus,
            summary.avg_daily_net
        );
        for item in &summary.today_plus_items {
            println!("    {} {}", format!("+{}", item.points).green(), item.title);
        }
        for item in &summary.today_minus_items {
            println!("    {} {}", format!("-{}", item.points).red(), item.title);
        }
    }
    Ok(())
}
