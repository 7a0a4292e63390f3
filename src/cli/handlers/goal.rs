use crate::cli::commands::GoalAction;
use crate::model::{Goal, GoalStatus};
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{file_name, format_goal_status, print_goal_list};

pub fn handle_goal(ctx: &CommandContext, action: GoalAction) -> Result<()> {
    match action {
        GoalAction::Create {
            title,
            assignee,
            due,
            json,
        } => {
            let id = ctx.workspace.goals.generate_id();
            let goal = Goal::new(id, title).with_assignee(assignee).with_due(due);
            let path = ctx.workspace.create_goal(&goal)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&goal)?);
            } else {
                println!("{} {} {}", "Created".green(), goal.id.cyan(), file_name(&path));
            }
        }
        GoalAction::List { json } => {
            let goals = ctx.workspace.goals.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&goals)?);
            } else {
                print_goal_list(&goals);
            }
        }
        GoalAction::Status { id, status } => {
            let mut goal = ctx.workspace.goals.get(&id)?;
            let status: GoalStatus = status.into();
            goal.status = status;
            ctx.workspace.goals.update(&goal)?;
            println!(
                "{} {} is now {}",
                "Updated".green(),
                goal.id.cyan(),
                format_goal_status(status)
            );
        }
    }
    Ok(())
}
