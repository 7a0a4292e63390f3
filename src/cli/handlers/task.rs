use crate::cli::commands::TaskAction;
use crate::model::{Task, TaskStatus};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;

use super::CommandContext;
use super::utils::{file_name, print_task, print_task_list, resolve_body};

pub fn handle_task(ctx: &CommandContext, action: TaskAction) -> Result<()> {
    match action {
        TaskAction::Create {
            title,
            priority,
            assignee,
            due,
            body,
            json,
        } => {
            let id = ctx.workspace.tasks.generate_id();
            let mut task = Task::new(id, title)
                .with_priority(priority.into())
                .with_assignees(assignee)
                .with_due(due);
            if let Some(b) = resolve_body(body)? {
                task = task.with_body(b);
            }

            let path = ctx.workspace.create_task(&task)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                println!("{} {} {}", "Created".green(), task.id.cyan(), file_name(&path));
            }
        }
        TaskAction::List {
            all,
            assignee,
            json,
        } => {
            let mut tasks = ctx.workspace.tasks.list()?;
            if !all {
                tasks.retain(Task::is_active);
            }
            if let Some(ref member_id) = assignee {
                tasks.retain(|t| t.assignees.contains(member_id));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print_task_list(&tasks);
            }
        }
        TaskAction::Show { id, json } => {
            let task = ctx.workspace.tasks.get(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                print_task(&task);
            }
        }
        TaskAction::Done { id } => {
            let mut task = ctx.workspace.tasks.get(&id)?;
            if task.status == TaskStatus::Done {
                println!("{} {} is already done", "Unchanged".yellow(), task.id.cyan());
                return Ok(());
            }
            task.complete(Utc::now());
            ctx.workspace
                .tasks
                .update(&task)
                .with_context(|| format!("Failed to complete task {}", task.id))?;
            println!("{} {} {}", "Done".green(), task.id.cyan(), task.title);
        }
        TaskAction::Reopen { id } => {
            let mut task = ctx.workspace.tasks.get(&id)?;
            task.reopen();
            ctx.workspace.tasks.update(&task)?;
            println!("{} {} {}", "Reopened".green(), task.id.cyan(), task.title);
        }
        TaskAction::Archive { id } => {
            let mut task = ctx.workspace.tasks.get(&id)?;
            task.archived = true;
            ctx.workspace.tasks.update(&task)?;
            println!("{} {}", "Archived".green(), task.id.cyan());
        }
    }
    Ok(())
}
