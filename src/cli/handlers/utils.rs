use crate::model::{Goal, GoalStatus, Member, Priority, Task, TaskStatus};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use std::io::{self, Read};
use std::path::Path;

/// Resolve body content from the CLI arg, reading stdin for '-'
pub fn resolve_body(body: Option<String>) -> Result<Option<String>> {
    match body {
        Some(b) if b == "-" => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(Some(content.trim().to_string()))
        }
        other => Ok(other),
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn format_priority(priority: Priority) -> ColoredString {
    let label = priority.to_string();
    match priority {
        Priority::Critical => label.red().bold(),
        Priority::High => label.yellow(),
        Priority::Medium => label.normal(),
        Priority::Low => label.dimmed(),
    }
}

pub fn format_task_status(status: TaskStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        TaskStatus::Open => label.normal(),
        TaskStatus::InProgress => label.yellow(),
        TaskStatus::Done => label.green(),
    }
}

pub fn format_goal_status(status: GoalStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        GoalStatus::Active => label.normal(),
        GoalStatus::OnHold => label.yellow(),
        GoalStatus::Done => label.green(),
        GoalStatus::Archived => label.dimmed(),
    }
}

fn format_assignees<'a, I: IntoIterator<Item = &'a String>>(ids: I) -> String {
    let ids: Vec<&str> = ids.into_iter().map(String::as_str).collect();
    if ids.is_empty() {
        "-".dimmed().to_string()
    } else {
        ids.join(", ")
    }
}

pub fn print_member_list(members: &[Member]) {
    if members.is_empty() {
        println!("No members found.");
        return;
    }

    for member in members {
        let role = if member.team { "team".green() } else { "guest".dimmed() };
        println!("{} [{}] {}", member.id.cyan(), role, member.name);
    }
}

pub fn print_task(task: &Task) {
    println!("{} {}", task.id.cyan().bold(), task.title.bold());
    println!("Status:    {}", format_task_status(task.status));
    println!("Priority:  {}", format_priority(task.priority));
    println!("Assignees: {}", format_assignees(&task.assignees));
    if let Some(due) = task.due {
        println!("Due:       {}", due);
    }
    if task.archived {
        println!("Archived:  {}", "yes".dimmed());
    }
    println!(
        "Created:   {}",
        task.created.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );
    if let Some(completed) = task.completed {
        println!(
            "Completed: {}",
            completed.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
    }

    if !task.body.is_empty() {
        println!();
        println!("{}", task.body);
    }
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    for task in tasks {
        println!(
            "{} {} [{}] {} ({})",
            task.id.cyan(),
            format_task_status(task.status),
            format_priority(task.priority),
            task.title,
            format_assignees(&task.assignees)
        );
    }
}

pub fn print_goal_list(goals: &[Goal]) {
    if goals.is_empty() {
        println!("No goals found.");
        return;
    }

    for goal in goals {
        let due = goal
            .due
            .map(|d| d.to_string())
            .unwrap_or_else(|| "no due date".to_string());
        println!(
            "{} {} {} ({}, {})",
            goal.id.cyan(),
            format_goal_status(goal.status),
            goal.title,
            format_assignees(&goal.assignee),
            due.dimmed()
        );
    }
}
