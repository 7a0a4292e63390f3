use crate::cli::commands::ProjectAction;
use crate::model::Project;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::file_name;

pub fn handle_project(ctx: &CommandContext, action: ProjectAction) -> Result<()> {
    match action {
        ProjectAction::Create {
            title,
            participant,
            owner,
            json,
        } => {
            let id = ctx.workspace.projects.generate_id();
            let project = Project::new(id, title)
                .with_participants(participant)
                .with_owners(owner);
            let path = ctx.workspace.create_project(&project)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&project)?);
            } else {
                println!("{} {} {}", "Created".green(), project.id.cyan(), file_name(&path));
            }
        }
        ProjectAction::List { all, json } => {
            let mut projects = ctx.workspace.projects.list()?;
            if !all {
                projects.retain(Project::is_active);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else if projects.is_empty() {
                println!("No projects found.");
            } else {
                for project in &projects {
                    let members: Vec<&str> = project.members().into_iter().collect();
                    let state = if project.archived {
                        "archived".dimmed()
                    } else {
                        "active".normal()
                    };
                    println!(
                        "{} {} {} ({})",
                        project.id.cyan(),
                        state,
                        project.title,
                        members.join(", ")
                    );
                }
            }
        }
        ProjectAction::Archive { id } => {
            let mut project = ctx.workspace.projects.get(&id)?;
            project.archived = true;
            ctx.workspace.projects.update(&project)?;
            println!("{} {}", "Archived".green(), project.id.cyan());
        }
    }
    Ok(())
}
