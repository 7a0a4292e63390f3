use crate::assignment::{AssignmentStore, build_breakdown};
use crate::cli::commands::MemberAction;
use crate::model::Member;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{file_name, print_member_list};

pub fn handle_member(ctx: &CommandContext, action: MemberAction) -> Result<()> {
    match action {
        MemberAction::Add { name, guest, json } => {
            let id = ctx.workspace.members.generate_id();
            let member = Member::new(id, name).with_team(!guest);
            let path = ctx.workspace.create_member(&member)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&member)?);
            } else {
                println!("{} {} {}", "Added".green(), member.id.cyan(), file_name(&path));
            }
        }
        MemberAction::List { json } => {
            let members = ctx.workspace.members.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&members)?);
            } else {
                print_member_list(&members);
            }
        }
        MemberAction::Show { id, json } => {
            let member = ctx.workspace.members.get(&id)?;
            let snapshot = ctx.workspace.snapshot()?;
            let load = build_breakdown(
                &snapshot.members,
                &snapshot.tasks,
                &snapshot.projects,
                &snapshot.goals,
                &ctx.aggregator(),
            )
            .into_iter()
            .find(|b| b.member_id == member.id);

            if json {
                let value = serde_json::json!({
                    "member": member,
                    "load": load,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("{} {}", member.id.cyan().bold(), member.name.bold());
            println!(
                "Team:    {}",
                if member.team { "yes".green() } else { "no".dimmed() }
            );
            match load {
                Some(load) => {
                    println!("Score:   {}", load.total.to_string().bold());
                    for item in &load.items {
                        println!(
                            "  {:>2}  {} {}",
                            item.points,
                            item.id.cyan(),
                            item.title
                        );
                    }
                }
                None => println!("Score:   {}", "not scored (guest)".dimmed()),
            }
        }
    }
    Ok(())
}
