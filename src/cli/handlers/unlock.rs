use crate::storage::WorkspaceLock;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_unlock(ctx: &CommandContext) -> Result<()> {
    if WorkspaceLock::force_release(ctx.workspace.data_path())? {
        println!("{} workspace lock", "Removed".green());
    } else {
        println!("Workspace is not locked.");
    }
    Ok(())
}
