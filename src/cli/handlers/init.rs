use crate::config::{CONFIG_FILE_NAME, CrewConfig, WorkspaceSettings};
use crate::error::CrewError;
use crate::storage::Workspace;
use anyhow::Result;
use colored::Colorize;

pub fn handle_init(path: String, id_length: usize) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Err(CrewError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let config = CrewConfig {
        crewload: WorkspaceSettings { path, id_length },
        ..Default::default()
    };
    config.validate()?;

    let workspace = Workspace::new(&config, &cwd);
    workspace.init()?;
    config.save(&config_path)?;

    println!(
        "{} crewload workspace in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config: {}", config_path.display());
    println!("  Data:   {}", workspace.data_path().display());

    Ok(())
}
