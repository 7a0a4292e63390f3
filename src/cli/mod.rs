//! Command-line interface: clap definitions and one handler per command.

pub mod commands;
pub mod handlers;

pub use commands::{Cli, Commands, GoalAction, MemberAction, ProjectAction, TaskAction};
pub use handlers::CommandContext;
