mod goal;
mod init;
mod member;
mod mutate;
mod project;
mod query;
mod report;
mod serve;
mod task;
mod unlock;
mod utils;
mod workload;

pub use goal::handle_goal;
pub use init::handle_init;
pub use member::handle_member;
pub use mutate::handle_mutate;
pub use project::handle_project;
pub use query::handle_query;
pub use report::{handle_breakdown, handle_daily};
pub use serve::handle_serve;
pub use task::handle_task;
pub use unlock::handle_unlock;
pub use workload::{handle_rebalance, handle_review, handle_scores};

use crate::assignment::ScoreAggregator;
use crate::config::CrewConfig;
use crate::storage::Workspace;
use std::path::PathBuf;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: CrewConfig,
    pub root: PathBuf,
    pub workspace: Workspace,
}

impl CommandContext {
    pub fn new(config: CrewConfig, root: PathBuf) -> Self {
        let workspace = Workspace::new(&config, &root);
        Self {
            config,
            root,
            workspace,
        }
    }

    pub fn aggregator(&self) -> ScoreAggregator {
        ScoreAggregator::new(self.config.scoring)
    }
}
