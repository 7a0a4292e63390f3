use crate::config::WorkspaceSettings;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crewload")]
#[command(
    author,
    version,
    about = "Fair workload scoring, reviewer assignment and goal rebalancing for small teams"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .crewload.toml by default)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log every scoring and selection decision
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "CREWLOAD_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new crewload workspace
    Init {
        /// Data directory relative to the workspace root
        #[arg(long, default_value_t = WorkspaceSettings::default().path)]
        path: String,

        /// Length of random ID suffix
        #[arg(long, default_value_t = WorkspaceSettings::default().id_length)]
        id_length: usize,
    },

    /// Manage members
    #[command(visible_alias = "m")]
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Manage tasks
    #[command(visible_alias = "t")]
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Manage projects
    #[command(visible_alias = "p")]
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage goals
    #[command(visible_alias = "g")]
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Show the current workload score of every team member
    Scores {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add the least loaded team member to a task as reviewer
    Review {
        /// Task ID
        task_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign orphaned goals and even out goal load
    Rebalance {
        /// Show the plan without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what makes up each member's score
    Breakdown {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show points gained and shed per day
    Daily {
        /// Trailing window in days, ending today (defaults to report.days)
        #[arg(long)]
        days: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the GraphQL server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,
    },

    /// Execute a GraphQL query
    Query {
        /// GraphQL query string
        query: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Execute a GraphQL mutation (wrapped in `mutation { }`)
    Mutate {
        /// GraphQL mutation body
        mutation: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Remove a workspace lock left behind by a crashed process
    Unlock,
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a member
    Add {
        /// Display name
        name: String,

        /// Exclude from automatic assignments
        #[arg(long)]
        guest: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List members
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a member and their current load
    Show {
        /// Member ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task
    #[command(visible_alias = "new")]
    Create {
        /// Title of the task
        title: String,

        /// Priority level
        #[arg(short, long, value_enum, default_value = "medium")]
        priority: PriorityArg,

        /// Member ID to assign (repeatable)
        #[arg(short, long)]
        assignee: Vec<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Body content (use '-' to read from stdin)
        #[arg(short = 'd', long)]
        body: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tasks
    #[command(visible_alias = "ls")]
    List {
        /// Include done and archived tasks
        #[arg(long)]
        all: bool,

        /// Only tasks assigned to this member
        #[arg(short, long)]
        assignee: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a task
    Show {
        /// Task ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a task as done
    Done {
        /// Task ID
        id: String,
    },

    /// Reopen a done task
    Reopen {
        /// Task ID
        id: String,
    },

    /// Archive a task
    Archive {
        /// Task ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project
    #[command(visible_alias = "new")]
    Create {
        /// Title of the project
        title: String,

        /// Participating member ID (repeatable)
        #[arg(long)]
        participant: Vec<String>,

        /// Owning member ID (repeatable)
        #[arg(long)]
        owner: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List projects
    #[command(visible_alias = "ls")]
    List {
        /// Include archived projects
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Archive a project
    Archive {
        /// Project ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a goal
    #[command(visible_alias = "new")]
    Create {
        /// Title of the goal
        title: String,

        /// Member ID responsible for the goal
        #[arg(short, long)]
        assignee: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List goals
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a goal's status
    Status {
        /// Goal ID
        id: String,

        /// New status
        #[arg(value_enum)]
        status: GoalStatusArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<PriorityArg> for crate::model::Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => crate::model::Priority::Low,
            PriorityArg::Medium => crate::model::Priority::Medium,
            PriorityArg::High => crate::model::Priority::High,
            PriorityArg::Critical => crate::model::Priority::Critical,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GoalStatusArg {
    Active,
    OnHold,
    Done,
    Archived,
}

impl From<GoalStatusArg> for crate::model::GoalStatus {
    fn from(arg: GoalStatusArg) -> Self {
        match arg {
            GoalStatusArg::Active => crate::model::GoalStatus::Active,
            GoalStatusArg::OnHold => crate::model::GoalStatus::OnHold,
            GoalStatusArg::Done => crate::model::GoalStatus::Done,
            GoalStatusArg::Archived => crate::model::GoalStatus::Archived,
        }
    }
}
