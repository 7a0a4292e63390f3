//! Data models for a crewload workspace.
//!
//! - [`Member`]: someone who can carry work
//! - [`Task`]: a discrete unit of work weighted by [`Priority`]
//! - [`Project`]: a membership that loads every participant and owner
//! - [`Goal`]: a long-running goal with a single assignee
//!
//! All of them are [`Record`]s and live as markdown files in the workspace.

mod goal;
mod member;
mod project;
mod task;
mod types;

pub use goal::Goal;
pub use member::Member;
pub use project::Project;
pub use task::Task;
pub use types::{GoalStatus, Priority, TaskStatus};

use crate::error::Result;
use serde::{Serialize, de::DeserializeOwned};

/// A workspace entity stored as one markdown file per record.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Human readable kind, used in messages.
    const KIND: &'static str;
    /// Subdirectory of the data path holding this kind.
    const DIR: &'static str;
    /// ID prefix for generated IDs.
    const PREFIX: &'static str;

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn body(&self) -> &str;
    fn set_body(&mut self, body: String);
    fn validate(&self) -> Result<()>;
}
