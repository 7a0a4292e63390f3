use super::Record;
use super::types::{Priority, TaskStatus};
use crate::error::Result;
use crate::validation;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub archived: bool,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub assignees: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,

    #[serde(default)]
    pub created: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub body: String,
}

impl Task {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            priority: Priority::default(),
            status: TaskStatus::default(),
            archived: false,
            assignees: BTreeSet::new(),
            due: None,
            created: Utc::now(),
            completed: None,
            body: String::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_assignees<I: IntoIterator<Item = String>>(mut self, assignees: I) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    pub fn with_due(mut self, due: Option<NaiveDate>) -> Self {
        self.due = due;
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = body;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Open and not archived: the only tasks that count towards a score.
    pub fn is_active(&self) -> bool {
        !self.archived && !self.is_closed()
    }

    /// Returns false when the member was already assigned.
    pub fn add_assignee(&mut self, member_id: &str) -> bool {
        self.assignees.insert(member_id.to_string())
    }

    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.status = TaskStatus::Done;
        self.completed = Some(at);
    }

    pub fn reopen(&mut self) {
        self.status = TaskStatus::Open;
        self.completed = None;
    }
}

impl Record for Task {
    const KIND: &'static str = "task";
    const DIR: &'static str = "tasks";
    const PREFIX: &'static str = "t-";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn set_body(&mut self, body: String) {
        self.body = body;
    }

    fn validate(&self) -> Result<()> {
        validation::validate_id(&self.id)?;
        validation::validate_title(&self.title)?;
        validation::validate_body(&self.body)?;
        for member in &self.assignees {
            validation::validate_id(member)?;
        }
        Ok(())
    }
}
