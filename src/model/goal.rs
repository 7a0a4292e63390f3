use super::Record;
use super::types::GoalStatus;
use crate::error::Result;
use crate::validation;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A long-running growth goal owned by at most one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub status: GoalStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,

    #[serde(default)]
    pub created: DateTime<Utc>,

    #[serde(skip)]
    pub body: String,
}

impl Goal {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            status: GoalStatus::default(),
            assignee: None,
            due: None,
            created: Utc::now(),
            body: String::new(),
        }
    }

    pub fn with_status(mut self, status: GoalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_assignee(mut self, assignee: Option<String>) -> Self {
        self.assignee = assignee;
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

    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    /// Urgency order: earlier due first, a missing due date sorts last, then older first.
    pub fn cmp_urgency(&self, other: &Goal) -> Ordering {
        let due = |g: &Goal| g.due.unwrap_or(NaiveDate::MAX);
        due(self)
            .cmp(&due(other))
            .then_with(|| self.created.cmp(&other.created))
    }
}

impl Record for Goal {
    const KIND: &'static str = "goal";
    const DIR: &'static str = "goals";
    const PREFIX: &'static str = "g-";

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
        if let Some(assignee) = &self.assignee {
            validation::validate_id(assignee)?;
        }
        Ok(())
    }
}
