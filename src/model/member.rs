use super::Record;
use crate::error::Result;
use crate::validation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Someone who can carry work. Only `team` members receive automatic assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,

    #[serde(default = "default_team")]
    pub team: bool,

    #[serde(default)]
    pub created: DateTime<Utc>,

    #[serde(skip)]
    pub body: String,
}

fn default_team() -> bool {
    true
}

impl Member {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            team: true,
            created: Utc::now(),
            body: String::new(),
        }
    }

    pub fn with_team(mut self, team: bool) -> Self {
        self.team = team;
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }
}

impl Record for Member {
    const KIND: &'static str = "member";
    const DIR: &'static str = "members";
    const PREFIX: &'static str = "m-";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn set_body(&mut self, body: String) {
        self.body = body;
    }

    fn validate(&self) -> Result<()> {
        validation::validate_id(&self.id)?;
        validation::validate_title(&self.name)?;
        validation::validate_body(&self.body)
    }
}
