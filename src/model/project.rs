use super::Record;
use crate::error::Result;
use crate::validation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub archived: bool,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub participants: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub owners: BTreeSet<String>,

    #[serde(default)]
    pub created: DateTime<Utc>,

    #[serde(skip)]
    pub body: String,
}

impl Project {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            archived: false,
            participants: BTreeSet::new(),
            owners: BTreeSet::new(),
            created: Utc::now(),
            body: String::new(),
        }
    }

    pub fn with_participants<I: IntoIterator<Item = String>>(mut self, participants: I) -> Self {
        self.participants = participants.into_iter().collect();
        self
    }

    pub fn with_owners<I: IntoIterator<Item = String>>(mut self, owners: I) -> Self {
        self.owners = owners.into_iter().collect();
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub fn is_active(&self) -> bool {
        !self.archived
    }

    /// Participants and owners, each member counted once.
    pub fn members(&self) -> BTreeSet<&str> {
        self.participants
            .iter()
            .chain(self.owners.iter())
            .map(String::as_str)
            .collect()
    }
}

impl Record for Project {
    const KIND: &'static str = "project";
    const DIR: &'static str = "projects";
    const PREFIX: &'static str = "p-";

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
        for member in self.members() {
            validation::validate_id(member)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_deduplicates_owner_and_participant() {
        let project = Project::new("p-1".to_string(), "Album".to_string())
            .with_participants(["m-a".to_string(), "m-b".to_string()])
            .with_owners(["m-a".to_string()]);
        let members: Vec<_> = project.members().into_iter().collect();
        assert_eq!(members, vec!["m-a", "m-b"]);
    }
}
