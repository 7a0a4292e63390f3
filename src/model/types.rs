use crate::config::ScoringWeights;
use crate::error::{CrewError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Points an open task of this priority adds to each assignee.
    pub fn weight(self, weights: &ScoringWeights) -> u32 {
        match self {
            Priority::Low => weights.low,
            Priority::Medium => weights.medium,
            Priority::High => weights.high,
            Priority::Critical => weights.critical,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for Priority {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(CrewError::Parse(format!("Invalid priority: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Open,
    #[serde(rename = "in-progress")]
    InProgress,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "open"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" | "todo" => Ok(TaskStatus::Open),
            "in-progress" | "inprogress" | "in_progress" => Ok(TaskStatus::InProgress),
            "done" | "completed" => Ok(TaskStatus::Done),
            _ => Err(CrewError::Parse(format!("Invalid task status: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    #[serde(rename = "on-hold")]
    OnHold,
    Done,
    Archived,
}

impl GoalStatus {
    /// Active and on-hold goals carry load and take part in rebalancing.
    pub fn is_live(self) -> bool {
        matches!(self, GoalStatus::Active | GoalStatus::OnHold)
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::Active => write!(f, "active"),
            GoalStatus::OnHold => write!(f, "on-hold"),
            GoalStatus::Done => write!(f, "done"),
            GoalStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for GoalStatus {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "on-hold" | "onhold" | "on_hold" => Ok(GoalStatus::OnHold),
            "done" | "completed" => Ok(GoalStatus::Done),
            "archived" => Ok(GoalStatus::Archived),
            _ => Err(CrewError::Parse(format!("Invalid goal status: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(Priority::Low.weight(&weights), 1);
        assert_eq!(Priority::Medium.weight(&weights), 1);
        assert_eq!(Priority::High.weight(&weights), 2);
        assert_eq!(Priority::Critical.weight(&weights), 3);
    }

    #[test]
    fn test_status_aliases() {
        assert_eq!("completed".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert_eq!("ON_HOLD".parse::<GoalStatus>().unwrap(), GoalStatus::OnHold);
        assert!("paused".parse::<GoalStatus>().is_err());
    }

    #[test]
    fn test_live_goal_statuses() {
        assert!(GoalStatus::Active.is_live());
        assert!(GoalStatus::OnHold.is_live());
        assert!(!GoalStatus::Done.is_live());
        assert!(!GoalStatus::Archived.is_live());
    }
}
