//! Workload scoring.
//!
//! A member's score is the sum of what every [`WorkloadSource`] attributes
//! to them: open tasks by priority weight, non-archived projects by a fixed
//! weight per distinct member, and live goals by a fixed weight.

use super::{MemberId, ScoreMap};
use crate::config::ScoringWeights;
use crate::model::{Goal, Member, Project, Task};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Task,
    Project,
    Goal,
}

/// Points one item adds to one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution<'a> {
    pub member_id: &'a str,
    pub kind: SourceKind,
    pub item_id: &'a str,
    pub title: &'a str,
    pub points: u32,
}

/// A read-only provider of load contributions.
pub trait WorkloadSource<'a> {
    fn contributions(&self, weights: &ScoringWeights) -> Vec<Contribution<'a>>;
}

/// Open, non-archived tasks weighted by priority, once per assignee.
pub struct TaskLoad<'a>(pub &'a [Task]);

/// Non-archived projects, once per distinct participant or owner.
pub struct ProjectLoad<'a>(pub &'a [Project]);

/// Active and on-hold goals, for their single assignee.
pub struct GoalLoad<'a>(pub &'a [Goal]);

impl<'a> WorkloadSource<'a> for TaskLoad<'a> {
    fn contributions(&self, weights: &ScoringWeights) -> Vec<Contribution<'a>> {
        self.0
            .iter()
            .filter(|task| task.is_active())
            .flat_map(|task| {
                let points = task.priority.weight(weights);
                task.assignees.iter().map(move |member_id| Contribution {
                    member_id,
                    kind: SourceKind::Task,
                    item_id: &task.id,
                    title: &task.title,
                    points,
                })
            })
            .collect()
    }
}

impl<'a> WorkloadSource<'a> for ProjectLoad<'a> {
    fn contributions(&self, weights: &ScoringWeights) -> Vec<Contribution<'a>> {
        self.0
            .iter()
            .filter(|project| project.is_active())
            .flat_map(|project| {
                project.members().into_iter().map(move |member_id| Contribution {
                    member_id,
                    kind: SourceKind::Project,
                    item_id: &project.id,
                    title: &project.title,
                    points: weights.project,
                })
            })
            .collect()
    }
}

impl<'a> WorkloadSource<'a> for GoalLoad<'a> {
    fn contributions(&self, weights: &ScoringWeights) -> Vec<Contribution<'a>> {
        self.0
            .iter()
            .filter(|goal| goal.is_live())
            .filter_map(|goal| {
                goal.assignee.as_deref().map(|member_id| Contribution {
                    member_id,
                    kind: SourceKind::Goal,
                    item_id: &goal.id,
                    title: &goal.title,
                    points: weights.goal,
                })
            })
            .collect()
    }
}

/// Combines every workload source into one score per eligible member.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator {
    weights: ScoringWeights,
}

impl ScoreAggregator {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// All contributions from all sources, including those to non-eligible members.
    pub fn contributions<'a>(
        &self,
        tasks: &'a [Task],
        projects: &'a [Project],
        goals: &'a [Goal],
    ) -> Vec<Contribution<'a>> {
        let sources: [&dyn WorkloadSource<'a>; 3] =
            [&TaskLoad(tasks), &ProjectLoad(projects), &GoalLoad(goals)];
        sources
            .iter()
            .flat_map(|source| source.contributions(&self.weights))
            .collect()
    }

    /// Score for every team member; everyone else is left out.
    ///
    /// Never fails: an empty pool yields an empty map.
    pub fn compute(
        &self,
        members: &[Member],
        tasks: &[Task],
        projects: &[Project],
        goals: &[Goal],
    ) -> ScoreMap {
        let mut scores: ScoreMap = members
            .iter()
            .filter(|m| m.team)
            .map(|m| (m.id.clone(), 0))
            .collect();
        if scores.is_empty() {
            return scores;
        }

        for contribution in self.contributions(tasks, projects, goals) {
            if let Some(score) = scores.get_mut(contribution.member_id) {
                *score += contribution.points;
            }
        }

        tracing::debug!(members = scores.len(), "Computed workload scores");
        scores
    }
}

/// Scores with the default weights.
pub fn compute_scores(
    members: &[Member],
    tasks: &[Task],
    projects: &[Project],
    goals: &[Goal],
) -> ScoreMap {
    ScoreAggregator::default().compute(members, tasks, projects, goals)
}

/// Score of one member, zero when absent.
pub fn score_of(scores: &ScoreMap, member_id: &MemberId) -> u32 {
    scores.get(member_id).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::testing::{goal, member, project, task};
    use crate::model::{GoalStatus, Priority, TaskStatus};

    #[test]
    fn test_three_medium_tasks_score_three() {
        let members = vec![member("m-a")];
        let tasks = vec![
            task("t-1", Priority::Medium, &["m-a"]),
            task("t-2", Priority::Medium, &["m-a"]),
            task("t-3", Priority::Medium, &["m-a"]),
        ];

        let scores = compute_scores(&members, &tasks, &[], &[]);
        assert_eq!(scores.get("m-a"), Some(&3));
    }

    #[test]
    fn test_all_sources_add_up() {
        let members = vec![member("m-a"), member("m-b")];
        let tasks = vec![
            task("t-1", Priority::Critical, &["m-a", "m-b"]),
            task("t-2", Priority::High, &["m-a"]),
            task("t-3", Priority::Low, &["m-b"]),
        ];
        // m-a is both participant and owner but counts once
        let projects = vec![project("p-1", &["m-a"], &["m-a", "m-b"])];
        let goals = vec![goal("g-1", Some("m-b"), None, 0)];

        let scores = compute_scores(&members, &tasks, &projects, &goals);
        assert_eq!(scores["m-a"], 3 + 2 + 2);
        assert_eq!(scores["m-b"], 3 + 1 + 2 + 1);
    }

    #[test]
    fn test_inactive_items_do_not_count() {
        let members = vec![member("m-a")];
        let mut archived_task = task("t-1", Priority::Critical, &["m-a"]);
        archived_task.archived = true;
        let done_task = task("t-2", Priority::High, &["m-a"]).with_status(TaskStatus::Done);
        let mut archived_project = project("p-1", &["m-a"], &[]);
        archived_project.archived = true;
        let done_goal = goal("g-1", Some("m-a"), None, 0).with_status(GoalStatus::Done);
        let on_hold_goal = goal("g-2", Some("m-a"), None, 0).with_status(GoalStatus::OnHold);

        let scores = compute_scores(
            &members,
            &[archived_task, done_task],
            &[archived_project],
            &[done_goal, on_hold_goal],
        );
        assert_eq!(scores["m-a"], 1);
    }

    #[test]
    fn test_non_eligible_members_are_ignored() {
        let members = vec![member("m-a"), member("m-x").with_team(false)];
        let tasks = vec![task("t-1", Priority::High, &["m-a", "m-x", "m-ghost"])];

        let scores = compute_scores(&members, &tasks, &[], &[]);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores["m-a"], 2);
        assert!(!scores.contains_key("m-x"));
        assert!(!scores.contains_key("m-ghost"));
    }

    #[test]
    fn test_empty_pool_gives_empty_map() {
        let tasks = vec![task("t-1", Priority::High, &["m-a"])];
        assert!(compute_scores(&[], &tasks, &[], &[]).is_empty());
    }

    #[test]
    fn test_order_independent() {
        let members = vec![member("m-a"), member("m-b"), member("m-c")];
        let tasks = vec![
            task("t-1", Priority::Critical, &["m-a"]),
            task("t-2", Priority::High, &["m-b", "m-c"]),
            task("t-3", Priority::Low, &["m-c"]),
        ];
        let projects = vec![project("p-1", &["m-a", "m-c"], &[]), project("p-2", &["m-b"], &[])];
        let goals = vec![goal("g-1", Some("m-a"), None, 0), goal("g-2", Some("m-c"), None, 1)];

        let forward = compute_scores(&members, &tasks, &projects, &goals);

        let mut members_rev = members.clone();
        members_rev.reverse();
        let mut tasks_rev = tasks.clone();
        tasks_rev.reverse();
        let mut projects_rev = projects.clone();
        projects_rev.reverse();
        let mut goals_rev = goals.clone();
        goals_rev.reverse();
        let backward = compute_scores(&members_rev, &tasks_rev, &projects_rev, &goals_rev);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringWeights {
            critical: 10,
            project: 0,
            ..ScoringWeights::default()
        };
        let members = vec![member("m-a")];
        let tasks = vec![task("t-1", Priority::Critical, &["m-a"])];
        let projects = vec![project("p-1", &["m-a"], &[])];

        let scores = ScoreAggregator::new(weights).compute(&members, &tasks, &projects, &[]);
        assert_eq!(scores["m-a"], 10);
    }
}
