//! Workload scoring, fair assignment and goal rebalancing.
//!
//! Everything in here computes from an immutable [`Snapshot`] of the
//! workspace. Mutations are requested through [`AssignmentStore`], which
//! serializes concurrent callers via [`AssignmentStore::exclusive`] and
//! commits goal reassignments atomically.
//!
//! - [`score`]: per-member workload scores from tasks, projects and goals
//! - [`select`]: lowest/highest scored member with a deterministic tie-break
//! - [`reviewer`]: add the least loaded member to a task
//! - [`rebalance`]: assign orphaned goals and even out goal load
//! - [`breakdown`]: itemized score per member
//! - [`daily`]: points gained and shed per calendar day

pub mod breakdown;
pub mod daily;
pub mod rebalance;
pub mod reviewer;
pub mod score;
pub mod select;

pub use breakdown::{BreakdownItem, MemberBreakdown, build_breakdown};
pub use daily::{DailyItem, DailySummary, EventKind, build_daily};
pub use rebalance::{
    GoalMove, MovePhase, RebalanceOutcome, RebalancePlan, plan_rebalance, rebalance_goals,
};
pub use reviewer::{assign_reviewer, choose_reviewer};
pub use score::{Contribution, ScoreAggregator, SourceKind, WorkloadSource, compute_scores};
pub use select::{pick_highest, pick_lowest};

use crate::error::Result;
use crate::model::{Goal, Member, Project, Task};
use serde::Serialize;
use std::collections::BTreeMap;

/// Opaque member identifier. Ordering of IDs is the tie-break for every selection.
pub type MemberId = String;

/// Score per eligible member, iterated in member ID order.
pub type ScoreMap = BTreeMap<MemberId, u32>;

/// Everything one operation reads, taken once at entry.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub goals: Vec<Goal>,
}

impl Snapshot {
    /// Members entitled to automatic assignments.
    pub fn eligible_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.team)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn scores(&self, aggregator: &ScoreAggregator) -> ScoreMap {
        aggregator.compute(&self.members, &self.tasks, &self.projects, &self.goals)
    }
}

/// A goal's new assignee, as committed at the end of a rebalance pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalAssignment {
    pub goal_id: String,
    pub member_id: MemberId,
}

/// The collaborator that owns persisted state.
///
/// Reads happen through [`snapshot`](AssignmentStore::snapshot) only; the
/// two mutation commands are the only writes the assignment core requests.
pub trait AssignmentStore {
    /// Held for the whole of a mutating operation; dropping it releases the scope.
    type Guard;

    fn exclusive(&self, operation: &str) -> Result<Self::Guard>;

    fn snapshot(&self) -> Result<Snapshot>;

    fn add_task_assignee(&self, task_id: &str, member_id: &str) -> Result<()>;

    /// Persist all assignments or none of them.
    fn commit_goal_assignments(&self, assignments: &[GoalAssignment]) -> Result<()>;
}
