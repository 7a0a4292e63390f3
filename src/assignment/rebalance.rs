//! Goal rebalancing.
//!
//! One pass runs `Scoring -> InitialAssignment -> EqualizationLoop -> Done`:
//!
//! 1. score every eligible member (live goals already count once),
//! 2. hand orphaned goals, most urgent first, to the least loaded member,
//! 3. move the least urgent goal from the most to the least loaded member
//!    until the gap is within the policy threshold, no goal can move, or the
//!    move budget (`move_factor` x live goals) is spent.
//!
//! Planning is pure. [`rebalance_goals`] wraps it in the store's exclusive
//! scope and commits the resulting assignments in one transaction.

use super::score::{ScoreAggregator, score_of};
use super::select::{pick_highest, pick_lowest};
use super::{AssignmentStore, GoalAssignment, MemberId, ScoreMap, Snapshot};
use crate::config::RebalancePolicy;
use crate::error::Result;
use crate::model::Goal;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePhase {
    Initial,
    Equalize,
}

/// One reassignment decided during planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalMove {
    pub goal_id: String,
    pub from: Option<MemberId>,
    pub to: MemberId,
    pub phase: MovePhase,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RebalancePlan {
    /// Final assignee of every goal whose assignee changed.
    pub assignments: Vec<GoalAssignment>,
    /// Every move in the order it was decided.
    pub moves: Vec<GoalMove>,
    pub assigned: usize,
    pub rebalanced: usize,
    /// Equalization iterations used, never more than the move budget.
    pub iterations: usize,
    pub scores_before: ScoreMap,
    pub scores_after: ScoreMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct RebalanceOutcome {
    pub assigned: usize,
    pub rebalanced: usize,
    pub dry_run: bool,
    pub moves: Vec<GoalMove>,
    pub scores: ScoreMap,
}

impl RebalancePlan {
    fn into_outcome(self, dry_run: bool) -> RebalanceOutcome {
        RebalanceOutcome {
            assigned: self.assigned,
            rebalanced: self.rebalanced,
            dry_run,
            moves: self.moves,
            scores: self.scores_after,
        }
    }

    /// Spread between the most and least loaded member after the pass.
    pub fn final_gap(&self) -> u32 {
        let max = self.scores_after.values().max().copied().unwrap_or(0);
        let min = self.scores_after.values().min().copied().unwrap_or(0);
        max - min
    }
}

/// Decide every goal reassignment for one pass without touching storage.
pub fn plan_rebalance(
    snapshot: &Snapshot,
    aggregator: &ScoreAggregator,
    policy: &RebalancePolicy,
) -> RebalancePlan {
    let eligible: BTreeSet<&str> = snapshot.eligible_members().map(|m| m.id.as_str()).collect();
    if eligible.is_empty() {
        tracing::info!("No eligible members, nothing to rebalance");
        return RebalancePlan::default();
    }

    // Scoring
    let goal_weight = aggregator.weights().goal;
    let mut scores = snapshot.scores(aggregator);
    let scores_before = scores.clone();

    // Working copy of live goals; assignees change here, never in the snapshot
    let mut goals: Vec<Goal> = snapshot.goals.iter().filter(|g| g.is_live()).cloned().collect();
    let mut moves = Vec::new();

    // InitialAssignment
    let mut orphans: Vec<usize> = goals
        .iter()
        .enumerate()
        .filter(|(_, g)| !g.assignee.as_deref().is_some_and(|a| eligible.contains(a)))
        .map(|(index, _)| index)
        .collect();
    orphans.sort_by(|&a, &b| {
        goals[a]
            .cmp_urgency(&goals[b])
            .then_with(|| goals[a].id.cmp(&goals[b].id))
    });

    let mut assigned = 0;
    for index in orphans {
        let Some(target) = pick_lowest(&scores).cloned() else {
            break;
        };
        let goal = &mut goals[index];
        tracing::debug!(goal = %goal.id, member = %target, "Assigning orphaned goal");
        moves.push(GoalMove {
            goal_id: goal.id.clone(),
            from: goal.assignee.clone(),
            to: target.clone(),
            phase: MovePhase::Initial,
        });
        goal.assignee = Some(target.clone());
        *scores.entry(target).or_insert(0) += goal_weight;
        assigned += 1;
    }

    // EqualizationLoop
    let mut rebalanced = 0;
    let mut iterations = 0;
    if eligible.len() >= 2 && !goals.is_empty() {
        let budget = goals.len().saturating_mul(policy.move_factor);
        while iterations < budget {
            iterations += 1;

            let (Some(high), Some(low)) =
                (pick_highest(&scores).cloned(), pick_lowest(&scores).cloned())
            else {
                break;
            };
            let gap = score_of(&scores, &high).saturating_sub(score_of(&scores, &low));
            if gap <= policy.threshold {
                break;
            }

            // Least urgent goal of the most loaded member
            let Some(goal) = goals
                .iter_mut()
                .filter(|g| g.assignee.as_deref() == Some(high.as_str()))
                .max_by(|a, b| a.cmp_urgency(b).then_with(|| a.id.cmp(&b.id)))
            else {
                tracing::debug!(member = %high, "Most loaded member holds no movable goal");
                break;
            };

            tracing::debug!(goal = %goal.id, from = %high, to = %low, gap, "Moving goal");
            moves.push(GoalMove {
                goal_id: goal.id.clone(),
                from: Some(high.clone()),
                to: low.clone(),
                phase: MovePhase::Equalize,
            });
            goal.assignee = Some(low.clone());
            if let Some(score) = scores.get_mut(&high) {
                *score = score.saturating_sub(goal_weight);
            }
            *scores.entry(low).or_insert(0) += goal_weight;
            rebalanced += 1;
        }
    }

    // Only goals whose final assignee differs from the snapshot need writing
    let mut assignments: Vec<GoalAssignment> = goals
        .iter()
        .filter_map(|goal| {
            let original = snapshot.goals.iter().find(|g| g.id == goal.id)?;
            match &goal.assignee {
                Some(member_id) if original.assignee.as_ref() != Some(member_id) => {
                    Some(GoalAssignment {
                        goal_id: goal.id.clone(),
                        member_id: member_id.clone(),
                    })
                }
                _ => None,
            }
        })
        .collect();
    assignments.sort_by(|a, b| a.goal_id.cmp(&b.goal_id));

    RebalancePlan {
        assignments,
        moves,
        assigned,
        rebalanced,
        iterations,
        scores_before,
        scores_after: scores,
    }
}

/// Run a full rebalance pass against the store.
///
/// With `dry_run` the plan is computed and reported but nothing is written.
/// A failed commit leaves every goal as it was.
pub fn rebalance_goals<S: AssignmentStore>(
    store: &S,
    aggregator: &ScoreAggregator,
    policy: &RebalancePolicy,
    dry_run: bool,
) -> Result<RebalanceOutcome> {
    let _guard = store.exclusive("rebalance")?;
    let snapshot = store.snapshot()?;

    let plan = plan_rebalance(&snapshot, aggregator, policy);

    if !dry_run && !plan.assignments.is_empty() {
        store.commit_goal_assignments(&plan.assignments)?;
    }

    tracing::info!(
        assigned = plan.assigned,
        rebalanced = plan.rebalanced,
        written = plan.assignments.len(),
        dry_run,
        "Rebalance finished"
    );
    Ok(plan.into_outcome(dry_run))
}
