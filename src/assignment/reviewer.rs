use super::score::ScoreAggregator;
use super::select::pick_lowest;
use super::{AssignmentStore, MemberId, Snapshot};
use crate::error::{CrewError, Result};

/// Least loaded eligible member across the whole workspace, if any.
pub fn choose_reviewer(snapshot: &Snapshot, aggregator: &ScoreAggregator) -> Option<MemberId> {
    let scores = snapshot.scores(aggregator);
    let picked = pick_lowest(&scores).cloned();
    if let Some(member_id) = &picked {
        tracing::debug!(member = %member_id, score = scores[member_id], "Picked reviewer");
    }
    picked
}

/// Add the least loaded team member to a task's assignees.
///
/// Returns the chosen member, or `None` when nobody is eligible. Assigning a
/// member who is already on the task changes nothing, so repeated calls on an
/// unchanged workspace are idempotent.
pub fn assign_reviewer<S: AssignmentStore>(
    store: &S,
    aggregator: &ScoreAggregator,
    task_id: &str,
) -> Result<Option<MemberId>> {
    let _guard = store.exclusive("assign-reviewer")?;
    let snapshot = store.snapshot()?;

    let task = snapshot
        .task(task_id)
        .ok_or_else(|| CrewError::NotFound(format!("task {}", task_id)))?;

    let Some(member_id) = choose_reviewer(&snapshot, aggregator) else {
        tracing::info!(task = %task_id, "No eligible members, reviewer not assigned");
        return Ok(None);
    };

    if task.assignees.contains(&member_id) {
        tracing::debug!(task = %task_id, member = %member_id, "Reviewer already assigned");
        return Ok(Some(member_id));
    }

    store.add_task_assignee(task_id, &member_id)?;
    tracing::info!(task = %task_id, member = %member_id, "Assigned reviewer");
    Ok(Some(member_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::testing::{MemoryStore, goal, member, project, task};
    use crate::model::Priority;

    fn store() -> MemoryStore {
        MemoryStore::new(Snapshot {
            members: vec![member("m-a"), member("m-b"), member("m-c")],
            tasks: vec![
                task("t-1", Priority::High, &["m-a"]),
                task("t-review", Priority::Low, &[]),
            ],
            projects: vec![project("p-1", &["m-b"], &[])],
            goals: vec![goal("g-1", Some("m-c"), None, 0)],
        })
    }

    #[test]
    fn test_assigns_least_loaded_member() {
        let store = store();
        let picked = assign_reviewer(&store, &ScoreAggregator::default(), "t-review").unwrap();

        // m-a = 2, m-b = 2, m-c = 1
        assert_eq!(picked.as_deref(), Some("m-c"));
        let state = store.state.borrow();
        assert!(state.task("t-review").unwrap().assignees.contains("m-c"));
    }

    #[test]
    fn test_second_call_is_a_no_op() {
        let store = MemoryStore::new(Snapshot {
            members: vec![member("m-a"), member("m-b")],
            tasks: vec![
                task("t-1", Priority::Critical, &["m-b"]),
                task("t-2", Priority::High, &["m-b"]),
                task("t-review", Priority::Low, &[]),
            ],
            ..Default::default()
        });
        let aggregator = ScoreAggregator::default();

        let first = assign_reviewer(&store, &aggregator, "t-review").unwrap();
        let after_first = store.state.borrow().task("t-review").unwrap().assignees.clone();
        let second = assign_reviewer(&store, &aggregator, "t-review").unwrap();
        let after_second = store.state.borrow().task("t-review").unwrap().assignees.clone();

        assert_eq!(first.as_deref(), Some("m-a"));
        assert_eq!(second, first);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_choice_is_deterministic_for_a_snapshot() {
        let snapshot = store().snapshot().unwrap();
        let aggregator = ScoreAggregator::default();
        let first = choose_reviewer(&snapshot, &aggregator);
        assert_eq!(choose_reviewer(&snapshot, &aggregator), first);
    }

    #[test]
    fn test_already_assigned_member_is_not_added_twice() {
        let store = MemoryStore::new(Snapshot {
            members: vec![member("m-a"), member("m-b")],
            tasks: vec![
                task("t-1", Priority::Critical, &["m-b"]),
                task("t-review", Priority::Low, &["m-a"]),
            ],
            ..Default::default()
        });

        // Low tasks weigh 1, so m-a (1) is still below m-b (3)
        let picked = assign_reviewer(&store, &ScoreAggregator::default(), "t-review").unwrap();
        assert_eq!(picked.as_deref(), Some("m-a"));
        let state = store.state.borrow();
        assert_eq!(state.task("t-review").unwrap().assignees.len(), 1);
    }

    #[test]
    fn test_empty_pool_returns_none_without_mutation() {
        let store = MemoryStore::new(Snapshot {
            members: vec![member("m-a").with_team(false)],
            tasks: vec![task("t-review", Priority::Low, &[])],
            ..Default::default()
        });

        let picked = assign_reviewer(&store, &ScoreAggregator::default(), "t-review").unwrap();
        assert_eq!(picked, None);
        assert!(store.state.borrow().tasks[0].assignees.is_empty());
    }

    #[test]
    fn test_unknown_task_is_not_found() {
        let store = store();
        let result = assign_reviewer(&store, &ScoreAggregator::default(), "t-nope");
        assert!(matches!(result, Err(CrewError::NotFound(_))));
    }

    #[test]
    fn test_refuses_to_run_while_locked() {
        let store = store();
        let _held = store.exclusive("rebalance").unwrap();
        let result = assign_reviewer(&store, &ScoreAggregator::default(), "t-review");
        assert!(matches!(result, Err(CrewError::Locked(_))));
    }
}
