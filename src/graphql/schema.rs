use std::path::PathBuf;
use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Schema};
use chrono::Utc;

use crate::assignment::{self, AssignmentStore, ScoreAggregator};
use crate::config::CrewConfig;
use crate::storage::Workspace;

use super::types::*;

pub type CrewSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct AppState {
    pub config: CrewConfig,
    pub project_root: PathBuf,
}

impl AppState {
    fn workspace(&self) -> Workspace {
        Workspace::new(&self.config, &self.project_root)
    }

    fn aggregator(&self) -> ScoreAggregator {
        ScoreAggregator::new(self.config.scoring)
    }
}

pub fn build_schema(config: CrewConfig, project_root: PathBuf) -> CrewSchema {
    let state = Arc::new(AppState {
        config,
        project_root,
    });

    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

fn state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<AppState>> {
    ctx.data::<Arc<AppState>>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All members, team or not
    async fn members(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Member>> {
        let members = state(ctx)?.workspace().members.list()?;
        Ok(members.into_iter().map(Into::into).collect())
    }

    /// Tasks, without archived ones unless asked for
    async fn tasks(
        &self,
        ctx: &Context<'_>,
        include_archived: Option<bool>,
    ) -> async_graphql::Result<Vec<Task>> {
        let mut tasks = state(ctx)?.workspace().tasks.list()?;
        if !include_archived.unwrap_or(false) {
            tasks.retain(|t| !t.archived);
        }
        Ok(tasks.into_iter().map(Into::into).collect())
    }

    async fn projects(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Project>> {
        let projects = state(ctx)?.workspace().projects.list()?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    async fn goals(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Goal>> {
        let goals = state(ctx)?.workspace().goals.list()?;
        Ok(goals.into_iter().map(Into::into).collect())
    }

    /// Current workload score of every team member
    async fn scores(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ScoreEntry>> {
        let state = state(ctx)?;
        let snapshot = state.workspace().snapshot()?;
        Ok(snapshot
            .scores(&state.aggregator())
            .into_iter()
            .map(|(member_id, score)| ScoreEntry { member_id, score })
            .collect())
    }

    /// Itemized scores, most loaded member first
    async fn breakdown(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<MemberBreakdown>> {
        let state = state(ctx)?;
        let snapshot = state.workspace().snapshot()?;
        let breakdown = assignment::build_breakdown(
            &snapshot.members,
            &snapshot.tasks,
            &snapshot.projects,
            &snapshot.goals,
            &state.aggregator(),
        );
        Ok(breakdown.into_iter().map(Into::into).collect())
    }

    /// Points gained and shed over the trailing window ending today (UTC)
    async fn daily(
        &self,
        ctx: &Context<'_>,
        days: Option<u32>,
    ) -> async_graphql::Result<Vec<DailySummary>> {
        let state = state(ctx)?;
        let days = days.unwrap_or(state.config.report.days);
        let snapshot = state.workspace().snapshot()?;
        let report = assignment::build_daily(
            &snapshot,
            days,
            Utc::now().date_naive(),
            &state.aggregator(),
        )?;
        Ok(report.into_values().map(Into::into).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Add the least loaded team member to a task. Returns the member ID.
    async fn assign_reviewer(
        &self,
        ctx: &Context<'_>,
        task_id: String,
    ) -> async_graphql::Result<Option<String>> {
        let state = state(ctx)?;
        let picked =
            assignment::assign_reviewer(&state.workspace(), &state.aggregator(), &task_id)?;
        Ok(picked)
    }

    /// Assign orphaned goals and even out goal load across the team
    async fn rebalance_goals(
        &self,
        ctx: &Context<'_>,
        dry_run: Option<bool>,
    ) -> async_graphql::Result<RebalanceResult> {
        let state = state(ctx)?;
        let outcome = assignment::rebalance_goals(
            &state.workspace(),
            &state.aggregator(),
            &state.config.rebalance,
            dry_run.unwrap_or(false),
        )?;
        Ok(outcome.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Goal as ModelGoal, Member as ModelMember, Priority, Task as ModelTask};
    use tempfile::TempDir;

    fn setup() -> (TempDir, CrewSchema) {
        let temp_dir = TempDir::new().unwrap();
        let config = CrewConfig::default();
        let workspace = Workspace::new(&config, temp_dir.path());
        workspace.init().unwrap();
        for id in ["m-a", "m-b"] {
            workspace
                .create_member(&ModelMember::new(id.to_string(), id.to_uppercase()))
                .unwrap();
        }
        workspace
            .create_task(
                &ModelTask::new("t-1".to_string(), "Ship it".to_string())
                    .with_priority(Priority::High)
                    .with_assignees(["m-a".to_string()]),
            )
            .unwrap();
        workspace
            .create_goal(&ModelGoal::new("g-1".to_string(), "Grow".to_string()))
            .unwrap();

        let schema = build_schema(config, temp_dir.path().to_path_buf());
        (temp_dir, schema)
    }

    #[tokio::test]
    async fn test_scores_query() {
        let (_temp, schema) = setup();
        let response = schema.execute("{ scores { memberId score } }").await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        assert_eq!(data["scores"][0]["memberId"], "m-a");
        assert_eq!(data["scores"][0]["score"], 2);
        assert_eq!(data["scores"][1]["score"], 0);
    }

    #[tokio::test]
    async fn test_rebalance_mutation() {
        let (_temp, schema) = setup();
        let response = schema
            .execute("mutation { rebalanceGoals { assigned dryRun moves { goalId to phase } } }")
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        assert_eq!(data["rebalanceGoals"]["assigned"], 1);
        assert_eq!(data["rebalanceGoals"]["moves"][0]["to"], "m-b");
        assert_eq!(data["rebalanceGoals"]["moves"][0]["phase"], "INITIAL");
    }

    #[tokio::test]
    async fn test_assign_reviewer_unknown_task_is_an_error() {
        let (_temp, schema) = setup();
        let response = schema
            .execute(r#"mutation { assignReviewer(taskId: "t-nope") }"#)
            .await;
        assert_eq!(response.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_daily_rejects_empty_window() {
        let (_temp, schema) = setup();
        let response = schema.execute("{ daily(days: 0) { memberId } }").await;
        assert!(!response.errors.is_empty());
    }
}
