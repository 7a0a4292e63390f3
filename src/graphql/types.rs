use crate::assignment;
use crate::model::{self, Goal as ModelGoal, Member as ModelMember, Project as ModelProject, Task as ModelTask};
use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl From<model::Priority> for Priority {
    fn from(p: model::Priority) -> Self {
        match p {
            model::Priority::Low => Priority::Low,
            model::Priority::Medium => Priority::Medium,
            model::Priority::High => Priority::High,
            model::Priority::Critical => Priority::Critical,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum TaskStatus {
    Open,
    InProgress,
    Done,
}

impl From<model::TaskStatus> for TaskStatus {
    fn from(s: model::TaskStatus) -> Self {
        match s {
            model::TaskStatus::Open => TaskStatus::Open,
            model::TaskStatus::InProgress => TaskStatus::InProgress,
            model::TaskStatus::Done => TaskStatus::Done,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GoalStatus {
    Active,
    OnHold,
    Done,
    Archived,
}

impl From<model::GoalStatus> for GoalStatus {
    fn from(s: model::GoalStatus) -> Self {
        match s {
            model::GoalStatus::Active => GoalStatus::Active,
            model::GoalStatus::OnHold => GoalStatus::OnHold,
            model::GoalStatus::Done => GoalStatus::Done,
            model::GoalStatus::Archived => GoalStatus::Archived,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum SourceKind {
    Task,
    Project,
    Goal,
}

impl From<assignment::SourceKind> for SourceKind {
    fn from(k: assignment::SourceKind) -> Self {
        match k {
            assignment::SourceKind::Task => SourceKind::Task,
            assignment::SourceKind::Project => SourceKind::Project,
            assignment::SourceKind::Goal => SourceKind::Goal,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum EventKind {
    TaskCreated,
    ProjectCreated,
    GoalCreated,
    TaskCompleted,
}

impl From<assignment::EventKind> for EventKind {
    fn from(k: assignment::EventKind) -> Self {
        match k {
            assignment::EventKind::TaskCreated => EventKind::TaskCreated,
            assignment::EventKind::ProjectCreated => EventKind::ProjectCreated,
            assignment::EventKind::GoalCreated => EventKind::GoalCreated,
            assignment::EventKind::TaskCompleted => EventKind::TaskCompleted,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum MovePhase {
    Initial,
    Equalize,
}

impl From<assignment::MovePhase> for MovePhase {
    fn from(p: assignment::MovePhase) -> Self {
        match p {
            assignment::MovePhase::Initial => MovePhase::Initial,
            assignment::MovePhase::Equalize => MovePhase::Equalize,
        }
    }
}

#[derive(SimpleObject)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub team: bool,
    pub created: DateTime<Utc>,
}

impl From<ModelMember> for Member {
    fn from(m: ModelMember) -> Self {
        Self {
            id: m.id,
            name: m.name,
            team: m.team,
            created: m.created,
        }
    }
}

#[derive(SimpleObject)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub archived: bool,
    pub assignees: Vec<String>,
    pub due: Option<NaiveDate>,
    pub created: DateTime<Utc>,
    pub completed: Option<DateTime<Utc>>,
    pub body: String,
}

impl From<ModelTask> for Task {
    fn from(t: ModelTask) -> Self {
        Self {
            id: t.id,
            title: t.title,
            priority: t.priority.into(),
            status: t.status.into(),
            archived: t.archived,
            assignees: t.assignees.into_iter().collect(),
            due: t.due,
            created: t.created,
            completed: t.completed,
            body: t.body,
        }
    }
}

#[derive(SimpleObject)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub archived: bool,
    pub participants: Vec<String>,
    pub owners: Vec<String>,
    pub created: DateTime<Utc>,
}

impl From<ModelProject> for Project {
    fn from(p: ModelProject) -> Self {
        Self {
            id: p.id,
            title: p.title,
            archived: p.archived,
            participants: p.participants.into_iter().collect(),
            owners: p.owners.into_iter().collect(),
            created: p.created,
        }
    }
}

#[derive(SimpleObject)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub status: GoalStatus,
    pub assignee: Option<String>,
    pub due: Option<NaiveDate>,
    pub created: DateTime<Utc>,
}

impl From<ModelGoal> for Goal {
    fn from(g: ModelGoal) -> Self {
        Self {
            id: g.id,
            title: g.title,
            status: g.status.into(),
            assignee: g.assignee,
            due: g.due,
            created: g.created,
        }
    }
}

#[derive(SimpleObject)]
pub struct ScoreEntry {
    pub member_id: String,
    pub score: u32,
}

#[derive(SimpleObject)]
pub struct BreakdownItem {
    pub kind: SourceKind,
    pub id: String,
    pub title: String,
    pub points: u32,
}

#[derive(SimpleObject)]
pub struct MemberBreakdown {
    pub member_id: String,
    pub name: String,
    pub total: u32,
    pub items: Vec<BreakdownItem>,
}

impl From<assignment::MemberBreakdown> for MemberBreakdown {
    fn from(b: assignment::MemberBreakdown) -> Self {
        Self {
            member_id: b.member_id,
            name: b.name,
            total: b.total,
            items: b
                .items
                .into_iter()
                .map(|i| BreakdownItem {
                    kind: i.kind.into(),
                    id: i.id,
                    title: i.title,
                    points: i.points,
                })
                .collect(),
        }
    }
}

#[derive(SimpleObject)]
pub struct DailyItem {
    pub title: String,
    pub points: u32,
    pub kind: EventKind,
}

impl From<assignment::DailyItem> for DailyItem {
    fn from(i: assignment::DailyItem) -> Self {
        Self {
            title: i.title,
            points: i.points,
            kind: i.kind.into(),
        }
    }
}

#[derive(SimpleObject)]
pub struct DailySummary {
    pub member_id: String,
    pub name: String,
    pub today_plus: u32,
    pub today_minus: u32,
    pub today_net: i64,
    pub avg_daily_plus: f64,
    pub avg_daily_minus: f64,
    pub avg_daily_net: f64,
    pub today_plus_items: Vec<DailyItem>,
    pub today_minus_items: Vec<DailyItem>,
}

impl From<assignment::DailySummary> for DailySummary {
    fn from(s: assignment::DailySummary) -> Self {
        Self {
            member_id: s.member_id,
            name: s.name,
            today_plus: s.today_plus,
            today_minus: s.today_minus,
            today_net: s.today_net,
            avg_daily_plus: s.avg_daily_plus,
            avg_daily_minus: s.avg_daily_minus,
            avg_daily_net: s.avg_daily_net,
            today_plus_items: s.today_plus_items.into_iter().map(Into::into).collect(),
            today_minus_items: s.today_minus_items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject)]
pub struct GoalMove {
    pub goal_id: String,
    pub from: Option<String>,
    pub to: String,
    pub phase: MovePhase,
}

#[derive(SimpleObject)]
pub struct RebalanceResult {
    pub assigned: usize,
    pub rebalanced: usize,
    pub dry_run: bool,
    pub moves: Vec<GoalMove>,
    pub scores: Vec<ScoreEntry>,
}

impl From<assignment::RebalanceOutcome> for RebalanceResult {
    fn from(o: assignment::RebalanceOutcome) -> Self {
        Self {
            assigned: o.assigned,
            rebalanced: o.rebalanced,
            dry_run: o.dry_run,
            moves: o
                .moves
                .into_iter()
                .map(|m| GoalMove {
                    goal_id: m.goal_id,
                    from: m.from,
                    to: m.to,
                    phase: m.phase.into(),
                })
                .collect(),
            scores: o
                .scores
                .into_iter()
                .map(|(member_id, score)| ScoreEntry { member_id, score })
                .collect(),
        }
    }
}
