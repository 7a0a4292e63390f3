//! Points gained and shed per calendar day.
//!
//! Creating work adds points to its members on the day it was created;
//! completing a task takes its points off again on the completion day.
//! Days are UTC calendar days.

use super::score::ScoreAggregator;
use super::{MemberId, Snapshot};
use crate::error::Result;
use crate::validation;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TaskCreated,
    ProjectCreated,
    GoalCreated,
    TaskCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyItem {
    pub title: String,
    pub points: u32,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub member_id: MemberId,
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

struct Event<'a> {
    member_id: &'a str,
    day: NaiveDate,
    title: &'a str,
    points: u32,
    kind: EventKind,
}

impl Event<'_> {
    fn is_minus(&self) -> bool {
        self.kind == EventKind::TaskCompleted
    }
}

fn events<'a>(snapshot: &'a Snapshot, aggregator: &ScoreAggregator) -> Vec<Event<'a>> {
    let weights = aggregator.weights();
    let mut events = Vec::new();

    for task in &snapshot.tasks {
        let points = task.priority.weight(weights);
        for member_id in &task.assignees {
            events.push(Event {
                member_id,
                day: task.created.date_naive(),
                title: &task.title,
                points,
                kind: EventKind::TaskCreated,
            });
            if let Some(completed) = task.completed {
                events.push(Event {
                    member_id,
                    day: completed.date_naive(),
                    title: &task.title,
                    points,
                    kind: EventKind::TaskCompleted,
                });
            }
        }
    }

    for project in &snapshot.projects {
        let members: BTreeSet<&str> = project.members();
        for member_id in members {
            events.push(Event {
                member_id,
                day: project.created.date_naive(),
                title: &project.title,
                points: weights.project,
                kind: EventKind::ProjectCreated,
            });
        }
    }

    for goal in &snapshot.goals {
        if let Some(member_id) = goal.assignee.as_deref() {
            events.push(Event {
                member_id,
                day: goal.created.date_naive(),
                title: &goal.title,
                points: weights.goal,
                kind: EventKind::GoalCreated,
            });
        }
    }

    events
}

/// `total / days` rounded to 2 decimal places, halves away from zero.
///
/// Worked out in whole hundredths so binary fractions like 0.575 cannot
/// land below the half.
fn average_hundredths(total: i64, days: u32) -> f64 {
    let days = i64::from(days.max(1));
    let hundredths = (200 * total.abs() + days) / (2 * days);
    (total.signum() * hundredths) as f64 / 100.0
}

/// Daily plus/minus summary for every eligible member over the trailing
/// `window_days` days ending on `today`.
pub fn build_daily(
    snapshot: &Snapshot,
    window_days: u32,
    today: NaiveDate,
    aggregator: &ScoreAggregator,
) -> Result<BTreeMap<MemberId, DailySummary>> {
    validation::validate_window(window_days)?;
    let first_day = today
        .checked_sub_days(Days::new(u64::from(window_days) - 1))
        .unwrap_or(NaiveDate::MIN);

    let mut summaries: BTreeMap<MemberId, DailySummary> = snapshot
        .eligible_members()
        .map(|m| {
            (
                m.id.clone(),
                DailySummary {
                    member_id: m.id.clone(),
                    name: m.name.clone(),
                    today_plus: 0,
                    today_minus: 0,
                    today_net: 0,
                    avg_daily_plus: 0.0,
                    avg_daily_minus: 0.0,
                    avg_daily_net: 0.0,
                    today_plus_items: Vec::new(),
                    today_minus_items: Vec::new(),
                },
            )
        })
        .collect();

    let mut window_totals: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for event in events(snapshot, aggregator) {
        if event.day < first_day || event.day > today {
            continue;
        }
        let Some(summary) = summaries.get_mut(event.member_id) else {
            continue;
        };

        let totals = window_totals.entry(event.member_id).or_default();
        if event.is_minus() {
            totals.1 += u64::from(event.points);
        } else {
            totals.0 += u64::from(event.points);
        }

        if event.day == today {
            let item = DailyItem {
                title: event.title.to_string(),
                points: event.points,
                kind: event.kind,
            };
            if event.is_minus() {
                summary.today_minus += event.points;
                summary.today_minus_items.push(item);
            } else {
                summary.today_plus += event.points;
                summary.today_plus_items.push(item);
            }
        }
    }

    for summary in summaries.values_mut() {
        summary.today_net = i64::from(summary.today_plus) - i64::from(summary.today_minus);
        let (plus, minus) = window_totals
            .get(summary.member_id.as_str())
            .copied()
            .unwrap_or_default();
        let (plus, minus) = (plus as i64, minus as i64);
        summary.avg_daily_plus = average_hundredths(plus, window_days);
        summary.avg_daily_minus = average_hundredths(minus, window_days);
        summary.avg_daily_net = average_hundredths(plus - minus, window_days);
    }

    tracing::debug!(members = summaries.len(), window_days, %today, "Built daily report");
    Ok(summaries)
}
