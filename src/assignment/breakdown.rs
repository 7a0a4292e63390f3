use super::score::{ScoreAggregator, SourceKind};
use super::MemberId;
use crate::model::{Goal, Member, Project, Task};
use serde::Serialize;
use std::collections::BTreeMap;

/// One item contributing to a member's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownItem {
    pub kind: SourceKind,
    pub id: String,
    pub title: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberBreakdown {
    pub member_id: MemberId,
    pub name: String,
    pub total: u32,
    pub items: Vec<BreakdownItem>,
}

/// Itemized score for every eligible member.
///
/// Totals always equal what [`ScoreAggregator::compute`] reports. Members
/// come out most loaded first, then by name and ID; items are grouped by
/// kind and ordered by ID.
pub fn build_breakdown(
    members: &[Member],
    tasks: &[Task],
    projects: &[Project],
    goals: &[Goal],
    aggregator: &ScoreAggregator,
) -> Vec<MemberBreakdown> {
    let mut by_member: BTreeMap<&str, MemberBreakdown> = members
        .iter()
        .filter(|m| m.team)
        .map(|m| {
            (
                m.id.as_str(),
                MemberBreakdown {
                    member_id: m.id.clone(),
                    name: m.name.clone(),
                    total: 0,
                    items: Vec::new(),
                },
            )
        })
        .collect();

    for contribution in aggregator.contributions(tasks, projects, goals) {
        if let Some(entry) = by_member.get_mut(contribution.member_id) {
            entry.total += contribution.points;
            entry.items.push(BreakdownItem {
                kind: contribution.kind,
                id: contribution.item_id.to_string(),
                title: contribution.title.to_string(),
                points: contribution.points,
            });
        }
    }

    let mut breakdown: Vec<MemberBreakdown> = by_member.into_values().collect();
    for entry in &mut breakdown {
        entry.items.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.id.cmp(&b.id)));
    }
    breakdown.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.member_id.cmp(&b.member_id))
    });
    breakdown
}
