use anyhow::Result;
use chrono::{NaiveDate, Utc};
use contracts::dashboards::d400_performance::{
    CompanySummaryResponse, GroupSummaryRow, PerformanceRequest, PerformanceResponse,
    PerformanceRow,
};
use contracts::enums::EntityKind;
use std::collections::HashMap;

use super::metrics::{self, CalendarPosition};
use super::repository::{self, LatestFactRow};
use crate::domain::a007_entity_group;

/// Monthly performance table for all active entities of one kind.
///
/// Figures are derived at read time from the latest fact snapshot per entity
/// plus the goal on file, so a goal edit is visible on the next request.
pub async fn get_performance(request: PerformanceRequest) -> Result<PerformanceResponse> {
    let (date_from, date_to) = metrics::month_bounds(request.year, request.month);
    let period = format!("{:04}-{:02}", request.year, request.month);
    let position =
        CalendarPosition::for_month(request.year, request.month, Utc::now().date_naive());

    let entities = repository::get_active_entities(request.kind).await?;
    let facts = repository::get_latest_facts(
        request.kind,
        &date_from.format("%Y-%m-%d").to_string(),
        &date_to.format("%Y-%m-%d").to_string(),
    )
    .await?;
    let goals = repository::get_goals_for_month(request.kind, &period).await?;

    let facts_by_entity: HashMap<String, LatestFactRow> =
        facts.into_iter().map(|f| (f.entity_id.clone(), f)).collect();
    let goals_by_entity: HashMap<String, f64> =
        goals.into_iter().map(|g| (g.entity_id, g.goal_amount)).collect();

    let mut rows = Vec::with_capacity(entities.len());
    for entity in entities {
        rows.push(build_row(
            &entity.id,
            entity.name,
            entity.detail,
            facts_by_entity.get(&entity.id),
            goals_by_entity.get(&entity.id).copied(),
            &position,
        ));
    }

    // Entities with data ranked by revenue; empty rows trail alphabetically.
    rows.sort_by(|a, b| {
        b.has_data
            .cmp(&a.has_data)
            .then(b.mtd_revenue.total_cmp(&a.mtd_revenue))
            .then_with(|| a.entity_name.cmp(&b.entity_name))
    });

    Ok(PerformanceResponse {
        period,
        kind: request.kind,
        days_in_month: position.days_in_month,
        days_passed: position.days_passed,
        days_remaining: position.days_remaining,
        rows,
    })
}

fn build_row(
    entity_id: &str,
    entity_name: String,
    detail: Option<String>,
    fact: Option<&LatestFactRow>,
    goal: Option<f64>,
    position: &CalendarPosition,
) -> PerformanceRow {
    let mtd_revenue = fact.map(|f| f.mtd_revenue).unwrap_or(0.0);
    let summary = metrics::compute_mtd_summary(mtd_revenue, goal);
    let pacing = metrics::pacing_percent(
        summary.percent_to_goal,
        goal,
        position.expected_percent_complete,
    );

    PerformanceRow {
        entity_id: entity_id.to_string(),
        entity_name,
        detail,
        mtd_revenue: summary.mtd_revenue,
        goal_amount: goal,
        variance_to_goal: summary.variance_to_goal,
        percent_to_goal: summary.percent_to_goal,
        pacing_percent: pacing,
        pacing_tier: pacing.map(|p| metrics::pacing_tier(p, position.days_remaining)),
        ly_revenue: fact.and_then(|f| f.ly_revenue),
        has_data: fact.is_some(),
    }
}

/// Company rollup over stores: sum of per-store latest MTD snapshots, the
/// combined goal, and subtotals for each configured reporting group.
pub async fn get_company_summary(year: i32, month: u32) -> Result<CompanySummaryResponse> {
    let (date_from, date_to) = metrics::month_bounds(year, month);
    let period = format!("{:04}-{:02}", year, month);
    let position = CalendarPosition::for_month(year, month, Utc::now().date_naive());

    let facts = repository::get_latest_facts(
        EntityKind::Store,
        &date_from.format("%Y-%m-%d").to_string(),
        &date_to.format("%Y-%m-%d").to_string(),
    )
    .await?;
    let goals = repository::get_goals_for_month(EntityKind::Store, &period).await?;
    let grouped = a007_entity_group::service::grouped_by_tag().await?;

    let mtd_by_entity: HashMap<String, f64> = facts
        .iter()
        .map(|f| (f.entity_id.clone(), f.mtd_revenue))
        .collect();

    let as_of_date = metrics::latest_by_date(&facts, |f| {
        NaiveDate::parse_from_str(&f.date, "%Y-%m-%d").ok()
    })
    .and_then(|f| NaiveDate::parse_from_str(&f.date, "%Y-%m-%d").ok());

    let mtd_revenue: f64 = facts.iter().map(|f| f.mtd_revenue).sum();
    let goal_amount: f64 = goals.iter().map(|g| g.goal_amount).sum();
    let summary = metrics::compute_mtd_summary(
        mtd_revenue,
        (goal_amount > 0.0).then_some(goal_amount),
    );
    let pacing = metrics::pacing_percent(
        summary.percent_to_goal,
        (goal_amount > 0.0).then_some(goal_amount),
        position.expected_percent_complete,
    );

    let mut groups = Vec::with_capacity(grouped.len());
    for (group_tag, members) in grouped {
        let display_name = members
            .first()
            .map(|m| m.display_name.clone())
            .unwrap_or_else(|| group_tag.clone());
        let subtotal: f64 = members
            .iter()
            .filter_map(|m| mtd_by_entity.get(&m.entity_id))
            .sum();
        groups.push(GroupSummaryRow {
            group_tag,
            display_name,
            mtd_revenue: subtotal,
            member_count: members.len(),
        });
    }

    Ok(CompanySummaryResponse {
        period,
        as_of_date,
        mtd_revenue,
        goal_amount,
        variance_to_goal: summary.variance_to_goal,
        percent_to_goal: summary.percent_to_goal,
        pacing_percent: pacing,
        pacing_tier: pacing.map(|p| metrics::pacing_tier(p, position.days_remaining)),
        days_remaining: position.days_remaining,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> CalendarPosition {
        CalendarPosition::for_month(
            2025,
            6,
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        )
    }

    #[test]
    fn entity_without_facts_is_zero_filled() {
        let row = build_row(
            "s1",
            "Downtown".into(),
            Some("North".into()),
            None,
            Some(10_000.0),
            &position(),
        );
        assert!(!row.has_data);
        assert_eq!(row.mtd_revenue, 0.0);
        assert_eq!(row.percent_to_goal, 0.0);
        assert_eq!(row.variance_to_goal, -10_000.0);
        // A goal exists, so pacing is still computed (at zero).
        assert_eq!(row.pacing_percent, Some(0.0));
    }

    #[test]
    fn entity_without_goal_has_no_pacing() {
        let fact = LatestFactRow {
            entity_id: "s1".into(),
            date: "2025-06-14".into(),
            mtd_revenue: 7_500.0,
            ly_revenue: Some(7_000.0),
        };
        let row = build_row("s1", "Downtown".into(), None, Some(&fact), None, &position());
        assert!(row.has_data);
        assert_eq!(row.percent_to_goal, 0.0);
        assert_eq!(row.pacing_percent, None);
        assert_eq!(row.pacing_tier, None);
        assert_eq!(row.ly_revenue, Some(7_000.0));
    }

    #[test]
    fn row_pacing_follows_calendar() {
        let fact = LatestFactRow {
            entity_id: "s1".into(),
            date: "2025-06-15".into(),
            mtd_revenue: 5_000.0,
            ly_revenue: None,
        };
        let row = build_row(
            "s1",
            "Downtown".into(),
            None,
            Some(&fact),
            Some(10_000.0),
            &position(),
        );
        // 50% to goal at 50% of June elapsed: exactly on pace.
        assert!((row.pacing_percent.unwrap() - 100.0).abs() < 1e-9);
    }
}
