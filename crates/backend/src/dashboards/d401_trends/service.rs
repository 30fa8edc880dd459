use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d401_trends::{CumulativePoint, DayOfWeekRow, TrendPoint};
use contracts::enums::EntityKind;
use std::collections::BTreeMap;

use super::repository;
use crate::dashboards::d400_performance::metrics::month_bounds;
use crate::domain::a003_daily_revenue_fact;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Month of the most recent fact for a kind, used when a caller gives no
/// explicit range. None when no facts exist at all.
pub async fn default_range(kind: EntityKind) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let Some(latest) = a003_daily_revenue_fact::service::latest_date_for_kind(kind).await? else {
        return Ok(None);
    };
    Ok(Some(month_bounds(latest.year(), latest.month())))
}

/// Daily revenue trend for one entity over a date range.
pub async fn get_daily_trend(
    entity_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<Vec<TrendPoint>> {
    let points = repository::get_daily_series(
        entity_id,
        &date_from.format("%Y-%m-%d").to_string(),
        &date_to.format("%Y-%m-%d").to_string(),
    )
    .await?;
    Ok(to_trend_points(points))
}

/// Average revenue per weekday over a date range, entity-level or combined
/// across the whole kind when no entity is given.
pub async fn get_day_of_week_rollup(
    kind: EntityKind,
    entity_id: Option<&str>,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<Vec<DayOfWeekRow>> {
    let from = date_from.format("%Y-%m-%d").to_string();
    let to = date_to.format("%Y-%m-%d").to_string();
    let points = match entity_id {
        Some(id) => repository::get_daily_series(id, &from, &to).await?,
        None => repository::get_combined_daily_series(kind, &from, &to).await?,
    };

    let observed: Vec<(NaiveDate, f64)> = points
        .into_iter()
        .filter_map(|p| {
            NaiveDate::parse_from_str(&p.date, "%Y-%m-%d")
                .ok()
                .map(|d| (d, p.daily_revenue))
        })
        .collect();

    Ok(rollup_by_weekday(&observed))
}

/// Each entity's MTD snapshot per date, for the cumulative month chart.
pub async fn get_cumulative_points(
    kind: EntityKind,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<Vec<CumulativePoint>> {
    let rows = repository::get_mtd_snapshots(
        kind,
        &date_from.format("%Y-%m-%d").to_string(),
        &date_to.format("%Y-%m-%d").to_string(),
    )
    .await?;

    let mut by_date: BTreeMap<NaiveDate, CumulativePoint> = BTreeMap::new();
    for row in rows {
        let Ok(date) = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d") else {
            continue;
        };
        by_date
            .entry(date)
            .or_insert_with(|| CumulativePoint {
                date,
                values: Default::default(),
            })
            .values
            .insert(row.entity_name, row.mtd_revenue);
    }
    Ok(by_date.into_values().collect())
}

fn to_trend_points(points: Vec<repository::DailyPoint>) -> Vec<TrendPoint> {
    points
        .into_iter()
        .filter_map(|p| {
            NaiveDate::parse_from_str(&p.date, "%Y-%m-%d")
                .ok()
                .map(|date| TrendPoint {
                    date,
                    daily_revenue: p.daily_revenue,
                })
        })
        .collect()
}

/// Totals and averages per observed weekday, Sunday first. Weekdays with no
/// observations in the input are omitted, never zero-filled, so a range of
/// weekdays does not drag a weekend average down to zero.
fn rollup_by_weekday(points: &[(NaiveDate, f64)]) -> Vec<DayOfWeekRow> {
    let mut totals = [0.0f64; 7];
    let mut counts = [0u32; 7];

    for (date, revenue) in points {
        let idx = date.weekday().num_days_from_sunday() as usize;
        totals[idx] += revenue;
        counts[idx] += 1;
    }

    (0..7)
        .filter(|&i| counts[i] > 0)
        .map(|i| DayOfWeekRow {
            day_of_week: DAY_NAMES[i].to_string(),
            day_number: i as u32,
            average_revenue: totals[i] / counts[i] as f64,
            total_revenue: totals[i],
            count: counts[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn unobserved_weekdays_are_omitted() {
        // 2025-06-02 and 2025-06-09 are Mondays, 2025-06-03 a Tuesday.
        let points = vec![
            (d("2025-06-02"), 100.0),
            (d("2025-06-09"), 300.0),
            (d("2025-06-03"), 50.0),
        ];
        let rows = rollup_by_weekday(&points);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].day_of_week, "Monday");
        assert_eq!(rows[0].day_number, 1);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].total_revenue, 400.0);
        assert_eq!(rows[0].average_revenue, 200.0);
        assert_eq!(rows[1].day_of_week, "Tuesday");
    }

    #[test]
    fn average_is_total_over_observed_count() {
        // Three Sundays with one zero day still divide by three.
        let points = vec![
            (d("2025-06-01"), 90.0),
            (d("2025-06-08"), 0.0),
            (d("2025-06-15"), 60.0),
        ];
        let rows = rollup_by_weekday(&points);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].day_number, 0);
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].average_revenue, 50.0);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(rollup_by_weekday(&[]).is_empty());
    }
}
