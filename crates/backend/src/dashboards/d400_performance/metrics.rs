//! Pure month-to-date and pacing math. Everything here is deterministic:
//! the service layer feeds it rows and a reference date, nothing in this
//! module touches the database or the clock.

use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d400_performance::PacingTier;

/// Where the reference date sits inside a reporting month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarPosition {
    pub days_in_month: u32,
    pub days_passed: u32,
    pub days_remaining: u32,
    /// Share of the month elapsed, 0..=100.
    pub expected_percent_complete: f64,
}

impl CalendarPosition {
    /// Position of `as_of` inside (year, month). Dates before the month
    /// clamp to zero days passed, dates after it to the full month.
    pub fn for_month(year: i32, month: u32, as_of: NaiveDate) -> Self {
        let days_in_month = days_in_month(year, month);
        let days_passed = if (as_of.year(), as_of.month()) < (year, month) {
            0
        } else if (as_of.year(), as_of.month()) > (year, month) {
            days_in_month
        } else {
            as_of.day()
        };
        Self {
            days_in_month,
            days_passed,
            days_remaining: days_in_month - days_passed,
            expected_percent_complete: days_passed as f64 / days_in_month as f64 * 100.0,
        }
    }
}

/// Picks the latest-dated item; the MTD snapshot on that row is trusted
/// as-is. Input order never matters, and a snapshot lower than an earlier
/// one (a downward correction) still wins.
pub fn latest_by_date<T>(
    items: &[T],
    date_of: impl Fn(&T) -> Option<NaiveDate>,
) -> Option<&T> {
    items
        .iter()
        .filter_map(|item| date_of(item).map(|d| (d, item)))
        .max_by_key(|(d, _)| *d)
        .map(|(_, item)| item)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(31)
}

/// First and last calendar day of (year, month).
pub fn month_bounds(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date"));
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .unwrap_or(first);
    (first, last)
}

/// MTD figures derived from the latest fact snapshot plus the goal on file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MtdSummary {
    pub mtd_revenue: f64,
    pub variance_to_goal: f64,
    /// 0 when no positive goal exists; never clamped above 100.
    pub percent_to_goal: f64,
}

/// Derives MTD figures from the trusted snapshot. A missing or non-positive
/// goal reads as zero percent, never as a division error.
pub fn compute_mtd_summary(mtd_revenue: f64, goal: Option<f64>) -> MtdSummary {
    let goal_amount = goal.unwrap_or(0.0);
    let percent_to_goal = if goal_amount > 0.0 {
        mtd_revenue / goal_amount * 100.0
    } else {
        0.0
    };
    MtdSummary {
        mtd_revenue,
        variance_to_goal: mtd_revenue - goal_amount,
        percent_to_goal,
    }
}

/// Pace against the calendar: 100 means exactly on schedule.
///
/// `pacing = percent_to_goal / expected_percent_complete * 100`
///
/// None when there is no positive goal or no elapsed days, which keeps
/// goalless entities out of the pacing ranking instead of showing zeros.
pub fn pacing_percent(
    percent_to_goal: f64,
    goal: Option<f64>,
    expected_percent_complete: f64,
) -> Option<f64> {
    match goal {
        Some(g) if g > 0.0 && expected_percent_complete > 0.0 => {
            Some(percent_to_goal / expected_percent_complete * 100.0)
        }
        _ => None,
    }
}

/// Color band for a pacing value. Early in the month swings are expected;
/// once 10 or fewer days remain a shortfall is no longer recoverable and
/// the bands tighten.
pub fn pacing_tier(pacing: f64, days_remaining: u32) -> PacingTier {
    if days_remaining > 10 {
        if pacing >= 80.0 {
            PacingTier::Good
        } else if pacing >= 60.0 {
            PacingTier::Warning
        } else {
            PacingTier::Poor
        }
    } else if pacing >= 95.0 {
        PacingTier::Good
    } else if pacing >= 85.0 {
        PacingTier::Warning
    } else {
        PacingTier::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn latest_snapshot_wins_regardless_of_order() {
        let facts = vec![
            ("2025-10-09", 492_000.0),
            ("2025-10-01", 40_000.0),
            ("2025-10-08", 500_000.0),
        ];
        let latest =
            latest_by_date(&facts, |(date, _)| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
                .unwrap();
        // The 10-09 snapshot is below the 10-08 one (a downward correction)
        // and still wins on date.
        assert_eq!(latest.1, 492_000.0);

        let mut reversed = facts.clone();
        reversed.reverse();
        let same = latest_by_date(&reversed, |(date, _)| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
        })
        .unwrap();
        assert_eq!(same.1, 492_000.0);
    }

    #[test]
    fn latest_of_empty_input_is_none() {
        let facts: Vec<(&str, f64)> = Vec::new();
        assert!(latest_by_date(&facts, |(date, _)| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
        })
        .is_none());
    }

    #[test]
    fn leap_february_has_29_days() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn month_bounds_cover_full_month() {
        assert_eq!(month_bounds(2024, 2), (d("2024-02-01"), d("2024-02-29")));
        assert_eq!(month_bounds(2025, 12), (d("2025-12-01"), d("2025-12-31")));
    }

    #[test]
    fn calendar_position_mid_month() {
        let pos = CalendarPosition::for_month(2025, 6, d("2025-06-12"));
        assert_eq!(pos.days_in_month, 30);
        assert_eq!(pos.days_passed, 12);
        assert_eq!(pos.days_remaining, 18);
        assert!((pos.expected_percent_complete - 40.0).abs() < 1e-9);
    }

    #[test]
    fn calendar_position_clamps_outside_month() {
        let before = CalendarPosition::for_month(2025, 6, d("2025-05-20"));
        assert_eq!(before.days_passed, 0);
        assert_eq!(before.days_remaining, 30);

        let after = CalendarPosition::for_month(2025, 6, d("2025-07-03"));
        assert_eq!(after.days_passed, 30);
        assert_eq!(after.days_remaining, 0);
    }

    #[test]
    fn percent_to_goal_zero_without_positive_goal() {
        assert_eq!(compute_mtd_summary(5_000.0, None).percent_to_goal, 0.0);
        assert_eq!(compute_mtd_summary(5_000.0, Some(0.0)).percent_to_goal, 0.0);
        assert_eq!(compute_mtd_summary(5_000.0, Some(-100.0)).percent_to_goal, 0.0);
    }

    #[test]
    fn percent_to_goal_not_clamped_above_100() {
        let s = compute_mtd_summary(12_000.0, Some(10_000.0));
        assert!((s.percent_to_goal - 120.0).abs() < 1e-9);
        assert!((s.variance_to_goal - 2_000.0).abs() < 1e-9);
    }

    #[test]
    fn variance_without_goal_equals_revenue() {
        let s = compute_mtd_summary(5_000.0, None);
        assert_eq!(s.variance_to_goal, 5_000.0);
    }

    #[test]
    fn pacing_matches_calendar_formula() {
        // 50% to goal at 40% of the month elapsed is pacing 125.
        let pacing = pacing_percent(50.0, Some(10_000.0), 40.0).unwrap();
        assert!((pacing - 125.0).abs() < 1e-9);
    }

    #[test]
    fn pacing_80_at_mid_month_is_good_under_lenient_bands() {
        // Day 15 of a 30-day month, 40% to goal: pacing is exactly 80,
        // which with 15 days remaining sits on the lenient Good boundary.
        let pos = CalendarPosition::for_month(2025, 6, d("2025-06-15"));
        let pacing =
            pacing_percent(40.0, Some(10_000.0), pos.expected_percent_complete).unwrap();
        assert!((pacing - 80.0).abs() < 1e-9);
        assert_eq!(pacing_tier(pacing, pos.days_remaining), PacingTier::Good);
    }

    #[test]
    fn pacing_falls_as_the_month_advances() {
        let mut previous = f64::INFINITY;
        for day in [5, 10, 15, 20, 25, 30] {
            let pos = CalendarPosition::for_month(2025, 6, d(&format!("2025-06-{:02}", day)));
            let pacing =
                pacing_percent(40.0, Some(10_000.0), pos.expected_percent_complete).unwrap();
            assert!(pacing < previous);
            previous = pacing;
        }
    }

    #[test]
    fn pacing_none_without_goal_or_elapsed_days() {
        assert_eq!(pacing_percent(50.0, None, 40.0), None);
        assert_eq!(pacing_percent(50.0, Some(0.0), 40.0), None);
        assert_eq!(pacing_percent(0.0, Some(10_000.0), 0.0), None);
    }

    #[test]
    fn lenient_tiers_early_in_month() {
        assert_eq!(pacing_tier(80.0, 11), PacingTier::Good);
        assert_eq!(pacing_tier(79.9, 11), PacingTier::Warning);
        assert_eq!(pacing_tier(60.0, 11), PacingTier::Warning);
        assert_eq!(pacing_tier(59.9, 11), PacingTier::Poor);
    }

    #[test]
    fn tight_tiers_in_final_stretch() {
        assert_eq!(pacing_tier(95.0, 10), PacingTier::Good);
        assert_eq!(pacing_tier(94.9, 10), PacingTier::Warning);
        assert_eq!(pacing_tier(85.0, 10), PacingTier::Warning);
        assert_eq!(pacing_tier(84.9, 10), PacingTier::Poor);
    }

    #[test]
    fn same_pacing_flips_tier_at_ten_day_boundary() {
        assert_eq!(pacing_tier(90.0, 11), PacingTier::Good);
        assert_eq!(pacing_tier(90.0, 10), PacingTier::Warning);
    }
}
