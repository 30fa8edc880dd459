use crate::enums::EntityKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request for the monthly performance dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRequest {
    pub year: i32,
    pub month: u32,
    pub kind: EntityKind,
}

/// Color tier for a pacing value. Thresholds depend on how much of the month
/// is left: early-month variance is expected, late-month shortfalls are not
/// recoverable, so the bands tighten once 10 or fewer days remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingTier {
    Good,
    Warning,
    Poor,
}

/// One entity's derived performance for the month. Computed at read time from
/// daily facts plus the goal on file — never persisted, so goal edits show up
/// on the next read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRow {
    #[serde(rename = "entityId")]
    pub entity_id: String,

    #[serde(rename = "entityName")]
    pub entity_name: String,

    /// Region for stores, role for reps.
    pub detail: Option<String>,

    #[serde(rename = "mtdRevenue")]
    pub mtd_revenue: f64,

    #[serde(rename = "goalAmount")]
    pub goal_amount: Option<f64>,

    #[serde(rename = "varianceToGoal")]
    pub variance_to_goal: f64,

    #[serde(rename = "percentToGoal")]
    pub percent_to_goal: f64,

    #[serde(rename = "pacingPercent")]
    pub pacing_percent: Option<f64>,

    #[serde(rename = "pacingTier")]
    pub pacing_tier: Option<PacingTier>,

    /// Same-date-last-year revenue from the latest fact, when reported.
    #[serde(rename = "lyRevenue")]
    pub ly_revenue: Option<f64>,

    /// False when the entity has no facts for the month; such rows are
    /// zero-filled for display but excluded from ranking.
    #[serde(rename = "hasData")]
    pub has_data: bool,
}

/// Response for the monthly performance dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceResponse {
    /// Period in "YYYY-MM" form
    pub period: String,
    pub kind: EntityKind,

    #[serde(rename = "daysInMonth")]
    pub days_in_month: u32,

    #[serde(rename = "daysPassed")]
    pub days_passed: u32,

    #[serde(rename = "daysRemaining")]
    pub days_remaining: u32,

    pub rows: Vec<PerformanceRow>,
}

/// Subtotal for one configured reporting group of stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummaryRow {
    #[serde(rename = "groupTag")]
    pub group_tag: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(rename = "mtdRevenue")]
    pub mtd_revenue: f64,

    #[serde(rename = "memberCount")]
    pub member_count: usize,
}

/// Company-wide summary: sum of per-store latest MTD snapshots plus the
/// configured group subtotals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySummaryResponse {
    pub period: String,

    /// Latest fact date observed across stores, None when the month is empty.
    #[serde(rename = "asOfDate")]
    pub as_of_date: Option<NaiveDate>,

    #[serde(rename = "mtdRevenue")]
    pub mtd_revenue: f64,

    #[serde(rename = "goalAmount")]
    pub goal_amount: f64,

    #[serde(rename = "varianceToGoal")]
    pub variance_to_goal: f64,

    #[serde(rename = "percentToGoal")]
    pub percent_to_goal: f64,

    #[serde(rename = "pacingPercent")]
    pub pacing_percent: Option<f64>,

    #[serde(rename = "pacingTier")]
    pub pacing_tier: Option<PacingTier>,

    #[serde(rename = "daysRemaining")]
    pub days_remaining: u32,

    pub groups: Vec<GroupSummaryRow>,
}
