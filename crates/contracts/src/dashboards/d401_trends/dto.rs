use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregates for one observed weekday. Weekdays with no observations in the
/// range are omitted, not zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOfWeekRow {
    /// Weekday name ("Sunday".."Saturday")
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: String,

    /// 0 = Sunday .. 6 = Saturday
    #[serde(rename = "dayNumber")]
    pub day_number: u32,

    #[serde(rename = "averageRevenue")]
    pub average_revenue: f64,

    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,

    /// Number of observed days contributing to the average.
    pub count: u32,
}

/// One point of the daily revenue trend chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,

    #[serde(rename = "dailyRevenue")]
    pub daily_revenue: f64,
}

/// One chart row: each entity's MTD snapshot as of `date`, keyed by entity
/// display name. Entities without a fact on a given date are simply absent
/// from that row's map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub values: HashMap<String, f64>,
}
