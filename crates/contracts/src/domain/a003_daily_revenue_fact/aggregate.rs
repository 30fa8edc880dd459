use crate::domain::common::{AggregateId, BaseAggregate};
use crate::enums::EntityKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyRevenueFactId(pub Uuid);

impl DailyRevenueFactId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for DailyRevenueFactId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(DailyRevenueFactId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// One day of revenue for one entity (store or rep).
///
/// Natural key is (date, entity_id); re-submission replaces the prior row.
/// `mtd_revenue` is the source system's own running total as of `date` — it
/// is stored as reported and never rebuilt by summing daily deltas, so
/// out-of-band corrections to a mid-month date stand on their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRevenueFact {
    #[serde(flatten)]
    pub base: BaseAggregate<DailyRevenueFactId>,

    pub date: NaiveDate,

    #[serde(rename = "entityId")]
    pub entity_id: String,

    #[serde(rename = "entityKind")]
    pub entity_kind: EntityKind,

    /// Revenue booked on this date. Signed: corrections may go negative.
    #[serde(rename = "dailyRevenue")]
    pub daily_revenue: f64,

    /// Month-to-date running total as of this date, as reported upstream.
    #[serde(rename = "mtdRevenue")]
    pub mtd_revenue: f64,

    /// Revenue on the same date last year, when known.
    #[serde(rename = "lyRevenue")]
    pub ly_revenue: Option<f64>,

    /// Goal allocated to this date, when known.
    #[serde(rename = "goalRevenue")]
    pub goal_revenue: Option<f64>,
}

impl DailyRevenueFact {
    pub fn new_for_insert(
        date: NaiveDate,
        entity_id: String,
        entity_kind: EntityKind,
        daily_revenue: f64,
        mtd_revenue: f64,
        ly_revenue: Option<f64>,
        goal_revenue: Option<f64>,
    ) -> Self {
        let id_prefix: String = entity_id.chars().take(8).collect();
        let code = format!("REV-{}-{}", date.format("%Y%m%d"), id_prefix);
        let description = format!("{} revenue {}", entity_kind, date);
        let base = BaseAggregate::new(DailyRevenueFactId::new_v4(), code, description);

        Self {
            base,
            date,
            entity_id,
            entity_kind,
            daily_revenue,
            mtd_revenue,
            ly_revenue,
            goal_revenue,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.entity_id.trim().is_empty() {
            return Err("Entity id cannot be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRevenueFactDto {
    pub date: NaiveDate,

    #[serde(rename = "entityId")]
    pub entity_id: String,

    #[serde(rename = "entityKind")]
    pub entity_kind: EntityKind,

    #[serde(rename = "dailyRevenue")]
    pub daily_revenue: f64,

    #[serde(rename = "mtdRevenue")]
    pub mtd_revenue: f64,

    #[serde(rename = "lyRevenue")]
    pub ly_revenue: Option<f64>,

    #[serde(rename = "goalRevenue")]
    pub goal_revenue: Option<f64>,
}

/// Point fix to one fact's MTD snapshot (replaces the one-off correction
/// scripts the business used to run against the raw store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MtdCorrectionDto {
    pub date: NaiveDate,

    #[serde(rename = "entityId")]
    pub entity_id: String,

    #[serde(rename = "correctedMtd")]
    pub corrected_mtd: f64,
}

/// Outcome of an applied correction, for audit logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub date: NaiveDate,

    #[serde(rename = "entityId")]
    pub entity_id: String,

    #[serde(rename = "previousMtd")]
    pub previous_mtd: f64,

    #[serde(rename = "correctedMtd")]
    pub corrected_mtd: f64,

    /// Recomputed daily_revenue for the corrected date.
    #[serde(rename = "recomputedDaily")]
    pub recomputed_daily: f64,

    /// True when the following date's daily_revenue was also recomputed.
    #[serde(rename = "nextDayAdjusted")]
    pub next_day_adjusted: bool,
}
