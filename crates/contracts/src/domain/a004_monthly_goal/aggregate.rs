use crate::domain::common::{AggregateId, BaseAggregate};
use crate::enums::EntityKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthlyGoalId(pub Uuid);

impl MonthlyGoalId {
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

impl AggregateId for MonthlyGoalId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(MonthlyGoalId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Monthly revenue goal for one entity. Natural key is (month, entity_id).
///
/// Goals live independently of daily facts: a month may have facts without a
/// goal (percent-to-goal reads as zero) and a goal without facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyGoal {
    #[serde(flatten)]
    pub base: BaseAggregate<MonthlyGoalId>,

    /// Month in "YYYY-MM" form.
    pub month: String,

    #[serde(rename = "entityId")]
    pub entity_id: String,

    #[serde(rename = "entityKind")]
    pub entity_kind: EntityKind,

    #[serde(rename = "goalAmount")]
    pub goal_amount: f64,

    /// Last-year revenue for the same month, for reference display.
    #[serde(rename = "lyRevenueReference")]
    pub ly_revenue_reference: Option<f64>,

    /// Days with expected sales activity in the month.
    #[serde(rename = "workDays")]
    pub work_days: Option<i32>,
}

impl MonthlyGoal {
    pub fn new_for_insert(
        month: String,
        entity_id: String,
        entity_kind: EntityKind,
        goal_amount: f64,
        ly_revenue_reference: Option<f64>,
        work_days: Option<i32>,
    ) -> Self {
        let id_prefix: String = entity_id.chars().take(8).collect();
        let code = format!("GOAL-{}-{}", month, id_prefix);
        let description = format!("{} goal {}", entity_kind, month);
        let base = BaseAggregate::new(MonthlyGoalId::new_v4(), code, description);

        Self {
            base,
            month,
            entity_id,
            entity_kind,
            goal_amount,
            ly_revenue_reference,
            work_days,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Goal spread over the expected working days, when work_days is set.
    pub fn goal_per_day(&self) -> Option<f64> {
        match self.work_days {
            Some(d) if d > 0 => Some(self.goal_amount / d as f64),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.entity_id.trim().is_empty() {
            return Err("Entity id cannot be empty".into());
        }
        let ok_month = self.month.len() == 7
            && self.month.as_bytes()[4] == b'-'
            && self.month[..4].chars().all(|c| c.is_ascii_digit())
            && self.month[5..].chars().all(|c| c.is_ascii_digit());
        if !ok_month {
            return Err("Month must be in YYYY-MM form".into());
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
pub struct MonthlyGoalDto {
    pub id: Option<String>,
    pub month: String,

    #[serde(rename = "entityId")]
    pub entity_id: String,

    #[serde(rename = "entityKind")]
    pub entity_kind: EntityKind,

    #[serde(rename = "goalAmount")]
    pub goal_amount: f64,

    #[serde(rename = "lyRevenueReference")]
    pub ly_revenue_reference: Option<f64>,

    #[serde(rename = "workDays")]
    pub work_days: Option<i32>,
}
