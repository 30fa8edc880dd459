use crate::domain::common::{AggregateId, BaseAggregate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepActivityFactId(pub Uuid);

impl RepActivityFactId {
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

impl AggregateId for RepActivityFactId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(RepActivityFactId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// One day of CRM engagement counts for one rep. Natural key (date, rep_id).
///
/// Written only by the activity reconciler; each sync run fully replaces the
/// row for its key, so re-running a date range never double-counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepActivityFact {
    #[serde(flatten)]
    pub base: BaseAggregate<RepActivityFactId>,

    pub date: NaiveDate,

    #[serde(rename = "repId")]
    pub rep_id: String,

    pub calls: i32,
    pub emails: i32,
    pub meetings: i32,
    pub notes: i32,
    pub sms: i32,

    #[serde(rename = "totalActivities")]
    pub total_activities: i32,
}

impl RepActivityFact {
    pub fn new_for_insert(
        date: NaiveDate,
        rep_id: String,
        calls: i32,
        emails: i32,
        meetings: i32,
        notes: i32,
        sms: i32,
    ) -> Self {
        // Truncate on char boundaries, rep ids are not guaranteed ASCII.
        let id_prefix: String = rep_id.chars().take(8).collect();
        let code = format!("ACT-{}-{}", date.format("%Y%m%d"), id_prefix);
        let description = format!("rep activity {}", date);
        let base = BaseAggregate::new(RepActivityFactId::new_v4(), code, description);

        Self {
            base,
            date,
            rep_id,
            calls,
            emails,
            meetings,
            notes,
            sms,
            total_activities: calls + emails + meetings + notes + sms,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }

    /// Channel counts plus total, for order-insensitive comparisons in tests
    /// and idempotence checks.
    pub fn counts(&self) -> (i32, i32, i32, i32, i32, i32) {
        (
            self.calls,
            self.emails,
            self.meetings,
            self.notes,
            self.sms,
            self.total_activities,
        )
    }
}
