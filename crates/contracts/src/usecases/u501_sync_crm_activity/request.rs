use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sync trigger body. Both dates optional; an omitted range means
/// "yesterday", the scheduled nightly case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncRequest {
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,

    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
}
