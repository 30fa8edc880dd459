use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A channel whose fetch failed during a sync run. The channel contributed
/// zero events; the rest of the run proceeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelError {
    pub channel: String,
    pub error: String,
}

/// Outcome of one reconciler run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub success: bool,
    pub message: String,

    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,

    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,

    /// Raw events fetched across all channels (before owner filtering).
    #[serde(rename = "activitiesProcessed")]
    pub activities_processed: usize,

    /// Distinct (date, owner) summaries after aggregation.
    #[serde(rename = "summariesCreated")]
    pub summaries_created: usize,

    /// Rows written to the rep activity fact table.
    #[serde(rename = "recordsUpserted")]
    pub records_upserted: usize,

    /// Owner ids with no mapping, one entry per unique owner, sorted.
    #[serde(rename = "unmappedOwners")]
    pub unmapped_owners: Vec<String>,

    #[serde(rename = "channelErrors")]
    pub channel_errors: Vec<ChannelError>,
}

/// Structured payload for a fatal sync failure. Never mixed into a 2xx.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncErrorResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl SyncErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Configuration readiness for the sync surface. Reported without touching
/// the CRM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatusResponse {
    pub status: String,

    #[serde(rename = "crmConfigured")]
    pub crm_configured: bool,

    #[serde(rename = "secretConfigured")]
    pub secret_configured: bool,

    pub timestamp: chrono::DateTime<chrono::Utc>,
}
