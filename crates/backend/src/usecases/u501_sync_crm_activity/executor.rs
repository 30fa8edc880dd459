use chrono::NaiveDate;
use contracts::usecases::u501_sync_crm_activity::{ChannelError, SyncReport};
use contracts::enums::ActivityChannel;
use thiserror::Error;

use super::aggregate::{self, RawActivityEvent};
use super::crm_api_client::CrmActivitySource;
use crate::domain::{a005_rep_activity_fact, a006_owner_mapping};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("CRM integration is not configured: {0}")]
    Configuration(String),

    #[error("invalid sync range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Runs one reconciliation pass over [start, end].
///
/// Channel fetches are independent: a failed channel contributes zero
/// events and a report entry, it does not abort the run. The batch is
/// staged fully in memory and only then written, so a mid-run failure
/// leaves the fact table untouched.
pub async fn execute(
    source: &dyn CrmActivitySource,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<SyncReport, SyncError> {
    if start > end {
        return Err(SyncError::InvalidRange { start, end });
    }

    tracing::info!("Activity sync started for {} .. {}", start, end);

    let mut events: Vec<RawActivityEvent> = Vec::new();
    let mut channel_errors: Vec<ChannelError> = Vec::new();

    for channel in ActivityChannel::all() {
        match source.fetch_channel(channel, start, end).await {
            Ok(mut fetched) => {
                tracing::info!("Channel {}: {} events", channel, fetched.len());
                events.append(&mut fetched);
            }
            Err(e) => {
                tracing::warn!("Channel {} fetch failed: {}", channel, e);
                channel_errors.push(ChannelError {
                    channel: channel.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    let owner_map = a006_owner_mapping::service::owner_map().await?;

    let activities_processed = events.len();
    let summaries = aggregate::summarize(&events);
    let summaries_created = summaries.len();
    let (facts, unmapped_owners) = aggregate::attribute(summaries, &owner_map);

    let records_upserted = a005_rep_activity_fact::service::upsert_batch(facts).await?;

    if !unmapped_owners.is_empty() {
        tracing::warn!("{} CRM owners have no rep mapping", unmapped_owners.len());
    }
    tracing::info!(
        "Activity sync finished: {} events, {} summaries, {} rows",
        activities_processed,
        summaries_created,
        records_upserted
    );

    Ok(SyncReport {
        success: true,
        message: format!("Synced activity for {} .. {}", start, end),
        start_date: start,
        end_date: end,
        activities_processed,
        summaries_created,
        records_upserted,
        unmapped_owners,
        channel_errors,
    })
}
