use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use contracts::enums::ActivityChannel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::aggregate::RawActivityEvent;

/// One CRM owner account, as listed by the owners endpoint.
#[derive(Debug, Clone)]
pub struct CrmOwner {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Read seam over the CRM. The executor only sees this trait, so tests
/// drive the pipeline with a scripted source and no network.
#[async_trait]
pub trait CrmActivitySource: Send + Sync {
    /// All events of one channel with a timestamp inside [start, end].
    async fn fetch_channel(
        &self,
        channel: ActivityChannel,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawActivityEvent>>;

    async fn list_owners(&self) -> Result<Vec<CrmOwner>>;
}

/// HTTP client for the HubSpot CRM v3 API.
pub struct HubSpotApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

const PAGE_LIMIT: u32 = 100;

impl HubSpotApiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
            api_key,
        }
    }

    fn object_type(channel: ActivityChannel) -> &'static str {
        match channel {
            ActivityChannel::Call => "calls",
            ActivityChannel::Email => "emails",
            ActivityChannel::Meeting => "meetings",
            ActivityChannel::Note => "notes",
            // SMS lives inside the generic communications object and is
            // told apart by its channel type property.
            ActivityChannel::Sms => "communications",
        }
    }

    async fn search_page(
        &self,
        object_type: &str,
        channel: ActivityChannel,
        start: NaiveDate,
        end: NaiveDate,
        after: Option<String>,
    ) -> Result<SearchResponse> {
        let url = format!("{}/crm/v3/objects/{}/search", self.base_url, object_type);

        // Upper bound is midnight after `end`, so the whole end day is in.
        let start_ms = start
            .and_hms_opt(0, 0, 0)
            .map(|t| t.and_utc().timestamp_millis())
            .unwrap_or(0);
        let end_ms = end
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc().timestamp_millis())
            .unwrap_or(i64::MAX);

        let mut properties = vec!["hs_timestamp".to_string(), "hubspot_owner_id".to_string()];
        if channel == ActivityChannel::Sms {
            properties.push("hs_communication_channel_type".to_string());
        }

        let request_body = SearchRequest {
            filter_groups: vec![FilterGroup {
                filters: vec![
                    Filter {
                        property_name: "hs_timestamp".to_string(),
                        operator: "GTE".to_string(),
                        value: start_ms.to_string(),
                    },
                    Filter {
                        property_name: "hs_timestamp".to_string(),
                        operator: "LTE".to_string(),
                        value: end_ms.to_string(),
                    },
                ],
            }],
            properties,
            limit: PAGE_LIMIT,
            after,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("CRM search failed for {}: {} {}", object_type, status, body);
            anyhow::bail!("CRM search for {} failed with status {}", object_type, status);
        }

        Ok(response.json::<SearchResponse>().await?)
    }
}

#[async_trait]
impl CrmActivitySource for HubSpotApiClient {
    async fn fetch_channel(
        &self,
        channel: ActivityChannel,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawActivityEvent>> {
        let object_type = Self::object_type(channel);
        let mut events = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let page = self
                .search_page(object_type, channel, start, end, after.clone())
                .await?;

            for item in page.results {
                if channel == ActivityChannel::Sms
                    && item.property("hs_communication_channel_type") != Some("SMS")
                {
                    continue;
                }
                events.push(RawActivityEvent {
                    id: item.id.clone(),
                    channel,
                    owner_id: item.property("hubspot_owner_id").map(String::from),
                    occurred_at: item
                        .property("hs_timestamp")
                        .and_then(parse_crm_timestamp),
                    created_at: item.created_at,
                });
            }

            after = page.paging.and_then(|p| p.next).map(|n| n.after);
            if after.is_none() {
                break;
            }
        }

        tracing::debug!("Fetched {} {} events", events.len(), channel);
        Ok(events)
    }

    async fn list_owners(&self) -> Result<Vec<CrmOwner>> {
        let mut owners = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut url = format!("{}/crm/v3/owners?limit={}", self.base_url, PAGE_LIMIT);
            if let Some(cursor) = &after {
                url.push_str(&format!("&after={}", cursor));
            }

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.api_key)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::error!("CRM owners request failed: {} {}", status, body);
                anyhow::bail!("CRM owners request failed with status {}", status);
            }

            let page = response.json::<OwnersResponse>().await?;
            for owner in page.results {
                owners.push(CrmOwner {
                    id: owner.id,
                    first_name: owner.first_name,
                    last_name: owner.last_name,
                    email: owner.email,
                });
            }

            after = page.paging.and_then(|p| p.next).map(|n| n.after);
            if after.is_none() {
                break;
            }
        }

        Ok(owners)
    }
}

/// CRM timestamps arrive as ISO-8601 strings or epoch milliseconds
/// depending on the property's age in the portal.
fn parse_crm_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}

// === Wire types ===

#[derive(Debug, Serialize)]
struct SearchRequest {
    #[serde(rename = "filterGroups")]
    filter_groups: Vec<FilterGroup>,
    properties: Vec<String>,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<String>,
}

#[derive(Debug, Serialize)]
struct FilterGroup {
    filters: Vec<Filter>,
}

#[derive(Debug, Serialize)]
struct Filter {
    #[serde(rename = "propertyName")]
    property_name: String,
    operator: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
    #[serde(default)]
    properties: HashMap<String, Option<String>>,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

impl SearchResult {
    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(|v| v.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct Paging {
    next: Option<PagingNext>,
}

#[derive(Debug, Deserialize)]
struct PagingNext {
    after: String,
}

#[derive(Debug, Deserialize)]
struct OwnersResponse {
    results: Vec<OwnerResult>,
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct OwnerResult {
    id: String,
    #[serde(rename = "firstName")]
    first_name: Option<String>,
    #[serde(rename = "lastName")]
    last_name: Option<String>,
    email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_and_epoch_timestamps() {
        let iso = parse_crm_timestamp("2025-06-10T09:30:00Z").unwrap();
        assert_eq!(iso.date_naive(), NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());

        let epoch = parse_crm_timestamp("1749547800000").unwrap();
        assert_eq!(epoch.date_naive(), NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());

        assert!(parse_crm_timestamp("not-a-timestamp").is_none());
    }

    #[test]
    fn sms_channel_uses_communications_object() {
        assert_eq!(HubSpotApiClient::object_type(ActivityChannel::Sms), "communications");
        assert_eq!(HubSpotApiClient::object_type(ActivityChannel::Call), "calls");
    }
}
