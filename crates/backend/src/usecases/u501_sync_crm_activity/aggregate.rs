//! Pure staging pipeline for the activity reconciler: raw CRM events in,
//! fully attributed rep activity facts out. Nothing here touches the
//! network or the database, which is what makes a failed run side-effect
//! free before the batch write.

use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a005_rep_activity_fact::aggregate::RepActivityFact;
use contracts::enums::ActivityChannel;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One engagement event as fetched from the CRM, before attribution.
#[derive(Debug, Clone)]
pub struct RawActivityEvent {
    pub id: String,
    pub channel: ActivityChannel,
    pub owner_id: Option<String>,
    /// When the engagement happened. CRM records created by imports can
    /// miss this; the record creation time stands in.
    pub occurred_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RawActivityEvent {
    pub fn event_date(&self) -> NaiveDate {
        self.occurred_at.unwrap_or(self.created_at).date_naive()
    }
}

/// Per-channel counts for one (date, external owner) cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerDaySummary {
    pub calls: i32,
    pub emails: i32,
    pub meetings: i32,
    pub notes: i32,
    pub sms: i32,
}

impl OwnerDaySummary {
    fn add(&mut self, channel: ActivityChannel) {
        match channel {
            ActivityChannel::Call => self.calls += 1,
            ActivityChannel::Email => self.emails += 1,
            ActivityChannel::Meeting => self.meetings += 1,
            ActivityChannel::Note => self.notes += 1,
            ActivityChannel::Sms => self.sms += 1,
        }
    }
}

fn has_owner(owner_id: &Option<String>) -> bool {
    match owner_id {
        Some(id) => !id.trim().is_empty() && id != "undefined",
        None => false,
    }
}

/// Collapses raw events into one summary per (date, external owner).
///
/// Events without a usable owner id are dropped here; an unattributable
/// event can never become a rep fact. Output order is deterministic, so
/// re-running the same input yields the same batch.
pub fn summarize(events: &[RawActivityEvent]) -> BTreeMap<(NaiveDate, String), OwnerDaySummary> {
    let mut summaries: BTreeMap<(NaiveDate, String), OwnerDaySummary> = BTreeMap::new();
    for event in events {
        if !has_owner(&event.owner_id) {
            continue;
        }
        let owner = event.owner_id.clone().unwrap_or_default();
        summaries
            .entry((event.event_date(), owner))
            .or_default()
            .add(event.channel);
    }
    summaries
}

/// Attributes owner-day summaries to reps through the owner map.
///
/// Summaries whose owner has no mapping are skipped, and each unknown
/// owner is reported once, sorted, for the sync report.
pub fn attribute(
    summaries: BTreeMap<(NaiveDate, String), OwnerDaySummary>,
    owner_map: &HashMap<String, String>,
) -> (Vec<RepActivityFact>, Vec<String>) {
    let mut facts = Vec::new();
    let mut unmapped: BTreeSet<String> = BTreeSet::new();

    for ((date, owner_id), summary) in summaries {
        match owner_map.get(&owner_id) {
            Some(rep_id) => {
                facts.push(RepActivityFact::new_for_insert(
                    date,
                    rep_id.clone(),
                    summary.calls,
                    summary.emails,
                    summary.meetings,
                    summary.notes,
                    summary.sms,
                ));
            }
            None => {
                unmapped.insert(owner_id);
            }
        }
    }

    (facts, unmapped.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(
        id: &str,
        channel: ActivityChannel,
        owner: Option<&str>,
        occurred: Option<&str>,
    ) -> RawActivityEvent {
        RawActivityEvent {
            id: id.to_string(),
            channel,
            owner_id: owner.map(String::from),
            occurred_at: occurred.map(|s| {
                DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
            }),
            created_at: Utc.with_ymd_and_hms(2025, 6, 20, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn events_group_by_date_and_owner() {
        let events = vec![
            event("1", ActivityChannel::Call, Some("o1"), Some("2025-06-10T09:00:00Z")),
            event("2", ActivityChannel::Call, Some("o1"), Some("2025-06-10T15:00:00Z")),
            event("3", ActivityChannel::Email, Some("o1"), Some("2025-06-11T09:00:00Z")),
            event("4", ActivityChannel::Sms, Some("o2"), Some("2025-06-10T09:00:00Z")),
        ];
        let summaries = summarize(&events);
        assert_eq!(summaries.len(), 3);

        let d10 = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let o1_d10 = &summaries[&(d10, "o1".to_string())];
        assert_eq!(o1_d10.calls, 2);
        assert_eq!(o1_d10.emails, 0);
        assert_eq!(summaries[&(d10, "o2".to_string())].sms, 1);
    }

    #[test]
    fn missing_or_placeholder_owners_are_dropped() {
        let events = vec![
            event("1", ActivityChannel::Call, None, Some("2025-06-10T09:00:00Z")),
            event("2", ActivityChannel::Call, Some(""), Some("2025-06-10T09:00:00Z")),
            event("3", ActivityChannel::Call, Some("undefined"), Some("2025-06-10T09:00:00Z")),
            event("4", ActivityChannel::Call, Some("o1"), Some("2025-06-10T09:00:00Z")),
        ];
        let summaries = summarize(&events);
        assert_eq!(summaries.len(), 1);
    }

    #[test]
    fn creation_time_stands_in_for_missing_timestamp() {
        let events = vec![event("1", ActivityChannel::Note, Some("o1"), None)];
        let summaries = summarize(&events);
        let d20 = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert!(summaries.contains_key(&(d20, "o1".to_string())));
    }

    #[test]
    fn summarize_is_idempotent() {
        let events = vec![
            event("1", ActivityChannel::Call, Some("o1"), Some("2025-06-10T09:00:00Z")),
            event("2", ActivityChannel::Meeting, Some("o2"), Some("2025-06-11T09:00:00Z")),
        ];
        assert_eq!(summarize(&events), summarize(&events));
    }

    #[test]
    fn unmapped_owners_reported_once_and_sorted() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        let mut summaries: BTreeMap<(NaiveDate, String), OwnerDaySummary> = BTreeMap::new();
        summaries.insert((d, "zeta".into()), OwnerDaySummary::default());
        summaries.insert((d2, "zeta".into()), OwnerDaySummary::default());
        summaries.insert((d, "alpha".into()), OwnerDaySummary::default());

        let owner_map = HashMap::new();
        let (facts, unmapped) = attribute(summaries, &owner_map);
        assert!(facts.is_empty());
        assert_eq!(unmapped, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn mapped_summaries_become_rep_facts() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let mut summaries: BTreeMap<(NaiveDate, String), OwnerDaySummary> = BTreeMap::new();
        summaries.insert(
            (d, "o1".into()),
            OwnerDaySummary {
                calls: 3,
                emails: 2,
                meetings: 1,
                notes: 0,
                sms: 4,
            },
        );

        let mut owner_map = HashMap::new();
        owner_map.insert("o1".to_string(), "rep-1".to_string());

        let (facts, unmapped) = attribute(summaries, &owner_map);
        assert!(unmapped.is_empty());
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].rep_id, "rep-1");
        assert_eq!(facts[0].counts(), (3, 2, 1, 0, 4, 10));
    }
}
