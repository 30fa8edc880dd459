use chrono::NaiveDate;
use contracts::domain::a005_rep_activity_fact::aggregate::RepActivityFact;

use super::repository;

/// Replace-upsert one day's counts for one rep.
///
/// The sync pipeline stages the whole batch before calling this, so a row
/// for (date, rep) is always a full snapshot, never an increment. Returns
/// true on insert, false on replace.
pub async fn upsert(fact: RepActivityFact) -> anyhow::Result<bool> {
    match repository::get_by_key(fact.date, &fact.rep_id).await? {
        Some(mut existing) => {
            existing.calls = fact.calls;
            existing.emails = fact.emails;
            existing.meetings = fact.meetings;
            existing.notes = fact.notes;
            existing.sms = fact.sms;
            existing.total_activities = fact.total_activities;
            existing.before_write();
            repository::update(&existing).await?;
            Ok(false)
        }
        None => {
            let mut fact = fact;
            fact.before_write();
            repository::insert(&fact).await?;
            Ok(true)
        }
    }
}

/// Upserts a staged batch, returning the number of rows written.
pub async fn upsert_batch(facts: Vec<RepActivityFact>) -> anyhow::Result<usize> {
    let mut written = 0;
    for fact in facts {
        upsert(fact).await?;
        written += 1;
    }
    Ok(written)
}

pub async fn list_for_range(
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<Vec<RepActivityFact>> {
    repository::list_for_range(date_from, date_to).await
}

pub async fn list_for_rep(
    rep_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<Vec<RepActivityFact>> {
    repository::list_for_rep(rep_id, date_from, date_to).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn code_generation_handles_multibyte_rep_ids() {
        let fact = RepActivityFact::new_for_insert(d("2025-06-10"), "aéééé".into(), 1, 0, 0, 0, 0);
        assert_eq!(fact.base.code, "ACT-20250610-aéééé");

        let long = RepActivityFact::new_for_insert(
            d("2025-06-10"),
            "éééééééééééé".into(),
            1,
            0,
            0,
            0,
            0,
        );
        assert_eq!(long.base.code, "ACT-20250610-éééééééé");
    }

    #[tokio::test]
    async fn rerunning_a_batch_replaces_rows_instead_of_incrementing() {
        db::initialize_database(Some(":memory:")).await.unwrap();

        let staged = vec![
            RepActivityFact::new_for_insert(d("2025-06-10"), "rep-1".into(), 3, 2, 1, 0, 4),
            RepActivityFact::new_for_insert(d("2025-06-10"), "rep-2".into(), 1, 0, 0, 0, 0),
        ];

        assert_eq!(upsert_batch(staged.clone()).await.unwrap(), 2);
        assert_eq!(upsert_batch(staged).await.unwrap(), 2);

        let rows = list_for_range(d("2025-06-10"), d("2025-06-10")).await.unwrap();
        assert_eq!(rows.len(), 2);
        let rep1 = rows.iter().find(|r| r.rep_id == "rep-1").unwrap();
        assert_eq!(rep1.counts(), (3, 2, 1, 0, 4, 10));
        let rep2 = rows.iter().find(|r| r.rep_id == "rep-2").unwrap();
        assert_eq!(rep2.counts(), (1, 0, 0, 0, 0, 1));
    }
}
