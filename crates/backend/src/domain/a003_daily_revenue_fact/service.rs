use chrono::{Datelike, NaiveDate};
use contracts::domain::a003_daily_revenue_fact::aggregate::{
    CorrectionResult, DailyRevenueFact, DailyRevenueFactDto, MtdCorrectionDto,
};
use contracts::enums::EntityKind;

use super::repository;

/// Upserts a fact by its natural key (date, entity_id).
///
/// The incoming snapshot always wins. MTD is stored exactly as provided,
/// never recomputed from prior rows. Returns true when a new row was
/// inserted, false when an existing row was replaced.
pub async fn upsert(dto: DailyRevenueFactDto) -> anyhow::Result<bool> {
    match repository::get_by_key(dto.date, &dto.entity_id).await? {
        Some(mut existing) => {
            existing.daily_revenue = dto.daily_revenue;
            existing.mtd_revenue = dto.mtd_revenue;
            existing.ly_revenue = dto.ly_revenue;
            existing.goal_revenue = dto.goal_revenue;
            existing.before_write();
            repository::update(&existing).await?;
            Ok(false)
        }
        None => {
            let mut aggregate = DailyRevenueFact::new_for_insert(
                dto.date,
                dto.entity_id,
                dto.entity_kind,
                dto.daily_revenue,
                dto.mtd_revenue,
                dto.ly_revenue,
                dto.goal_revenue,
            );
            aggregate
                .validate()
                .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
            aggregate.before_write();
            repository::insert(&aggregate).await?;
            Ok(true)
        }
    }
}

/// Upserts a batch of facts, returning (inserted, updated) counts.
pub async fn upsert_batch(dtos: Vec<DailyRevenueFactDto>) -> anyhow::Result<(usize, usize)> {
    let mut inserted = 0;
    let mut updated = 0;
    for dto in dtos {
        if upsert(dto).await? {
            inserted += 1;
        } else {
            updated += 1;
        }
    }
    Ok((inserted, updated))
}

pub async fn get_by_key(
    date: NaiveDate,
    entity_id: &str,
) -> anyhow::Result<Option<DailyRevenueFact>> {
    repository::get_by_key(date, entity_id).await
}

pub async fn list_for_entity(
    entity_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<Vec<DailyRevenueFact>> {
    repository::list_for_entity(entity_id, date_from, date_to).await
}

pub async fn list_for_kind(
    kind: EntityKind,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<Vec<DailyRevenueFact>> {
    repository::list_for_kind(kind, date_from, date_to).await
}

pub async fn latest_date_for_kind(kind: EntityKind) -> anyhow::Result<Option<NaiveDate>> {
    repository::latest_date_for_kind(kind).await
}

/// Applies a manual MTD correction to one fact row.
///
/// The corrected MTD overwrites the stored snapshot. The row's daily
/// revenue is recomputed against the previous day's MTD within the same
/// month, and the immediately following day's daily revenue is adjusted
/// so its own MTD snapshot stays consistent. No rows further out are
/// touched.
pub async fn apply_correction(dto: MtdCorrectionDto) -> anyhow::Result<CorrectionResult> {
    let mut fact = repository::get_by_key(dto.date, &dto.entity_id)
        .await?
        .ok_or_else(|| {
            anyhow::anyhow!("No revenue fact for {} on {}", dto.entity_id, dto.date)
        })?;

    let previous_mtd = fact.mtd_revenue;

    let prev_day_mtd = match previous_day_in_month(dto.date) {
        Some(prev) => repository::get_by_key(prev, &dto.entity_id)
            .await?
            .map(|f| f.mtd_revenue),
        None => None,
    };

    fact.mtd_revenue = dto.corrected_mtd;
    fact.daily_revenue = daily_from_snapshots(prev_day_mtd, dto.corrected_mtd);
    fact.before_write();
    repository::update(&fact).await?;

    let mut next_day_adjusted = false;
    if let Some(next) = next_day_in_month(dto.date) {
        if let Some(mut next_fact) = repository::get_by_key(next, &dto.entity_id).await? {
            next_fact.daily_revenue =
                daily_from_snapshots(Some(dto.corrected_mtd), next_fact.mtd_revenue);
            next_fact.before_write();
            repository::update(&next_fact).await?;
            next_day_adjusted = true;
        }
    }

    Ok(CorrectionResult {
        date: dto.date,
        entity_id: dto.entity_id,
        previous_mtd,
        corrected_mtd: dto.corrected_mtd,
        recomputed_daily: fact.daily_revenue,
        next_day_adjusted,
    })
}

/// Daily revenue implied by two consecutive MTD snapshots. On the first
/// day of a month the MTD itself is the daily figure.
fn daily_from_snapshots(prev_day_mtd: Option<f64>, mtd: f64) -> f64 {
    match prev_day_mtd {
        Some(prev) => mtd - prev,
        None => mtd,
    }
}

fn previous_day_in_month(date: NaiveDate) -> Option<NaiveDate> {
    let prev = date.pred_opt()?;
    (prev.month() == date.month()).then_some(prev)
}

fn next_day_in_month(date: NaiveDate) -> Option<NaiveDate> {
    let next = date.succ_opt()?;
    (next.month() == date.month()).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn daily_is_delta_between_snapshots() {
        assert_eq!(daily_from_snapshots(Some(10_000.0), 12_500.0), 2_500.0);
    }

    #[test]
    fn daily_on_first_of_month_equals_mtd() {
        assert_eq!(daily_from_snapshots(None, 4_200.0), 4_200.0);
    }

    #[test]
    fn daily_can_go_negative_after_downward_correction() {
        // Returns processed after close can pull a day below zero.
        assert_eq!(daily_from_snapshots(Some(8_000.0), 7_400.0), -600.0);
    }

    #[test]
    fn month_boundaries_are_not_crossed() {
        assert_eq!(previous_day_in_month(d("2025-03-01")), None);
        assert_eq!(previous_day_in_month(d("2025-03-02")), Some(d("2025-03-01")));
        assert_eq!(next_day_in_month(d("2025-03-31")), None);
        assert_eq!(next_day_in_month(d("2025-02-28")), None);
        assert_eq!(next_day_in_month(d("2024-02-28")), Some(d("2024-02-29")));
    }
}
