use contracts::domain::a004_monthly_goal::aggregate::{MonthlyGoal, MonthlyGoalDto};
use contracts::enums::EntityKind;
use uuid::Uuid;

use super::repository;

/// Upserts a goal by its natural key (month, entity_id).
pub async fn upsert(dto: MonthlyGoalDto) -> anyhow::Result<Uuid> {
    match repository::get_by_key(&dto.month, &dto.entity_id).await? {
        Some(mut existing) => {
            existing.goal_amount = dto.goal_amount;
            existing.ly_revenue_reference = dto.ly_revenue_reference;
            existing.work_days = dto.work_days;
            existing
                .validate()
                .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
            existing.before_write();
            let id = existing.base.id.value();
            repository::update(&existing).await?;
            Ok(id)
        }
        None => {
            let mut aggregate = MonthlyGoal::new_for_insert(
                dto.month,
                dto.entity_id,
                dto.entity_kind,
                dto.goal_amount,
                dto.ly_revenue_reference,
                dto.work_days,
            );
            aggregate
                .validate()
                .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
            aggregate.before_write();
            repository::insert(&aggregate).await
        }
    }
}

pub async fn get_by_key(month: &str, entity_id: &str) -> anyhow::Result<Option<MonthlyGoal>> {
    repository::get_by_key(month, entity_id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<MonthlyGoal>> {
    repository::get_by_id(id).await
}

pub async fn list_for_month(
    month: &str,
    kind: Option<EntityKind>,
) -> anyhow::Result<Vec<MonthlyGoal>> {
    repository::list_for_month(month, kind).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(amount: f64, work_days: Option<i32>) -> MonthlyGoal {
        MonthlyGoal::new_for_insert(
            "2025-06".into(),
            "11111111-2222-3333-4444-555555555555".into(),
            EntityKind::Store,
            amount,
            None,
            work_days,
        )
    }

    #[test]
    fn goal_per_day_needs_positive_work_days() {
        assert_eq!(goal(26_000.0, Some(26)).goal_per_day(), Some(1_000.0));
        assert_eq!(goal(26_000.0, Some(0)).goal_per_day(), None);
        assert_eq!(goal(26_000.0, None).goal_per_day(), None);
    }

    #[test]
    fn month_format_is_validated() {
        assert!(goal(100.0, None).validate().is_ok());
        let mut bad = goal(100.0, None);
        bad.month = "2025/06".into();
        assert!(bad.validate().is_err());
        bad.month = "2025-6".into();
        assert!(bad.validate().is_err());
    }
}
