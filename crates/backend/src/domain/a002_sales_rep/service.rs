use super::repository;
use contracts::domain::a002_sales_rep::aggregate::{SalesRep, SalesRepDto};
use uuid::Uuid;

pub async fn create(dto: SalesRepDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("REP-{}", Uuid::new_v4()));

    let mut aggregate =
        SalesRep::new_for_insert(code, dto.full_name, dto.role, dto.email, dto.comment);
    aggregate.is_active = dto.is_active;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: SalesRepDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<SalesRep>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<SalesRep>> {
    repository::list_all().await
}

pub async fn list_active() -> anyhow::Result<Vec<SalesRep>> {
    repository::list_active().await
}
