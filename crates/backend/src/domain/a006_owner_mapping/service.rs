use std::collections::HashMap;

use contracts::domain::a006_owner_mapping::aggregate::{OwnerMapping, OwnerMappingDto};
use uuid::Uuid;

use super::repository;

/// Upserts a mapping by external owner id. A CRM account keeps exactly one
/// internal rep; re-submitting moves the account to the new rep.
pub async fn upsert(dto: OwnerMappingDto) -> anyhow::Result<Uuid> {
    match repository::get_by_external_id(&dto.external_owner_id).await? {
        Some(mut existing) => {
            existing.rep_id = dto.rep_id;
            existing.owner_name = dto.owner_name;
            existing.owner_email = dto.owner_email;
            existing
                .validate()
                .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
            existing.before_write();
            let id = existing.base.id.value();
            repository::update(&existing).await?;
            Ok(id)
        }
        None => {
            let mut aggregate = OwnerMapping::new_for_insert(
                dto.external_owner_id,
                dto.rep_id,
                dto.owner_name,
                dto.owner_email,
            );
            aggregate
                .validate()
                .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
            aggregate.before_write();
            repository::insert(&aggregate).await
        }
    }
}

pub async fn list_all() -> anyhow::Result<Vec<OwnerMapping>> {
    repository::list_all().await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Full external-owner-id to rep-id lookup, loaded once per sync run.
pub async fn owner_map() -> anyhow::Result<HashMap<String, String>> {
    let mappings = repository::list_all().await?;
    Ok(mappings
        .into_iter()
        .map(|m| (m.external_owner_id, m.rep_id))
        .collect())
}
