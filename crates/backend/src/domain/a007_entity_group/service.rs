use std::collections::BTreeMap;

use contracts::domain::a007_entity_group::aggregate::{EntityGroup, EntityGroupDto};
use uuid::Uuid;

use super::repository;

/// Upserts membership by its natural key (entity_id, group_tag).
pub async fn upsert(dto: EntityGroupDto) -> anyhow::Result<Uuid> {
    match repository::get_by_key(&dto.entity_id, &dto.group_tag).await? {
        Some(mut existing) => {
            existing.display_name = dto.display_name;
            existing
                .validate()
                .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
            existing.before_write();
            let id = existing.base.id.value();
            repository::update(&existing).await?;
            Ok(id)
        }
        None => {
            let mut aggregate =
                EntityGroup::new_for_insert(dto.entity_id, dto.group_tag, dto.display_name);
            aggregate
                .validate()
                .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
            aggregate.before_write();
            repository::insert(&aggregate).await
        }
    }
}

pub async fn list_all() -> anyhow::Result<Vec<EntityGroup>> {
    repository::list_all().await
}

pub async fn list_for_tag(group_tag: &str) -> anyhow::Result<Vec<EntityGroup>> {
    repository::list_for_tag(group_tag).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// All memberships keyed by group tag, in stable tag order.
pub async fn grouped_by_tag() -> anyhow::Result<BTreeMap<String, Vec<EntityGroup>>> {
    let mut grouped: BTreeMap<String, Vec<EntityGroup>> = BTreeMap::new();
    for membership in repository::list_all().await? {
        grouped
            .entry(membership.group_tag.clone())
            .or_default()
            .push(membership);
    }
    Ok(grouped)
}
