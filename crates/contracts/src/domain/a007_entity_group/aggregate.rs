use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityGroupId(pub Uuid);

impl EntityGroupId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for EntityGroupId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EntityGroupId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Membership of one entity in one named reporting group.
///
/// Replaces hardcoded store-name lists for composite figures like regional
/// revenue rollups: membership follows the entity id, so renaming a store
/// does not silently drop it from the group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityGroup {
    #[serde(flatten)]
    pub base: BaseAggregate<EntityGroupId>,

    #[serde(rename = "entityId")]
    pub entity_id: String,

    /// Group label, e.g. "nga" or "new-stores".
    #[serde(rename = "groupTag")]
    pub group_tag: String,

    /// Display name shown on the dashboard summary row.
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl EntityGroup {
    pub fn new_for_insert(entity_id: String, group_tag: String, display_name: String) -> Self {
        let code = format!("GRP-{}", group_tag);
        let base = BaseAggregate::new(EntityGroupId::new_v4(), code, display_name.clone());

        Self {
            base,
            entity_id,
            group_tag,
            display_name,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.entity_id.trim().is_empty() {
            return Err("Entity id cannot be empty".into());
        }
        if self.group_tag.trim().is_empty() {
            return Err("Group tag cannot be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityGroupDto {
    #[serde(rename = "entityId")]
    pub entity_id: String,

    #[serde(rename = "groupTag")]
    pub group_tag: String,

    #[serde(rename = "displayName")]
    pub display_name: String,
}
