use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerMappingId(pub Uuid);

impl OwnerMappingId {
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

impl AggregateId for OwnerMappingId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(OwnerMappingId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Link from an external CRM owner account to exactly one internal rep.
///
/// Many CRM accounts have no mapping at all (non-sales staff, terminated
/// accounts); events from those owners are skipped during reconciliation,
/// never errored. Several historical CRM accounts may map to the same rep,
/// but one external owner never maps to more than one rep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerMapping {
    #[serde(flatten)]
    pub base: BaseAggregate<OwnerMappingId>,

    #[serde(rename = "externalOwnerId")]
    pub external_owner_id: String,

    #[serde(rename = "repId")]
    pub rep_id: String,

    /// Owner display name as reported by the CRM, for the mapping UI.
    #[serde(rename = "ownerName")]
    pub owner_name: Option<String>,

    #[serde(rename = "ownerEmail")]
    pub owner_email: Option<String>,
}

impl OwnerMapping {
    pub fn new_for_insert(
        external_owner_id: String,
        rep_id: String,
        owner_name: Option<String>,
        owner_email: Option<String>,
    ) -> Self {
        let code = format!("MAP-{}", external_owner_id);
        let description = owner_name.clone().unwrap_or_else(|| external_owner_id.clone());
        let base = BaseAggregate::new(OwnerMappingId::new_v4(), code, description);

        Self {
            base,
            external_owner_id,
            rep_id,
            owner_name,
            owner_email,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.external_owner_id.trim().is_empty() {
            return Err("External owner id cannot be empty".into());
        }
        if self.rep_id.trim().is_empty() {
            return Err("Rep id cannot be empty".into());
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
pub struct OwnerMappingDto {
    #[serde(rename = "externalOwnerId")]
    pub external_owner_id: String,

    #[serde(rename = "repId")]
    pub rep_id: String,

    #[serde(rename = "ownerName")]
    pub owner_name: Option<String>,

    #[serde(rename = "ownerEmail")]
    pub owner_email: Option<String>,
}
