use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(pub Uuid);

impl StoreId {
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

impl AggregateId for StoreId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(StoreId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Retail location. `base.description` is the store display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(flatten)]
    pub base: BaseAggregate<StoreId>,

    #[serde(rename = "storeType")]
    pub store_type: String,

    pub region: Option<String>,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Store {
    pub fn new_for_insert(
        code: String,
        description: String,
        store_type: String,
        region: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(StoreId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            store_type,
            region,
            is_active: true,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &StoreDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.store_type = dto.store_type.clone();
        self.region = dto.region.clone();
        self.is_active = dto.is_active;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Store name cannot be empty".into());
        }
        if self.store_type.trim().is_empty() {
            return Err("Store type cannot be empty".into());
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

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,

    #[serde(rename = "storeType")]
    pub store_type: String,

    pub region: Option<String>,

    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,

    pub comment: Option<String>,
}

fn default_true() -> bool {
    true
}
