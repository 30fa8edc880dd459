use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalesRepId(pub Uuid);

impl SalesRepId {
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

impl AggregateId for SalesRepId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SalesRepId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Sales representative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRep {
    #[serde(flatten)]
    pub base: BaseAggregate<SalesRepId>,

    #[serde(rename = "fullName")]
    pub full_name: String,

    pub role: Option<String>,

    /// Work email, used by the owner-mapping bootstrap to match CRM accounts.
    pub email: Option<String>,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl SalesRep {
    pub fn new_for_insert(
        code: String,
        full_name: String,
        role: Option<String>,
        email: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(SalesRepId::new_v4(), code, full_name.clone());
        base.comment = comment;

        Self {
            base,
            full_name,
            role,
            email,
            is_active: true,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &SalesRepDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.full_name.clone();
        self.base.comment = dto.comment.clone();
        self.full_name = dto.full_name.clone();
        self.role = dto.role.clone();
        self.email = dto.email.clone();
        self.is_active = dto.is_active;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err("Rep name cannot be empty".into());
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
pub struct SalesRepDto {
    pub id: Option<String>,
    pub code: Option<String>,

    #[serde(rename = "fullName")]
    pub full_name: String,

    pub role: Option<String>,
    pub email: Option<String>,

    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,

    pub comment: Option<String>,
}

fn default_true() -> bool {
    true
}
