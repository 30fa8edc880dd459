use serde::{Deserialize, Serialize};

/// How a CRM owner was matched to a rep during the mapping bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    FullName,
    EmailLocalPart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedOwner {
    #[serde(rename = "externalOwnerId")]
    pub external_owner_id: String,

    #[serde(rename = "ownerName")]
    pub owner_name: Option<String>,

    #[serde(rename = "repId")]
    pub rep_id: String,

    #[serde(rename = "repName")]
    pub rep_name: String,

    #[serde(rename = "matchedBy")]
    pub matched_by: MatchRule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedOwner {
    #[serde(rename = "externalOwnerId")]
    pub external_owner_id: String,

    #[serde(rename = "ownerName")]
    pub owner_name: Option<String>,

    #[serde(rename = "ownerEmail")]
    pub owner_email: Option<String>,
}

/// Outcome of one owner-mapping bootstrap run. Unmatched owners are expected
/// (non-sales staff) and reported, not errored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapOwnersReport {
    pub success: bool,

    #[serde(rename = "ownersFetched")]
    pub owners_fetched: usize,

    #[serde(rename = "mappingsUpserted")]
    pub mappings_upserted: usize,

    pub matched: Vec<MatchedOwner>,
    pub unmatched: Vec<UnmatchedOwner>,
}
