use contracts::domain::a002_sales_rep::aggregate::SalesRep;
use contracts::domain::a006_owner_mapping::aggregate::OwnerMappingDto;
use contracts::usecases::u502_map_owners::{
    MapOwnersReport, MatchRule, MatchedOwner, UnmatchedOwner,
};

use crate::domain::{a002_sales_rep, a006_owner_mapping};
use crate::usecases::u501_sync_crm_activity::{CrmActivitySource, CrmOwner};

/// Bootstraps owner mappings by matching CRM accounts to active reps.
///
/// Matching is best-effort: full name first, then the email local part.
/// Owners that match nothing are reported, not errored; most portals carry
/// plenty of non-sales accounts.
pub async fn execute(source: &dyn CrmActivitySource) -> anyhow::Result<MapOwnersReport> {
    let owners = source.list_owners().await?;
    let reps = a002_sales_rep::service::list_active().await?;

    tracing::info!("Mapping {} CRM owners against {} reps", owners.len(), reps.len());

    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    let mut mappings_upserted = 0;

    for owner in &owners {
        match match_owner(owner, &reps) {
            Some((rep, rule)) => {
                a006_owner_mapping::service::upsert(OwnerMappingDto {
                    external_owner_id: owner.id.clone(),
                    rep_id: rep.to_string_id(),
                    owner_name: owner_display_name(owner),
                    owner_email: owner.email.clone(),
                })
                .await?;
                mappings_upserted += 1;
                matched.push(MatchedOwner {
                    external_owner_id: owner.id.clone(),
                    owner_name: owner_display_name(owner),
                    rep_id: rep.to_string_id(),
                    rep_name: rep.full_name.clone(),
                    matched_by: rule,
                });
            }
            None => {
                unmatched.push(UnmatchedOwner {
                    external_owner_id: owner.id.clone(),
                    owner_name: owner_display_name(owner),
                    owner_email: owner.email.clone(),
                });
            }
        }
    }

    Ok(MapOwnersReport {
        success: true,
        owners_fetched: owners.len(),
        mappings_upserted,
        matched,
        unmatched,
    })
}

fn owner_display_name(owner: &CrmOwner) -> Option<String> {
    let name = format!(
        "{} {}",
        owner.first_name.as_deref().unwrap_or(""),
        owner.last_name.as_deref().unwrap_or("")
    )
    .trim()
    .to_string();
    (!name.is_empty()).then_some(name)
}

fn match_owner<'a>(owner: &CrmOwner, reps: &'a [SalesRep]) -> Option<(&'a SalesRep, MatchRule)> {
    if let Some(name) = owner_display_name(owner) {
        let normalized = normalize(&name);
        if let Some(rep) = reps.iter().find(|r| normalize(&r.full_name) == normalized) {
            return Some((rep, MatchRule::FullName));
        }
    }

    // "john.smith@acme.com" matches the rep "John Smith".
    if let Some(email) = &owner.email {
        if let Some(local) = email.split('@').next() {
            let from_email = normalize(&local.replace(['.', '_', '-'], " "));
            if !from_email.is_empty() {
                if let Some(rep) = reps.iter().find(|r| normalize(&r.full_name) == from_email) {
                    return Some((rep, MatchRule::EmailLocalPart));
                }
            }
        }
    }

    None
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep(name: &str) -> SalesRep {
        SalesRep::new_for_insert(
            format!("REP-{}", name),
            name.to_string(),
            None,
            None,
            None,
        )
    }

    fn owner(first: Option<&str>, last: Option<&str>, email: Option<&str>) -> CrmOwner {
        CrmOwner {
            id: "o1".into(),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            email: email.map(String::from),
        }
    }

    #[test]
    fn full_name_match_is_case_insensitive() {
        let reps = vec![rep("John Smith"), rep("Ana Gomez")];
        let (matched, rule) =
            match_owner(&owner(Some("JOHN"), Some("smith"), None), &reps).unwrap();
        assert_eq!(matched.full_name, "John Smith");
        assert_eq!(rule, MatchRule::FullName);
    }

    #[test]
    fn email_local_part_matches_when_name_does_not() {
        let reps = vec![rep("John Smith")];
        let (matched, rule) = match_owner(
            &owner(Some("J"), Some("S"), Some("john.smith@acme.com")),
            &reps,
        )
        .unwrap();
        assert_eq!(matched.full_name, "John Smith");
        assert_eq!(rule, MatchRule::EmailLocalPart);
    }

    #[test]
    fn unmatched_owner_returns_none() {
        let reps = vec![rep("John Smith")];
        assert!(match_owner(
            &owner(Some("Pat"), Some("Doe"), Some("pat.doe@acme.com")),
            &reps
        )
        .is_none());
    }

    #[test]
    fn whitespace_is_normalized_before_comparison() {
        let reps = vec![rep("John  Smith")];
        assert!(match_owner(&owner(Some("John"), Some("Smith"), None), &reps).is_some());
    }
}
