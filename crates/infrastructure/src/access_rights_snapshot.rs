//! JSON snapshot format consumed by the in-memory repository.

use std::collections::BTreeSet;
use std::path::Path;

use rightsgate_core::{AppError, AppResult};
use rightsgate_domain::{
    AccessGrant, AccessGrantInput, CaseTypeId, CollectionId, Column, ColumnAccessPolicy,
    DataCollection, ItemRef,
};
use serde::{Deserialize, Serialize};

/// Access grant as delivered by the data-fetch layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrantRecord {
    /// Item the grant applies to.
    pub item: ItemRef,
    /// Collections the item is linked to.
    pub governing_collection_ids: BTreeSet<CollectionId>,
    /// Collections the item is explicitly shared in.
    #[serde(default)]
    pub shared_in_collection_ids: BTreeSet<CollectionId>,
    /// Collection the item was created in.
    pub created_in_collection_id: CollectionId,
    /// Collections the caller may add the item to.
    #[serde(default)]
    pub addable_to_collection_ids: BTreeSet<CollectionId>,
    /// Collections the caller may remove the item from.
    #[serde(default)]
    pub removable_from_collection_ids: BTreeSet<CollectionId>,
    /// Full access override.
    #[serde(default)]
    pub is_full_access: bool,
}

impl From<AccessGrantRecord> for AccessGrant {
    fn from(record: AccessGrantRecord) -> Self {
        AccessGrant::new(
            record.item,
            AccessGrantInput {
                governing_collection_ids: record.governing_collection_ids,
                shared_in_collection_ids: record.shared_in_collection_ids,
                created_in_collection_id: record.created_in_collection_id,
                addable_to_collection_ids: record.addable_to_collection_ids,
                removable_from_collection_ids: record.removable_from_collection_ids,
                is_full_access: record.is_full_access,
            },
        )
    }
}

/// Everything known about one caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerSnapshot {
    /// Caller subject.
    pub subject: String,
    /// Collections the caller belongs to.
    #[serde(default)]
    pub collections: Vec<DataCollection>,
    /// Per-item grants seen by the caller.
    #[serde(default)]
    pub grants: Vec<AccessGrantRecord>,
    /// Column access policies held by the caller, across case types.
    #[serde(default)]
    pub column_access_policies: Vec<ColumnAccessPolicy>,
}

/// Schema columns of one case type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseTypeSnapshot {
    /// Case type identifier.
    pub case_type_id: CaseTypeId,
    /// Schema columns.
    pub columns: Vec<Column>,
}

/// Complete input document for the in-memory repository.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessRightsSnapshot {
    /// Caller-scoped records.
    #[serde(default)]
    pub callers: Vec<CallerSnapshot>,
    /// Case-type schemas.
    #[serde(default)]
    pub case_types: Vec<CaseTypeSnapshot>,
}

impl AccessRightsSnapshot {
    /// Parses a snapshot from JSON text.
    pub fn from_json(text: &str) -> AppResult<Self> {
        serde_json::from_str(text).map_err(|error| {
            AppError::Validation(format!("invalid access rights snapshot: {error}"))
        })
    }
}

/// Reads and parses a snapshot file.
pub async fn load_snapshot_file(path: &Path) -> AppResult<AccessRightsSnapshot> {
    let text = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Internal(format!(
            "failed to read access rights snapshot '{}': {error}",
            path.display()
        ))
    })?;

    AccessRightsSnapshot::from_json(&text)
}

#[cfg(test)]
mod tests {
    use rightsgate_domain::{AccessGrant, ColumnKind, MembershipRights};

    use super::AccessRightsSnapshot;

    const SNAPSHOT: &str = r#"{
        "callers": [{
            "subject": "alice",
            "collections": [{"id": "A", "name": "Alpha"}],
            "grants": [{
                "item": {"kind": "case_set", "id": "set-1"},
                "governing_collection_ids": ["A"],
                "created_in_collection_id": "A",
                "is_full_access": true
            }]
        }],
        "case_types": [{
            "case_type_id": "measles",
            "columns": [{"id": "seq", "kind": "genetic_sequence"}]
        }]
    }"#;

    #[test]
    fn snapshot_parses_defaults() {
        let snapshot = AccessRightsSnapshot::from_json(SNAPSHOT);
        assert!(snapshot.is_ok());
        let snapshot = snapshot.unwrap_or_default();

        let caller = &snapshot.callers[0];
        assert!(caller.column_access_policies.is_empty());
        let grant = AccessGrant::from(caller.grants[0].clone());
        assert_eq!(grant.membership_rights(), &MembershipRights::Full);
        assert!(grant.shared_in_collection_ids().is_empty());
        assert_eq!(
            snapshot.case_types[0].columns[0].kind(),
            ColumnKind::GeneticSequence
        );
    }

    #[test]
    fn snapshot_rejects_blank_collection_name() {
        let result = AccessRightsSnapshot::from_json(
            r#"{"callers": [{"subject": "alice", "collections": [{"id": "A", "name": " "}]}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn snapshot_rejects_unknown_column_kind() {
        let result = AccessRightsSnapshot::from_json(
            r#"{"case_types": [{"case_type_id": "x", "columns": [{"id": "c", "kind": "tree"}]}]}"#,
        );
        assert!(result.is_err());
    }
}
