use std::collections::HashMap;

use async_trait::async_trait;
use rightsgate_application::AccessRightsRepository;
use rightsgate_core::{AppResult, CallerIdentity};
use rightsgate_domain::{
    AccessGrant, CaseTypeId, Column, ColumnAccessPolicy, DataCollection, ItemRef,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::AccessRightsSnapshot;

/// In-memory access rights repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryAccessRightsRepository {
    collections: RwLock<HashMap<String, Vec<DataCollection>>>,
    grants: RwLock<HashMap<(String, ItemRef), AccessGrant>>,
    policies: RwLock<HashMap<(String, CaseTypeId), Vec<ColumnAccessPolicy>>>,
    columns: RwLock<HashMap<CaseTypeId, Vec<Column>>>,
}

impl InMemoryAccessRightsRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            grants: RwLock::new(HashMap::new()),
            policies: RwLock::new(HashMap::new()),
            columns: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a repository seeded from a snapshot document.
    pub async fn from_snapshot(snapshot: AccessRightsSnapshot) -> Self {
        let repository = Self::new();
        let caller_count = snapshot.callers.len();
        let case_type_count = snapshot.case_types.len();

        for caller in snapshot.callers {
            repository
                .insert_caller_collections(&caller.subject, caller.collections)
                .await;
            for grant in caller.grants {
                repository
                    .insert_access_grant(&caller.subject, AccessGrant::from(grant))
                    .await;
            }
            for policy in caller.column_access_policies {
                repository
                    .insert_column_access_policy(&caller.subject, policy)
                    .await;
            }
        }
        for case_type in snapshot.case_types {
            repository
                .insert_case_type_columns(case_type.case_type_id, case_type.columns)
                .await;
        }

        info!(caller_count, case_type_count, "seeded in-memory access rights repository");
        repository
    }

    /// Replaces the collections a caller belongs to.
    pub async fn insert_caller_collections(&self, subject: &str, collections: Vec<DataCollection>) {
        self.collections
            .write()
            .await
            .insert(subject.to_owned(), collections);
    }

    /// Stores a caller's grant, replacing any earlier grant for the same item.
    pub async fn insert_access_grant(&self, subject: &str, grant: AccessGrant) {
        let key = (subject.to_owned(), grant.item().clone());
        self.grants.write().await.insert(key, grant);
    }

    /// Appends a column access policy held by a caller.
    pub async fn insert_column_access_policy(&self, subject: &str, policy: ColumnAccessPolicy) {
        let key = (subject.to_owned(), policy.case_type_id().clone());
        self.policies
            .write()
            .await
            .entry(key)
            .or_default()
            .push(policy);
    }

    /// Replaces the schema columns of a case type.
    pub async fn insert_case_type_columns(&self, case_type_id: CaseTypeId, columns: Vec<Column>) {
        self.columns.write().await.insert(case_type_id, columns);
    }
}

#[async_trait]
impl AccessRightsRepository for InMemoryAccessRightsRepository {
    async fn list_caller_collections(
        &self,
        caller: &CallerIdentity,
    ) -> AppResult<Vec<DataCollection>> {
        Ok(self
            .collections
            .read()
            .await
            .get(caller.subject())
            .cloned()
            .unwrap_or_default())
    }

    async fn find_item_access_grant(
        &self,
        caller: &CallerIdentity,
        item: &ItemRef,
    ) -> AppResult<Option<AccessGrant>> {
        Ok(self
            .grants
            .read()
            .await
            .get(&(caller.subject().to_owned(), item.clone()))
            .cloned())
    }

    async fn list_column_access_policies(
        &self,
        caller: &CallerIdentity,
        case_type_id: &CaseTypeId,
    ) -> AppResult<Vec<ColumnAccessPolicy>> {
        Ok(self
            .policies
            .read()
            .await
            .get(&(caller.subject().to_owned(), case_type_id.clone()))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_case_type_columns(&self, case_type_id: &CaseTypeId) -> AppResult<Vec<Column>> {
        Ok(self
            .columns
            .read()
            .await
            .get(case_type_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rightsgate_application::AccessRightsService;
    use rightsgate_core::CallerIdentity;
    use rightsgate_domain::{CaseTypeId, CollectionId, ItemRef, MembershipToggle};

    use super::InMemoryAccessRightsRepository;
    use crate::AccessRightsSnapshot;

    const SNAPSHOT: &str = r#"{
        "callers": [{
            "subject": "alice",
            "collections": [
                {"id": "A", "name": "Alpha"},
                {"id": "B", "name": "Beta"}
            ],
            "grants": [{
                "item": {"kind": "case", "id": "case-1"},
                "governing_collection_ids": ["A"],
                "shared_in_collection_ids": ["A"],
                "created_in_collection_id": "A",
                "addable_to_collection_ids": ["B"]
            }],
            "column_access_policies": [
                {
                    "case_type_id": "measles",
                    "collection_id": "A",
                    "readable_column_ids": ["name"],
                    "writable_column_ids": ["c1"]
                },
                {
                    "case_type_id": "measles",
                    "collection_id": "B",
                    "readable_column_ids": [],
                    "writable_column_ids": ["c2", "seq"]
                },
                {
                    "case_type_id": "measles",
                    "collection_id": "C",
                    "readable_column_ids": ["hidden"],
                    "writable_column_ids": ["hidden"]
                }
            ]
        }],
        "case_types": [{
            "case_type_id": "measles",
            "columns": [
                {"id": "c1", "kind": "ordinary"},
                {"id": "c2", "kind": "organization_reference"},
                {"id": "seq", "kind": "genetic_sequence"},
                {"id": "hidden", "kind": "ordinary"}
            ]
        }]
    }"#;

    async fn service() -> AccessRightsService {
        let snapshot = AccessRightsSnapshot::from_json(SNAPSHOT).unwrap_or_else(|_| unreachable!());
        let repository = InMemoryAccessRightsRepository::from_snapshot(snapshot).await;
        AccessRightsService::new(Arc::new(repository))
    }

    fn alice() -> CallerIdentity {
        CallerIdentity::new("alice", "Alice")
    }

    #[tokio::test]
    async fn seeded_repository_serves_item_rights() {
        let service = service().await;
        let item = ItemRef::case("case-1").unwrap_or_else(|_| unreachable!());

        let rights = service
            .item_collection_rights(&alice(), &item)
            .await
            .unwrap_or_else(|_| unreachable!());

        let alpha = CollectionId::new("A").unwrap_or_else(|_| unreachable!());
        let beta = CollectionId::new("B").unwrap_or_else(|_| unreachable!());
        let alpha_option = rights.option(&alpha).unwrap_or_else(|| unreachable!());
        assert!(alpha_option.is_selected && alpha_option.is_disabled);
        let beta_option = rights.option(&beta).unwrap_or_else(|| unreachable!());
        assert!(!beta_option.is_selected && !beta_option.is_disabled);

        let removal = service
            .require_collection_toggle(&alice(), &item, &alpha, MembershipToggle::Remove)
            .await;
        assert!(removal.is_err());
    }

    #[tokio::test]
    async fn seeded_repository_serves_case_type_rights() {
        let service = service().await;
        let case_type = CaseTypeId::new("measles").unwrap_or_else(|_| unreachable!());

        let rights = service
            .case_type_rights(&alice(), &case_type)
            .await
            .unwrap_or_else(|_| unreachable!());

        let writable: Vec<&str> = rights
            .effective
            .writable_column_ids
            .iter()
            .map(|column_id| column_id.as_str())
            .collect();
        assert_eq!(writable, vec!["c1", "c2", "seq"]);

        let eligible: Vec<&str> = rights
            .import_export_column_ids
            .iter()
            .map(|column_id| column_id.as_str())
            .collect();
        assert_eq!(eligible, vec!["c1", "c2"]);
        assert_eq!(rights.policy_collections.len(), 2);
    }

    #[tokio::test]
    async fn unknown_caller_has_no_collections() {
        let service = service().await;
        let bob = CallerIdentity::new("bob", "Bob");
        let item = ItemRef::case("case-1").unwrap_or_else(|_| unreachable!());

        let result = service.item_collection_rights(&bob, &item).await;
        assert!(result.is_err());
    }
}
