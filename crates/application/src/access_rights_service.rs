use std::collections::BTreeSet;
use std::sync::Arc;

use rightsgate_core::{AppError, AppResult, CallerIdentity};
use rightsgate_domain::{
    CaseTypeId, CollectionMembership, ColumnId, DataCollection, EffectiveColumnRights,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AccessRightsRepository;

mod case_types;
mod items;


/// Effective column rights snapshot for one case-type schema load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseTypeRights {
    /// Case type the snapshot describes.
    pub case_type_id: CaseTypeId,
    /// Readable and writable columns unioned across member collections.
    pub effective: EffectiveColumnRights,
    /// Writable columns that may take part in import and export.
    pub import_export_column_ids: BTreeSet<ColumnId>,
    /// Member collections granting access, ordered by display name.
    pub policy_collections: Vec<DataCollection>,
}

/// Application service resolving collection and column rights for callers.
#[derive(Clone)]
pub struct AccessRightsService {
    repository: Arc<dyn AccessRightsRepository>,
}

impl AccessRightsService {
    /// Creates a new access rights service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AccessRightsRepository>) -> Self {
        Self { repository }
    }

    async fn caller_membership(&self, caller: &CallerIdentity) -> AppResult<CollectionMembership> {
        let collections = self.repository.list_caller_collections(caller).await?;
        debug!(
            subject = caller.subject(),
            collection_count = collections.len(),
            "loaded caller collection membership"
        );

        Ok(CollectionMembership::new(collections))
    }
}

fn forbidden_toggle(caller: &CallerIdentity, detail: String) -> AppError {
    AppError::Forbidden(format!("subject '{}' {detail}", caller.subject()))
}
