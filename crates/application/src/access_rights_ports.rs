use async_trait::async_trait;
use rightsgate_core::{AppResult, CallerIdentity};
use rightsgate_domain::{
    AccessGrant, CaseTypeId, Column, ColumnAccessPolicy, DataCollection, ItemRef,
};

/// Repository port supplying the latest grant and collection snapshots.
///
/// Implementations own fetching, retries and caching. Every call is expected
/// to return the freshest snapshot available.
#[async_trait]
pub trait AccessRightsRepository: Send + Sync {
    /// Lists the collections the caller belongs to.
    async fn list_caller_collections(
        &self,
        caller: &CallerIdentity,
    ) -> AppResult<Vec<DataCollection>>;

    /// Finds the caller's access grant for one case or case set.
    async fn find_item_access_grant(
        &self,
        caller: &CallerIdentity,
        item: &ItemRef,
    ) -> AppResult<Option<AccessGrant>>;

    /// Lists the column access policies the caller holds for a case type.
    async fn list_column_access_policies(
        &self,
        caller: &CallerIdentity,
        case_type_id: &CaseTypeId,
    ) -> AppResult<Vec<ColumnAccessPolicy>>;

    /// Lists the schema columns of a case type.
    async fn list_case_type_columns(&self, case_type_id: &CaseTypeId) -> AppResult<Vec<Column>>;
}
