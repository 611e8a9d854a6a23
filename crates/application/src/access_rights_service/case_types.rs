use rightsgate_domain::{
    ColumnAccessPolicy, aggregate_column_rights, filter_import_export_eligible, index_columns,
    order_policies_by_collection_name,
};

use super::*;

impl AccessRightsService {
    /// Returns the caller's effective column rights for a case type.
    pub async fn case_type_rights(
        &self,
        caller: &CallerIdentity,
        case_type_id: &CaseTypeId,
    ) -> AppResult<CaseTypeRights> {
        let membership = self.caller_membership(caller).await?;
        let policies: Vec<ColumnAccessPolicy> = self
            .repository
            .list_column_access_policies(caller, case_type_id)
            .await?
            .into_iter()
            .filter(|policy| policy.case_type_id() == case_type_id)
            .collect();
        let columns = index_columns(
            self.repository
                .list_case_type_columns(case_type_id)
                .await?,
        );

        let stale_count = policies
            .iter()
            .filter(|policy| !membership.contains(policy.collection_id()))
            .count();
        if stale_count > 0 {
            debug!(
                subject = caller.subject(),
                case_type_id = case_type_id.as_str(),
                stale_count,
                "dropped column access policies outside caller membership"
            );
        }

        let effective = aggregate_column_rights(&policies, &membership);
        let import_export_column_ids =
            filter_import_export_eligible(&effective.writable_column_ids, &columns);

        let mut policy_collections: Vec<DataCollection> =
            order_policies_by_collection_name(&policies, &membership)
                .into_iter()
                .map(|(collection, _)| collection.clone())
                .collect();
        policy_collections.dedup_by(|left, right| left.id() == right.id());

        Ok(CaseTypeRights {
            case_type_id: case_type_id.clone(),
            effective,
            import_export_column_ids,
            policy_collections,
        })
    }
}
