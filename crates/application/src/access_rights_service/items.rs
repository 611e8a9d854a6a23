use rightsgate_domain::{
    AccessGrant, CollectionId, ItemCollectionRights, ItemRef, MembershipToggle,
    resolve_item_collections,
};
use tracing::info;

use super::*;

impl AccessRightsService {
    /// Resolves governing collections and toggle options for one item.
    pub async fn item_collection_rights(
        &self,
        caller: &CallerIdentity,
        item: &ItemRef,
    ) -> AppResult<ItemCollectionRights> {
        let membership = self.caller_membership(caller).await?;
        let grant = self.require_item_grant(caller, item).await?;

        Ok(resolve_for_caller(caller, &grant, &membership))
    }

    /// Resolves rights for every visible item against one membership snapshot.
    ///
    /// Items without a grant are skipped.
    pub async fn item_collection_rights_batch(
        &self,
        caller: &CallerIdentity,
        items: &[ItemRef],
    ) -> AppResult<Vec<(ItemRef, ItemCollectionRights)>> {
        let membership = self.caller_membership(caller).await?;

        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            let Some(grant) = self
                .repository
                .find_item_access_grant(caller, item)
                .await?
            else {
                debug!(subject = caller.subject(), item = %item, "no access grant for item");
                continue;
            };

            resolved.push((item.clone(), resolve_for_caller(caller, &grant, &membership)));
        }

        Ok(resolved)
    }

    /// Ensures the caller may apply a membership toggle to an item.
    pub async fn require_collection_toggle(
        &self,
        caller: &CallerIdentity,
        item: &ItemRef,
        collection_id: &CollectionId,
        toggle: MembershipToggle,
    ) -> AppResult<()> {
        let rights = self.item_collection_rights(caller, item).await?;
        let denied = || {
            forbidden_toggle(
                caller,
                format!(
                    "cannot {} {item} in collection '{collection_id}'",
                    toggle.as_str()
                ),
            )
        };

        let Some(option) = rights.option(collection_id) else {
            return Err(denied());
        };

        if option.permits(toggle) {
            info!(
                subject = caller.subject(),
                display_name = caller.display_name(),
                item = %item,
                collection_id = collection_id.as_str(),
                toggle = toggle.as_str(),
                "collection toggle permitted"
            );
            return Ok(());
        }

        let already_applied = match toggle {
            MembershipToggle::Add => option.is_selected,
            MembershipToggle::Remove => !option.is_selected,
        };
        if already_applied {
            return Err(AppError::Validation(format!(
                "{item} is already {} collection '{collection_id}'",
                if option.is_selected {
                    "shared in"
                } else {
                    "absent from"
                }
            )));
        }

        Err(denied())
    }

    async fn require_item_grant(
        &self,
        caller: &CallerIdentity,
        item: &ItemRef,
    ) -> AppResult<AccessGrant> {
        self.repository
            .find_item_access_grant(caller, item)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no access grant for {item}")))
    }
}

fn resolve_for_caller(
    caller: &CallerIdentity,
    grant: &AccessGrant,
    membership: &CollectionMembership,
) -> ItemCollectionRights {
    let stale_count = grant
        .governing_collection_ids()
        .iter()
        .filter(|collection_id| !membership.contains(collection_id))
        .count();
    if stale_count > 0 {
        debug!(
            subject = caller.subject(),
            item = %grant.item(),
            stale_count,
            "dropped governing collections outside caller membership"
        );
    }

    resolve_item_collections(grant, membership)
}
