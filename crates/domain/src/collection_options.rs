//! Per-item collection membership resolution.
//!
//! Collection ids referenced by a grant but absent from the caller's
//! membership are dropped, never reported.

use serde::{Deserialize, Serialize};

use crate::{AccessGrant, CollectionId, CollectionMembership, DataCollection, MembershipToggle};

/// One selectable collection for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCollectionOption {
    /// Collection the option toggles.
    pub collection_id: CollectionId,
    /// Collection display name.
    pub label: String,
    /// Whether the item is currently shared in the collection.
    pub is_selected: bool,
    /// Whether the caller is blocked from toggling the option.
    pub is_disabled: bool,
}

impl ItemCollectionOption {
    /// Returns whether the option permits the requested toggle.
    #[must_use]
    pub fn permits(&self, toggle: MembershipToggle) -> bool {
        if self.is_disabled {
            return false;
        }

        match toggle {
            MembershipToggle::Add => !self.is_selected,
            MembershipToggle::Remove => self.is_selected,
        }
    }
}

/// Collections governing one item and the toggles offered to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCollectionRights {
    /// Member collections the item is linked to.
    pub governing_collections: Vec<DataCollection>,
    /// Governing collections in which the item is explicitly shared.
    pub shared_in_collections: Vec<DataCollection>,
    /// Toggle options ordered by collection display name.
    pub options: Vec<ItemCollectionOption>,
}

impl ItemCollectionRights {
    /// Finds the option offered for a collection.
    #[must_use]
    pub fn option(&self, collection_id: &CollectionId) -> Option<&ItemCollectionOption> {
        self.options
            .iter()
            .find(|option| &option.collection_id == collection_id)
    }
}

/// Resolves governing collections and toggle options for one item.
#[must_use]
pub fn resolve_item_collections(
    grant: &AccessGrant,
    membership: &CollectionMembership,
) -> ItemCollectionRights {
    let governing_collections: Vec<DataCollection> = grant
        .governing_collection_ids()
        .iter()
        .filter_map(|collection_id| membership.get(collection_id))
        .cloned()
        .collect();

    let shared_in_collections = governing_collections
        .iter()
        .filter(|collection| grant.is_shared_in(collection.id()))
        .cloned()
        .collect();

    let mut members: Vec<&DataCollection> = membership.collections().iter().collect();
    members.sort_by(|left, right| left.cmp_by_display_name(right));

    let options = members
        .into_iter()
        .filter_map(|collection| collection_option(grant, collection))
        .collect();

    ItemCollectionRights {
        governing_collections,
        shared_in_collections,
        options,
    }
}

fn collection_option(
    grant: &AccessGrant,
    collection: &DataCollection,
) -> Option<ItemCollectionOption> {
    let collection_id = collection.id();
    let is_selected = grant.is_shared_in(collection_id);
    let is_disabled = if is_selected {
        !grant.can_remove_from(collection_id)
    } else {
        !grant.can_add_to(collection_id)
    };

    // Disabled and unselected options carry no information for the caller.
    if is_disabled && !is_selected {
        return None;
    }

    Some(ItemCollectionOption {
        collection_id: collection_id.clone(),
        label: collection.name().as_str().to_owned(),
        is_selected,
        is_disabled,
    })
}
