use std::collections::BTreeSet;
use std::str::FromStr;

use rightsgate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::CollectionId;

/// Stable identifier of a case or case set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(NonEmptyString);

impl ItemId {
    /// Creates a validated item identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Kinds of items whose collection membership is governed by grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A single case.
    Case,
    /// A named set of cases.
    CaseSet,
}

impl ItemKind {
    /// Returns a stable storage value for the item kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::CaseSet => "case_set",
        }
    }
}

impl FromStr for ItemKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "case" => Ok(Self::Case),
            "case_set" => Ok(Self::CaseSet),
            _ => Err(AppError::Validation(format!("unknown item kind '{value}'"))),
        }
    }
}

/// Reference to one case or case set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    /// Item kind.
    pub kind: ItemKind,
    /// Item identifier.
    pub id: ItemId,
}

impl ItemRef {
    /// Creates a reference to a case.
    pub fn case(id: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            kind: ItemKind::Case,
            id: ItemId::new(id)?,
        })
    }

    /// Creates a reference to a case set.
    pub fn case_set(id: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            kind: ItemKind::CaseSet,
            id: ItemId::new(id)?,
        })
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} '{}'", self.kind.as_str(), self.id.as_str())
    }
}

/// Requested change to an item's membership of one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipToggle {
    /// Share the item into the collection.
    Add,
    /// Stop sharing the item in the collection.
    Remove,
}

impl MembershipToggle {
    /// Returns a stable storage value for the toggle.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// Add/remove rights carried by a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MembershipRights {
    /// Add and remove are permitted for every collection.
    Full,
    /// Add and remove are permitted only for the listed collections.
    Listed {
        /// Collections the item may be added to.
        addable_to: BTreeSet<CollectionId>,
        /// Collections the item may be removed from.
        removable_from: BTreeSet<CollectionId>,
    },
}

/// Input payload for constructing one access grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrantInput {
    /// Collections the item is linked to (created-in plus shared-in).
    pub governing_collection_ids: BTreeSet<CollectionId>,
    /// Collections in which the item is explicitly shared.
    pub shared_in_collection_ids: BTreeSet<CollectionId>,
    /// Collection the item was created in.
    pub created_in_collection_id: CollectionId,
    /// Collections the caller may add the item into.
    pub addable_to_collection_ids: BTreeSet<CollectionId>,
    /// Collections the caller may remove the item from.
    pub removable_from_collection_ids: BTreeSet<CollectionId>,
    /// Whether add/remove bypass the explicit lists.
    pub is_full_access: bool,
}

/// One item's relationship to data collections, seen from one caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    item: ItemRef,
    governing_collection_ids: BTreeSet<CollectionId>,
    shared_in_collection_ids: BTreeSet<CollectionId>,
    created_in_collection_id: CollectionId,
    membership_rights: MembershipRights,
}

impl AccessGrant {
    /// Creates a grant. Explicit lists are discarded under full access.
    #[must_use]
    pub fn new(item: ItemRef, input: AccessGrantInput) -> Self {
        let AccessGrantInput {
            governing_collection_ids,
            shared_in_collection_ids,
            created_in_collection_id,
            addable_to_collection_ids,
            removable_from_collection_ids,
            is_full_access,
        } = input;

        let membership_rights = if is_full_access {
            MembershipRights::Full
        } else {
            MembershipRights::Listed {
                addable_to: addable_to_collection_ids,
                removable_from: removable_from_collection_ids,
            }
        };

        Self {
            item,
            governing_collection_ids,
            shared_in_collection_ids,
            created_in_collection_id,
            membership_rights,
        }
    }

    /// Returns the item the grant applies to.
    #[must_use]
    pub fn item(&self) -> &ItemRef {
        &self.item
    }

    /// Returns the collections the item is linked to.
    #[must_use]
    pub fn governing_collection_ids(&self) -> &BTreeSet<CollectionId> {
        &self.governing_collection_ids
    }

    /// Returns the collections the item is explicitly shared in.
    #[must_use]
    pub fn shared_in_collection_ids(&self) -> &BTreeSet<CollectionId> {
        &self.shared_in_collection_ids
    }

    /// Returns the collection of origin.
    #[must_use]
    pub fn created_in_collection_id(&self) -> &CollectionId {
        &self.created_in_collection_id
    }

    /// Returns the add/remove rights.
    #[must_use]
    pub fn membership_rights(&self) -> &MembershipRights {
        &self.membership_rights
    }

    /// Returns whether add/remove bypass the explicit lists.
    #[must_use]
    pub fn is_full_access(&self) -> bool {
        matches!(self.membership_rights, MembershipRights::Full)
    }

    /// Returns whether the item is explicitly shared in the collection.
    #[must_use]
    pub fn is_shared_in(&self, collection_id: &CollectionId) -> bool {
        self.shared_in_collection_ids.contains(collection_id)
    }

    /// Returns whether the caller may add the item to the collection.
    ///
    /// The collection of origin is never addable, full access included.
    #[must_use]
    pub fn can_add_to(&self, collection_id: &CollectionId) -> bool {
        if collection_id == &self.created_in_collection_id {
            return false;
        }

        match &self.membership_rights {
            MembershipRights::Full => true,
            MembershipRights::Listed { addable_to, .. } => addable_to.contains(collection_id),
        }
    }

    /// Returns whether the caller may remove the item from the collection.
    ///
    /// The collection of origin is never removable, full access included.
    #[must_use]
    pub fn can_remove_from(&self, collection_id: &CollectionId) -> bool {
        if collection_id == &self.created_in_collection_id {
            return false;
        }

        match &self.membership_rights {
            MembershipRights::Full => true,
            MembershipRights::Listed { removable_from, .. } => {
                removable_from.contains(collection_id)
            }
        }
    }
}
