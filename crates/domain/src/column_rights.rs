//! Column rights aggregated across a caller's collection memberships.
//!
//! Rights are OR-combined: holding a policy through any member collection
//! grants its columns. Policies for collections outside the membership grant
//! nothing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{CollectionMembership, ColumnAccessPolicy, ColumnId, DataCollection};

/// Effective column access for one case type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EffectiveColumnRights {
    /// Columns readable through at least one member collection.
    pub readable_column_ids: BTreeSet<ColumnId>,
    /// Columns writable through at least one member collection.
    pub writable_column_ids: BTreeSet<ColumnId>,
}

impl EffectiveColumnRights {
    /// Returns whether the column is readable.
    #[must_use]
    pub fn can_read(&self, column_id: &ColumnId) -> bool {
        self.readable_column_ids.contains(column_id)
    }

    /// Returns whether the column is writable.
    #[must_use]
    pub fn can_write(&self, column_id: &ColumnId) -> bool {
        self.writable_column_ids.contains(column_id)
    }
}

/// Unions readable and writable columns over policies held through member
/// collections.
#[must_use]
pub fn aggregate_column_rights(
    policies: &[ColumnAccessPolicy],
    membership: &CollectionMembership,
) -> EffectiveColumnRights {
    let held: Vec<&ColumnAccessPolicy> = policies
        .iter()
        .filter(|policy| membership.contains(policy.collection_id()))
        .collect();

    EffectiveColumnRights {
        readable_column_ids: held
            .iter()
            .flat_map(|policy| policy.readable_column_ids().iter().cloned())
            .collect(),
        writable_column_ids: held
            .iter()
            .flat_map(|policy| policy.writable_column_ids().iter().cloned())
            .collect(),
    }
}

/// Lists held policies with their collection, ordered by collection name.
///
/// Policies sharing a collection keep their input order.
#[must_use]
pub fn order_policies_by_collection_name<'a>(
    policies: &'a [ColumnAccessPolicy],
    membership: &'a CollectionMembership,
) -> Vec<(&'a DataCollection, &'a ColumnAccessPolicy)> {
    let mut ordered: Vec<(&DataCollection, &ColumnAccessPolicy)> = policies
        .iter()
        .filter_map(|policy| {
            membership
                .get(policy.collection_id())
                .map(|collection| (collection, policy))
        })
        .collect();
    ordered.sort_by(|(left, _), (right, _)| left.cmp_by_display_name(right));

    ordered
}
