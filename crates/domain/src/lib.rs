//! Domain entities and pure access-rights resolution.

#![forbid(unsafe_code)]

mod collection;
mod collection_options;
mod column;
mod column_rights;
mod grant;
mod import_export;

pub use collection::{CollectionId, CollectionMembership, DataCollection};
pub use collection_options::{ItemCollectionOption, ItemCollectionRights, resolve_item_collections};
pub use column::{CaseTypeId, Column, ColumnAccessPolicy, ColumnId, ColumnKind};
pub use column_rights::{
    EffectiveColumnRights, aggregate_column_rights, order_policies_by_collection_name,
};
pub use grant::{
    AccessGrant, AccessGrantInput, ItemId, ItemKind, ItemRef, MembershipRights, MembershipToggle,
};
pub use import_export::{filter_import_export_eligible, index_columns};
