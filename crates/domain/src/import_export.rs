use std::collections::{BTreeSet, HashMap};

use crate::{Column, ColumnId};

/// Keeps writable columns whose kind may be imported or exported as flat data.
///
/// Columns of derived kinds are excluded, as are writable ids missing from
/// `columns` since their kind cannot be established.
#[must_use]
pub fn filter_import_export_eligible(
    writable_column_ids: &BTreeSet<ColumnId>,
    columns: &HashMap<ColumnId, Column>,
) -> BTreeSet<ColumnId> {
    writable_column_ids
        .iter()
        .filter(|column_id| {
            columns
                .get(*column_id)
                .is_some_and(|column| !column.kind().is_derived())
        })
        .cloned()
        .collect()
}

/// Indexes columns by id for [`filter_import_export_eligible`].
#[must_use]
pub fn index_columns(columns: impl IntoIterator<Item = Column>) -> HashMap<ColumnId, Column> {
    columns
        .into_iter()
        .map(|column| (column.id().clone(), column))
        .collect()
}
