use std::cmp::Ordering;
use std::collections::HashMap;

use rightsgate_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Stable identifier of a data collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(NonEmptyString);

impl CollectionId {
    /// Creates a validated collection identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Group that scopes visibility and ownership of cases and case sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCollection {
    id: CollectionId,
    name: NonEmptyString,
}

impl DataCollection {
    /// Creates a data collection with a validated display name.
    pub fn new(id: CollectionId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the collection identifier.
    #[must_use]
    pub fn id(&self) -> &CollectionId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Orders collections by display name, ignoring case and accents.
    ///
    /// Base letters decide first, so `Émile` sorts among the `E`s. Accents,
    /// then the exact name, then the identifier break ties, so the order is
    /// total and independent of input order.
    #[must_use]
    pub fn cmp_by_display_name(&self, other: &Self) -> Ordering {
        let (left, right) = (self.name.as_str(), other.name.as_str());

        base_letters(left)
            .cmp(&base_letters(right))
            .then_with(|| folded(left).cmp(&folded(right)))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

fn folded(name: &str) -> String {
    name.nfd().collect::<String>().to_lowercase()
}

// Decomposed, lower-cased, with combining marks dropped.
fn base_letters(name: &str) -> String {
    folded(name)
        .chars()
        .filter(|character| !is_combining_mark(*character))
        .collect()
}

/// Collections the current caller belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionMembership {
    collections: Vec<DataCollection>,
    index: HashMap<CollectionId, usize>,
}

impl CollectionMembership {
    /// Creates a membership snapshot. Later duplicates of an id are ignored.
    #[must_use]
    pub fn new(collections: impl IntoIterator<Item = DataCollection>) -> Self {
        let mut membership = Self::default();
        for collection in collections {
            if membership.index.contains_key(collection.id()) {
                continue;
            }
            membership
                .index
                .insert(collection.id().clone(), membership.collections.len());
            membership.collections.push(collection);
        }

        membership
    }

    /// Looks up a collection the caller belongs to.
    #[must_use]
    pub fn get(&self, collection_id: &CollectionId) -> Option<&DataCollection> {
        self.index
            .get(collection_id)
            .and_then(|position| self.collections.get(*position))
    }

    /// Returns whether the caller belongs to the collection.
    #[must_use]
    pub fn contains(&self, collection_id: &CollectionId) -> bool {
        self.index.contains_key(collection_id)
    }

    /// Returns member collections in the order they were supplied.
    #[must_use]
    pub fn collections(&self) -> &[DataCollection] {
        &self.collections
    }

    /// Returns whether the caller belongs to no collection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{CollectionId, CollectionMembership, DataCollection};

    fn collection(id: &str, name: &str) -> DataCollection {
        let id = CollectionId::new(id).unwrap_or_else(|_| unreachable!());
        DataCollection::new(id, name).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn collection_requires_name() {
        let id = CollectionId::new("A").unwrap_or_else(|_| unreachable!());
        assert!(DataCollection::new(id, " ").is_err());
        assert!(CollectionId::new("").is_err());
    }

    #[test]
    fn membership_keeps_first_duplicate() {
        let membership =
            CollectionMembership::new([collection("A", "Alpha"), collection("A", "Other")]);

        assert_eq!(membership.collections().len(), 1);
        let id = CollectionId::new("A").unwrap_or_else(|_| unreachable!());
        assert_eq!(
            membership.get(&id).map(|value| value.name().as_str()),
            Some("Alpha")
        );
    }

    #[test]
    fn display_name_order_ignores_case() {
        let lower = collection("B", "beta");
        let upper = collection("A", "Alpha");
        assert_eq!(upper.cmp_by_display_name(&lower), Ordering::Less);

        let same_name = collection("C", "alpha");
        assert_ne!(upper.cmp_by_display_name(&same_name), Ordering::Equal);
    }

    #[test]
    fn display_name_order_places_accented_names_by_base_letter() {
        let mut collections = vec![
            collection("Z", "Zulu"),
            collection("E", "Émile"),
            collection("F", "Foxtrot"),
            collection("D", "emile"),
        ];
        collections.sort_by(DataCollection::cmp_by_display_name);

        let names: Vec<&str> = collections
            .iter()
            .map(|collection| collection.name().as_str())
            .collect();
        assert_eq!(names, vec!["emile", "Émile", "Foxtrot", "Zulu"]);
    }

    #[test]
    fn membership_reports_emptiness() {
        assert!(CollectionMembership::default().is_empty());
        assert!(!CollectionMembership::new([collection("A", "Alpha")]).is_empty());
    }
}
