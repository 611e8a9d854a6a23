use std::collections::BTreeSet;
use std::str::FromStr;

use rightsgate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::CollectionId;

/// Stable identifier of a case-type column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(NonEmptyString);

impl ColumnId {
    /// Creates a validated column identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Stable identifier of a case type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseTypeId(NonEmptyString);

impl CaseTypeId {
    /// Creates a validated case-type identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CaseTypeId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Supported column kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Plain value column.
    Ordinary,
    /// Reference to an organization.
    OrganizationReference,
    /// Distance computed between genetic profiles.
    GeneticDistance,
    /// Profile derived from sequencing output.
    GeneticProfile,
    /// Raw sequencing reads.
    GeneticReads,
    /// Assembled genetic sequence.
    GeneticSequence,
}

impl ColumnKind {
    /// Returns a stable storage value for the column kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ordinary => "ordinary",
            Self::OrganizationReference => "organization_reference",
            Self::GeneticDistance => "genetic_distance",
            Self::GeneticProfile => "genetic_profile",
            Self::GeneticReads => "genetic_reads",
            Self::GeneticSequence => "genetic_sequence",
        }
    }

    /// Returns whether values of this kind are derived from biological
    /// artifacts and never handled as flat data.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            Self::GeneticDistance
                | Self::GeneticProfile
                | Self::GeneticReads
                | Self::GeneticSequence
        )
    }

    /// Returns all known column kinds.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ColumnKind] = &[
            ColumnKind::Ordinary,
            ColumnKind::OrganizationReference,
            ColumnKind::GeneticDistance,
            ColumnKind::GeneticProfile,
            ColumnKind::GeneticReads,
            ColumnKind::GeneticSequence,
        ];

        ALL
    }
}

impl FromStr for ColumnKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ordinary" => Ok(Self::Ordinary),
            "organization_reference" => Ok(Self::OrganizationReference),
            "genetic_distance" => Ok(Self::GeneticDistance),
            "genetic_profile" => Ok(Self::GeneticProfile),
            "genetic_reads" => Ok(Self::GeneticReads),
            "genetic_sequence" => Ok(Self::GeneticSequence),
            _ => Err(AppError::Validation(format!(
                "unknown column kind '{value}'"
            ))),
        }
    }
}

/// Column of a case-type schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    kind: ColumnKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<NonEmptyString>,
}

impl Column {
    /// Creates a column without a display name.
    #[must_use]
    pub fn new(id: ColumnId, kind: ColumnKind) -> Self {
        Self {
            id,
            kind,
            name: None,
        }
    }

    /// Attaches a validated display name.
    pub fn with_name(mut self, name: impl Into<String>) -> AppResult<Self> {
        self.name = Some(NonEmptyString::new(name)?);
        Ok(self)
    }

    /// Returns the column identifier.
    #[must_use]
    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the column kind.
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&NonEmptyString> {
        self.name.as_ref()
    }
}

/// Column rights a caller obtains through one collection for one case type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAccessPolicy {
    case_type_id: CaseTypeId,
    collection_id: CollectionId,
    readable_column_ids: BTreeSet<ColumnId>,
    writable_column_ids: BTreeSet<ColumnId>,
}

impl ColumnAccessPolicy {
    /// Creates a column access policy.
    #[must_use]
    pub fn new(
        case_type_id: CaseTypeId,
        collection_id: CollectionId,
        readable_column_ids: BTreeSet<ColumnId>,
        writable_column_ids: BTreeSet<ColumnId>,
    ) -> Self {
        Self {
            case_type_id,
            collection_id,
            readable_column_ids,
            writable_column_ids,
        }
    }

    /// Returns the case type the policy applies to.
    #[must_use]
    pub fn case_type_id(&self) -> &CaseTypeId {
        &self.case_type_id
    }

    /// Returns the collection granting the policy.
    #[must_use]
    pub fn collection_id(&self) -> &CollectionId {
        &self.collection_id
    }

    /// Returns readable columns.
    #[must_use]
    pub fn readable_column_ids(&self) -> &BTreeSet<ColumnId> {
        &self.readable_column_ids
    }

    /// Returns writable columns.
    #[must_use]
    pub fn writable_column_ids(&self) -> &BTreeSet<ColumnId> {
        &self.writable_column_ids
    }
}
