//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod access_rights_snapshot;
mod in_memory_access_rights_repository;
mod snapshot_config;

pub use access_rights_snapshot::{
    AccessGrantRecord, AccessRightsSnapshot, CallerSnapshot, CaseTypeSnapshot, load_snapshot_file,
};
pub use in_memory_access_rights_repository::InMemoryAccessRightsRepository;
pub use snapshot_config::{SNAPSHOT_PATH_ENV, SnapshotSourceConfig, init_tracing};
