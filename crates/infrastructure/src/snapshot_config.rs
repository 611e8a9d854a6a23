use std::env;
use std::path::{Path, PathBuf};

use rightsgate_core::{AppError, AppResult};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{InMemoryAccessRightsRepository, load_snapshot_file};

/// Environment variable naming the snapshot file.
pub const SNAPSHOT_PATH_ENV: &str = "RIGHTSGATE_SNAPSHOT_PATH";

/// Where the in-memory repository loads its snapshot from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSourceConfig {
    snapshot_path: PathBuf,
}

impl SnapshotSourceConfig {
    /// Loads the configuration from process environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let snapshot_path = lookup(SNAPSHOT_PATH_ENV)
            .ok_or_else(|| AppError::Validation(format!("{SNAPSHOT_PATH_ENV} is required")))?;
        if snapshot_path.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "{SNAPSHOT_PATH_ENV} must not be empty"
            )));
        }

        Ok(Self {
            snapshot_path: PathBuf::from(snapshot_path),
        })
    }

    /// Returns the snapshot file path.
    #[must_use]
    pub fn snapshot_path(&self) -> &Path {
        self.snapshot_path.as_path()
    }

    /// Builds a repository seeded from the configured snapshot file.
    pub async fn load_repository(&self) -> AppResult<InMemoryAccessRightsRepository> {
        let snapshot = load_snapshot_file(self.snapshot_path()).await?;
        info!(
            path = %self.snapshot_path.display(),
            "loaded access rights snapshot"
        );

        Ok(InMemoryAccessRightsRepository::from_snapshot(snapshot).await)
    }
}

/// Installs the default `tracing` subscriber filtered by `RUST_LOG`.
pub fn init_tracing() -> AppResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|error| AppError::Internal(format!("failed to install tracing: {error}")))
}
