//! Persisted monitor state.
//!
//! The state is one flat document mapping page identifier to the count
//! observed on the previous run. It is loaded whole at the start of a
//! run and written back whole at the end; a missing file is an empty
//! mapping. Early deployments persisted a flat list of listing strings
//! instead of counts; those documents still load, as an empty mapping.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::Result;

/// Last-observed listing count per page identifier.
pub type ListingState = BTreeMap<String, u64>;

/// Whole-document load/save of the monitor state.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the state document. Missing backing data is an empty mapping.
    async fn load(&self) -> Result<ListingState>;

    /// Overwrite the state document.
    async fn save(&self, state: &ListingState) -> Result<()>;
}

/// JSON file-backed state store.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> Result<ListingState> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file, starting empty");
                return Ok(ListingState::new());
            }
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_str(&raw)?;

        // Legacy documents were a flat list of listing strings and carry
        // no counts to diff against.
        if value.is_array() {
            info!(
                path = %self.path.display(),
                "legacy listing snapshot found, starting with empty counts"
            );
            return Ok(ListingState::new());
        }

        Ok(serde_json::from_value(value)?)
    }

    async fn save(&self, state: &ListingState) -> Result<()> {
        let document = serde_json::to_string_pretty(state)?;
        tokio::fs::write(&self.path, document).await?;
        debug!(path = %self.path.display(), pages = state.len(), "state saved");
        Ok(())
    }
}
