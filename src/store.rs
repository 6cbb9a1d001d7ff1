//! Checkpointed persistence: the whole result set rewritten after every
//! completed iteration, so a crash loses at most the stay in flight.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use crate::models::ResultSet;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes the result document as pretty JSON.
///
/// Each checkpoint is a full overwrite through a temp-file rename, so a write
/// that dies halfway leaves the previous checkpoint intact.
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn checkpoint(&self, results: &ResultSet) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(results)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), entries = results.len(), "checkpoint written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}
