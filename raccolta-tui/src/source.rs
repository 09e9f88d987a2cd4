//! Snapshot source backed by a JSON file exported from the host.

use std::{fs, path::PathBuf};

use raccolta_core::{SnapshotSource, SourceError, StateSnapshot};

/// Reads the state snapshot from disk on every request.
pub(crate) struct FileSource {
    path: PathBuf,
    language: Option<String>,
}

impl FileSource {
    pub(crate) fn new(path: PathBuf, language: Option<String>) -> Self {
        Self { path, language }
    }

    pub(crate) fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn snapshot(&self) -> Result<StateSnapshot, SourceError> {
        let content = fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}
