//! File-backed key/value store.
//!
//! Each entry is stored as `<data_dir>/<entry>.json`. Writes go to a
//! sibling `.tmp` file which is then renamed over the target, so a crash
//! mid-write leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError, validate_entry};

/// A [`KeyValueStore`] rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, entry: &str) -> Result<PathBuf, StorageError> {
        validate_entry(entry)?;
        Ok(self.root.join(format!("{entry}.json")))
    }
}

fn io_error(entry: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        entry: entry.to_string(),
        source,
    }
}

fn discard_tmp(tmp: &Path) {
    match fs::remove_file(tmp) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %tmp.display(), error = %e, "Failed to remove temp file"),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, entry: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(entry)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(entry, e)),
        }
    }

    fn set(&mut self, entry: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(entry)?;
        fs::create_dir_all(&self.root).map_err(|e| io_error(entry, e))?;

        let tmp = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &path)) {
            discard_tmp(&tmp);
            return Err(io_error(entry, e));
        }

        debug!(entry, bytes = value.len(), path = %path.display(), "Wrote storage entry");
        Ok(())
    }

    fn remove(&mut self, entry: &str) -> Result<(), StorageError> {
        let path = self.path_for(entry)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(entry, e)),
        }
    }
}
