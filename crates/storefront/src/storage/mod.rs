//! Durable storage for the storefront.
//!
//! # Layout
//!
//! Storage is a flat key/value space of named entries, each holding one JSON
//! document:
//!
//! - `buraq_customer_orders` - the customer's order history (JSON array),
//!   see [`history`]
//! - `buraq_session` - everything else the CLI keeps between runs, see
//!   [`session`]
//!
//! # Backends
//!
//! - [`FileStore`] - one `<entry>.json` file per entry in a data directory
//! - [`MemoryStore`] - in-process map, used by tests and embedders

use thiserror::Error;

pub mod file;
pub mod history;
pub mod memory;
pub mod session;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on entry {entry}: {source}")]
    Io {
        /// Entry being read or written.
        entry: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data is corrupted or has the wrong shape.
    #[error("data corruption in entry {entry}: {reason}")]
    DataCorruption {
        /// Entry holding the bad payload.
        entry: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Entry names may only contain ASCII letters, digits, `_` and `-`.
    #[error("invalid entry name: {0:?}")]
    InvalidEntry(String),

    /// Storage refused the write (disabled, over quota).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A named-entry string store, the storefront's stand-in for browser
/// storage.
///
/// Writes replace the whole entry. Implementations must make `set` atomic
/// per entry: a reader sees either the old value or the new one.
pub trait KeyValueStore {
    /// Read an entry. Returns `Ok(None)` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, entry: &str) -> Result<Option<String>, StorageError>;

    /// Create or replace an entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    fn set(&mut self, entry: &str, value: &str) -> Result<(), StorageError>;

    /// Delete an entry. Deleting a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&mut self, entry: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, entry: &str) -> Result<Option<String>, StorageError> {
        (**self).get(entry)
    }

    fn set(&mut self, entry: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(entry, value)
    }

    fn remove(&mut self, entry: &str) -> Result<(), StorageError> {
        (**self).remove(entry)
    }
}

/// Check that an entry name is safe to use as a file stem.
///
/// # Errors
///
/// Returns `StorageError::InvalidEntry` for empty names or names with
/// characters outside `[A-Za-z0-9_-]`.
pub fn validate_entry(entry: &str) -> Result<(), StorageError> {
    let valid = !entry.is_empty()
        && entry
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidEntry(entry.to_string()))
    }
}
