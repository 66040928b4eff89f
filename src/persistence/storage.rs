//! Key-value slot storage
//!
//! A `KeyValueStorage` maps string keys to string values, the same shape as a
//! browser's local storage. `FileStorage` keeps one file per key on disk.

use super::files::write_file_atomically;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("access to storage slot '{key}' was denied")]
    AccessDenied { key: String },
}

/// String key-value store holding named slots
pub trait KeyValueStorage {
    /// Read a slot; `Ok(None)` when it has never been written
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keys become file names, so keep them to a safe alphabet
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Slot size limit matching what browsers grant local storage
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

fn io_error(key: &str, source: io::Error) -> StorageError {
    if source.kind() == io::ErrorKind::PermissionDenied {
        StorageError::AccessDenied {
            key: key.to_string(),
        }
    } else {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// One `<key>.json` file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: usize,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota: DEFAULT_QUOTA_BYTES,
        }
    }

    /// Limit each slot to at most `quota` bytes
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;

        match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(key, source)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        if value.len() > self.quota {
            return Err(StorageError::QuotaExceeded {
                needed: value.len(),
                limit: self.quota,
            });
        }

        fs::create_dir_all(&self.dir)
            .and_then(|()| write_file_atomically(&self.slot_path(key), value.as_bytes()))
            .map_err(|source| io_error(key, source))
    }
}
