use super::codec::{self, DecodeError};
use super::storage::{KeyValueStorage, StorageError};
use crate::domain::Collection;
use log::{debug, warn};
use thiserror::Error;

/// Slot name used when the config does not name one
pub const DEFAULT_SLOT: &str = "todoList";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read slot '{slot}': {source}")]
    Storage {
        slot: String,
        #[source]
        source: StorageError,
    },

    #[error("slot '{slot}' is corrupt: {source}")]
    Decode {
        slot: String,
        #[source]
        source: DecodeError,
    },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not serialize the list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not write the list: {0}")]
    Storage(#[from] StorageError),
}

/// Round-trips the collection through one named storage slot
pub struct PersistenceAdapter {
    storage: Box<dyn KeyValueStorage>,
    slot: String,
}

impl PersistenceAdapter {
    pub fn new(storage: Box<dyn KeyValueStorage>, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Read the slot, surfacing every failure
    pub fn try_load(&self) -> Result<Collection, LoadError> {
        let content = self
            .storage
            .get_item(&self.slot)
            .map_err(|source| LoadError::Storage {
                slot: self.slot.clone(),
                source,
            })?;

        let Some(content) = content else {
            debug!("Slot '{}' is empty, starting with an empty list", self.slot);
            return Ok(Collection::new());
        };

        let decoded = codec::decode(&content).map_err(|source| LoadError::Decode {
            slot: self.slot.clone(),
            source,
        })?;

        if decoded.legacy {
            debug!("Slot '{}' uses the unversioned layout; it will be upgraded on next save", self.slot);
        }
        for item in &decoded.rejected {
            warn!(
                "Dropping stored item {} ({:?}): blank title or duplicate id",
                item.id, item.title
            );
        }

        debug!("Loaded {} items from slot '{}'", decoded.collection.len(), self.slot);
        Ok(decoded.collection)
    }

    /// Read the slot; missing or unreadable content degrades to an empty list
    pub fn load(&self) -> Collection {
        match self.try_load() {
            Ok(collection) => collection,
            Err(e) => {
                warn!("{}; starting with an empty list", e);
                Collection::new()
            }
        }
    }

    /// Overwrite the slot with the full collection
    pub fn save(&mut self, collection: &Collection) -> Result<(), PersistError> {
        let content = codec::encode(collection)?;
        self.storage.set_item(&self.slot, &content)?;
        debug!("Saved {} items to slot '{}'", collection.len(), self.slot);
        Ok(())
    }
}
