//! The authoritative to-do list
//!
//! `ListStore` owns the current `Collection`, persists it after every applied
//! mutation and then notifies subscribers. Mutations that would change
//! nothing (blank title, unknown id) are silent no-ops: they return
//! `None`/`false`, emit no event, and only touch storage when an earlier save
//! failed and the slot still needs catching up.

use crate::domain::{Change, Collection, IdGenerator, Item, ItemId, normalize_title};
use crate::persistence::{PersistError, PersistenceAdapter};
use log::{debug, error, info};

/// Notification sent to subscribers after a mutation has been applied
#[derive(Debug)]
pub struct StoreEvent<'a> {
    pub change: Change,
    pub collection: &'a Collection,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent<'_>)>;

pub struct ListStore {
    collection: Collection,
    ids: IdGenerator,
    adapter: PersistenceAdapter,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    /// Last save failed; storage is behind memory
    dirty: bool,
    last_save_error: Option<PersistError>,
}

impl ListStore {
    /// Load the collection through `adapter` and take ownership of it
    pub fn open(adapter: PersistenceAdapter) -> Self {
        Self::with_id_generator(adapter, IdGenerator::system())
    }

    pub fn with_id_generator(adapter: PersistenceAdapter, mut ids: IdGenerator) -> Self {
        let collection = adapter.load();
        ids.observe(&collection);
        info!("Opened slot '{}' with {} items", adapter.slot(), collection.len());

        Self {
            collection,
            ids,
            adapter,
            listeners: Vec::new(),
            next_subscription: 0,
            dirty: false,
            last_save_error: None,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn adapter(&self) -> &PersistenceAdapter {
        &self.adapter
    }

    /// Storage is known to lag behind the in-memory list
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_save_error(&self) -> Option<&PersistError> {
        self.last_save_error.as_ref()
    }

    /// Append a new item; blank titles are ignored
    pub fn add(&mut self, title: &str) -> Option<ItemId> {
        let Some(title) = normalize_title(title) else {
            self.settle();
            return None;
        };

        let id = self.ids.next_id(&self.collection);
        let next = self.collection.with_item(Item::new(id, title));
        self.commit(next, Change::Added(id)).then_some(id)
    }

    /// Replace title and completion of an existing item
    pub fn update(&mut self, id: ItemId, title: &str, is_done: bool) -> bool {
        let next = self.collection.with_update(id, title, is_done);
        self.commit(next, Change::Updated(id))
    }

    /// Flip the completion flag of an existing item
    pub fn toggle(&mut self, id: ItemId) -> bool {
        let Some(item) = self.collection.get(id) else {
            self.settle();
            return false;
        };

        let next = self.collection.with_update(id, &item.title, !item.is_done);
        self.commit(next, Change::Updated(id))
    }

    /// Remove an item
    pub fn delete(&mut self, id: ItemId) -> bool {
        let next = self.collection.without(id);
        self.commit(next, Change::Deleted(id))
    }

    /// Register a listener for applied mutations
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent<'_>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, next: Option<Collection>, change: Change) -> bool {
        let Some(next) = next else {
            debug!("No-op {} for item {}", change.verb(), change.id());
            self.settle();
            return false;
        };

        self.collection = next;
        debug!("Item {} {}", change.id(), change.verb());
        self.persist();
        self.notify(change);
        true
    }

    /// Retry a failed save so storage catches up even on a no-op
    fn settle(&mut self) {
        if self.dirty {
            self.persist();
        }
    }

    fn persist(&mut self) {
        match self.adapter.save(&self.collection) {
            Ok(()) => {
                if self.dirty {
                    info!("Storage caught up after an earlier failed save");
                }
                self.dirty = false;
                self.last_save_error = None;
            }
            Err(e) => {
                error!("Failed to save list: {}", e);
                self.dirty = true;
                self.last_save_error = Some(e);
            }
        }
    }

    fn notify(&mut self, change: Change) {
        let event = StoreEvent {
            change,
            collection: &self.collection,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
