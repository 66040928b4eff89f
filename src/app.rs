use crate::domain::{Change, Item, ItemId, UiMode};
use crate::store::{ListStore, SubscriptionId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Input form state for adding or editing an item
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub title: String,
    /// Item being edited; `None` when adding
    pub editing: Option<ItemId>,
}

/// Main application state
pub struct AppState {
    pub store: ListStore,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub use_unicode: bool,
    pub status_message: Option<String>,
    /// Changes reported by the store, drained after each key press
    pending_changes: Rc<RefCell<Vec<Change>>>,
    /// Row of the most recently added item
    added_at: Rc<Cell<Option<usize>>>,
    needs_redraw: Rc<Cell<bool>>,
    subscription: SubscriptionId,
}

impl AppState {
    pub fn new(mut store: ListStore, use_unicode: bool) -> Self {
        let pending_changes = Rc::new(RefCell::new(Vec::new()));
        let added_at = Rc::new(Cell::new(None));
        let needs_redraw = Rc::new(Cell::new(true));

        let changes = pending_changes.clone();
        let added = added_at.clone();
        let redraw = needs_redraw.clone();
        let subscription = store.subscribe(move |event| {
            if let Change::Added(id) = event.change {
                added.set(event.collection.position(id));
            }
            changes.borrow_mut().push(event.change);
            redraw.set(true);
        });

        Self {
            store,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            use_unicode,
            status_message: None,
            pending_changes,
            added_at,
            needs_redraw,
            subscription,
        }
    }

    /// Stop listening to the store and hand it back
    pub fn into_store(mut self) -> ListStore {
        self.store.unsubscribe(self.subscription);
        self.store
    }

    /// Whether the screen is stale; clears the flag
    pub fn take_redraw(&self) -> bool {
        self.needs_redraw.replace(false)
    }

    pub fn request_redraw(&self) {
        self.needs_redraw.set(true);
    }

    /// Get the currently selected item
    pub fn selected_item(&self) -> Option<&Item> {
        self.store.collection().items().get(self.selected_index)
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.store.collection().len() {
            self.selected_index += 1;
        }
    }

    /// Toggle done for the selected item
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_item().map(|item| item.id) {
            self.store.toggle(id);
            self.sync_with_store();
        }
    }

    /// Delete the selected item
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_item().map(|item| item.id) {
            self.store.delete(id);
            self.sync_with_store();
        }
    }

    /// Start adding a new item (opens input form)
    pub fn start_add_item(&mut self) {
        self.input_form = Some(InputFormState {
            title: String::new(),
            editing: None,
        });
        self.ui_mode = UiMode::AddingItem;
    }

    /// Start editing the selected item's title (form prefilled)
    pub fn start_edit_item(&mut self) {
        if let Some((id, title)) = self.selected_item().map(|item| (item.id, item.title.clone())) {
            self.input_form = Some(InputFormState {
                title,
                editing: Some(id),
            });
            self.ui_mode = UiMode::EditingItem;
        }
    }

    /// Add character to input form
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.title.push(c);
        }
    }

    /// Backspace in input form
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.title.pop();
        }
    }

    /// Submit input form, adding or updating through the store
    pub fn submit_input_form(&mut self) {
        if let Some(form) = self.input_form.take() {
            match form.editing {
                Some(id) => {
                    let is_done = self
                        .store
                        .collection()
                        .get(id)
                        .map(|item| item.is_done)
                        .unwrap_or(false);
                    self.store.update(id, &form.title, is_done);
                }
                None => {
                    self.store.add(&form.title);
                }
            }
            self.ui_mode = UiMode::Normal;
            self.sync_with_store();
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Add an item directly, bypassing the input form
    #[cfg(test)]
    pub fn add_item(&mut self, title: &str) -> Option<ItemId> {
        let id = self.store.add(title);
        self.sync_with_store();
        id
    }

    /// Apply store notifications to UI state: follow new items, keep the
    /// selection in range, and refresh the status line
    pub fn sync_with_store(&mut self) {
        let changes: Vec<Change> = self.pending_changes.borrow_mut().drain(..).collect();

        if let Some(index) = self.added_at.take() {
            self.selected_index = index;
        }

        let len = self.store.collection().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }

        self.status_message = match (self.store.last_save_error(), changes.last()) {
            (Some(e), _) => Some(format!("Not saved: {}", e)),
            (None, Some(change)) => Some(format!("Item {}", change.verb())),
            (None, None) => None,
        };
    }

    /// Items done / total
    pub fn counts(&self) -> (usize, usize) {
        let collection = self.store.collection();
        (collection.done_count(), collection.len())
    }
}
