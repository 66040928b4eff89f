use super::item::ItemId;

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingItem,
    EditingItem,
}

/// What a store mutation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added(ItemId),
    Updated(ItemId),
    Deleted(ItemId),
}

impl Change {
    /// Id of the item the change touched
    pub fn id(&self) -> ItemId {
        match self {
            Self::Added(id) | Self::Updated(id) | Self::Deleted(id) => *id,
        }
    }

    /// Short verb for logs and the status line
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Updated(_) => "updated",
            Self::Deleted(_) => "deleted",
        }
    }
}
