use super::item::{normalize_title, Item, ItemId};
use std::collections::HashSet;

/// Ordered, id-unique sequence of items
///
/// Insertion order is display order. Every transformation returns a new
/// value and leaves `self` untouched; `None` means the transformation would
/// not change anything (unknown id, rejected input, identical values).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from raw items, dropping any that would break the
    /// invariants (blank title, id already present). Rejected items are
    /// returned in their original order.
    pub fn from_items(items: Vec<Item>) -> (Self, Vec<Item>) {
        let mut seen = HashSet::with_capacity(items.len());
        let mut kept = Vec::with_capacity(items.len());
        let mut rejected = Vec::new();

        for item in items {
            if item.has_valid_title() && seen.insert(item.id) {
                kept.push(item);
            } else {
                rejected.push(item);
            }
        }

        (Self { items: kept }, rejected)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    /// Highest id currently in use
    pub fn max_id(&self) -> Option<ItemId> {
        self.items.iter().map(|item| item.id).max()
    }

    /// Number of completed items
    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_done).count()
    }

    /// Append an item. Rejects blank titles and ids already in use.
    pub fn with_item(&self, item: Item) -> Option<Self> {
        if !item.has_valid_title() || self.contains(item.id) {
            return None;
        }

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(item);
        Some(Self { items })
    }

    /// Replace title and completion of the matching item, keeping its position
    ///
    /// A title identical to the stored one is kept verbatim, so older data
    /// with untrimmed titles survives a completion toggle unchanged.
    pub fn with_update(&self, id: ItemId, title: &str, is_done: bool) -> Option<Self> {
        let index = self.position(id)?;
        let current = &self.items[index];

        let title = if title == current.title {
            current.title.clone()
        } else {
            normalize_title(title)?
        };

        if current.title == title && current.is_done == is_done {
            return None;
        }

        let mut items = self.items.clone();
        items[index] = current.replaced(title, is_done);
        Some(Self { items })
    }

    /// Remove the matching item
    pub fn without(&self, id: ItemId) -> Option<Self> {
        let index = self.position(id)?;

        let mut items = self.items.clone();
        items.remove(index);
        Some(Self { items })
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: u64, title: &str) -> Item {
        Item::new(ItemId::new(id), title)
    }

    fn sample() -> Collection {
        let (collection, rejected) =
            Collection::from_items(vec![item(1, "Buy milk"), item(2, "Walk dog"), item(3, "Call mum")]);
        assert!(rejected.is_empty());
        collection
    }

    #[test]
    fn test_from_items_drops_duplicates_and_blank_titles() {
        let (collection, rejected) = Collection::from_items(vec![
            item(1, "First"),
            item(1, "Shadow"),
            item(2, "   "),
            item(3, "Third"),
        ]);

        let titles: Vec<&str> = collection.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Third"]);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].title, "Shadow");
    }

    #[test]
    fn test_with_item_appends() {
        let collection = sample();
        let next = collection.with_item(item(9, "Read")).unwrap();

        assert_eq!(next.len(), 4);
        assert_eq!(next.items()[3].id, ItemId::new(9));
        // Original untouched
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_with_item_rejects_duplicate_id() {
        let collection = sample();
        assert!(collection.with_item(item(2, "Again")).is_none());
        assert!(collection.with_item(item(4, "  ")).is_none());
    }

    #[test]
    fn test_with_update_in_place() {
        let collection = sample();
        let next = collection.with_update(ItemId::new(2), "Walk dog", true).unwrap();

        assert_eq!(next.position(ItemId::new(2)), Some(1));
        let updated = next.get(ItemId::new(2)).unwrap();
        assert_eq!(updated.title, "Walk dog");
        assert!(updated.is_done);
        assert_eq!(next.done_count(), 1);
    }

    #[test]
    fn test_with_update_unknown_or_noop() {
        let collection = sample();
        assert!(collection.with_update(ItemId::new(42), "Nope", true).is_none());
        assert!(collection.with_update(ItemId::new(1), "Buy milk", false).is_none());
        assert!(collection.with_update(ItemId::new(1), "   ", true).is_none());
    }

    #[test]
    fn test_with_update_trims_title() {
        let collection = sample();
        let next = collection.with_update(ItemId::new(1), "  Buy oat milk ", false).unwrap();
        assert_eq!(next.get(ItemId::new(1)).unwrap().title, "Buy oat milk");
    }

    #[test]
    fn test_with_update_keeps_untrimmed_stored_title() {
        let (collection, _) = Collection::from_items(vec![item(5, "  Buy milk ")]);

        let next = collection.with_update(ItemId::new(5), "  Buy milk ", true).unwrap();
        let updated = next.get(ItemId::new(5)).unwrap();
        assert_eq!(updated.title, "  Buy milk ");
        assert!(updated.is_done);

        // A changed title is still normalized
        let renamed = collection.with_update(ItemId::new(5), " Buy bread ", false).unwrap();
        assert_eq!(renamed.get(ItemId::new(5)).unwrap().title, "Buy bread");
    }

    #[test]
    fn test_without_removes_exactly_one() {
        let collection = sample();
        let next = collection.without(ItemId::new(2)).unwrap();

        assert_eq!(next.len(), 2);
        assert!(!next.contains(ItemId::new(2)));
        let ids: Vec<u64> = next.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(collection.without(ItemId::new(42)).is_none());
    }

    #[test]
    fn test_max_id() {
        assert_eq!(Collection::new().max_id(), None);
        assert_eq!(sample().max_id(), Some(ItemId::new(3)));
    }
}
