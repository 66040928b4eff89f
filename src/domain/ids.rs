use super::collection::Collection;
use super::item::ItemId;
use std::collections::HashSet;

/// Source of wall-clock time for id seeding
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // Pre-epoch clocks clamp to zero; monotonicity comes from the generator
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Issues strictly increasing item ids
///
/// Ids start from the current time in milliseconds, so they still sort by
/// creation time, but every id is also greater than the last one issued and
/// greater than any id already in the collection. Two adds inside the same
/// millisecond, a clock stepping backwards, or ids loaded from a machine with
/// a skewed clock therefore never produce a duplicate.
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last_issued: u64,
}

impl IdGenerator {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last_issued: 0,
        }
    }

    pub fn system() -> Self {
        Self::new(Box::new(SystemClock))
    }

    /// Make sure future ids sort after everything in `collection`
    pub fn observe(&mut self, collection: &Collection) {
        if let Some(max) = collection.max_id() {
            self.last_issued = self.last_issued.max(max.get());
        }
    }

    /// Next id, guaranteed absent from `existing`
    pub fn next_id(&mut self, existing: &Collection) -> ItemId {
        self.observe(existing);

        match self.last_issued.checked_add(1) {
            Some(floor) => {
                let id = self.clock.now_millis().max(floor);
                self.last_issued = id;
                ItemId::new(id)
            }
            // Nothing left above the largest id; reuse the lowest free one
            None => lowest_free_id(existing),
        }
    }
}

/// Smallest positive id not used by `existing`
fn lowest_free_id(existing: &Collection) -> ItemId {
    let used: HashSet<u64> = existing.iter().map(|item| item.id.get()).collect();
    // n items leave at least one gap in 1..=n+1
    let limit = existing.len() as u64 + 1;
    let id = (1..=limit).find(|id| !used.contains(id)).unwrap_or(limit);
    ItemId::new(id)
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::system()
    }
}

/// Clock pinned to a settable instant
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct FixedClock(std::rc::Rc<std::cell::Cell<u64>>);

#[cfg(test)]
impl FixedClock {
    pub fn at(millis: u64) -> Self {
        Self(std::rc::Rc::new(std::cell::Cell::new(millis)))
    }

    pub fn set(&self, millis: u64) {
        self.0.set(millis);
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0.get()
    }
}
