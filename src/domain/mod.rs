pub mod collection;
pub mod enums;
pub mod ids;
pub mod item;

pub use collection::Collection;
pub use enums::{Change, UiMode};
pub use ids::IdGenerator;
pub use item::{normalize_title, Item, ItemId};

#[cfg(test)]
pub use ids::FixedClock;
