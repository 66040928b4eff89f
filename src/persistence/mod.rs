pub mod adapter;
pub mod codec;
pub mod files;
#[cfg(test)]
pub mod memory;
pub mod storage;

pub use adapter::{PersistError, PersistenceAdapter, DEFAULT_SLOT};
pub use files::{atomic_write, config_file, ensure_data_dir, init_local_data_dir, log_file};
pub use storage::{FileStorage, DEFAULT_QUOTA_BYTES};

#[cfg(test)]
pub use memory::MemoryStorage;
