//! Key-value fact store backends for the recall memory layer

mod memory;

#[cfg(feature = "sqlite")]
mod sqlite;

pub use recall_core::{FactStore, MemoryError, Result};

pub use memory::InMemoryFactStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteFactStore;
