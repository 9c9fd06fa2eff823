//! Persistence adapters. Implement the store ports and publish changes for live queries.

pub mod live;
pub mod memory_store;
pub mod sqlite_store;

pub use live::{ChangeBus, DEFAULT_BUS_CAPACITY, Table};
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
