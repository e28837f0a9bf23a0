//! Persistence layer: storage slots and the durable profile store.

pub mod libsql_backend;
pub mod memory;
pub mod profiles;
pub mod traits;

pub use libsql_backend::LibSqlSlot;
pub use memory::MemorySlot;
pub use profiles::{ProfileStore, StoreEvent};
pub use traits::StorageSlot;
