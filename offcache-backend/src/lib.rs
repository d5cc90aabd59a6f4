//! Traits and structs for offcache storage interaction.
//!
//! A storage hands out named partitions ([`CacheStorage::open`]); a
//! partition answers exact-key lookups and upserts entries
//! ([`CachePartition`]). If you want to put offline responses somewhere
//! other than memory, implement these two traits.
mod error;
mod memory;
mod storage;

pub use error::StorageError;
pub use memory::{MemoryPartition, MemoryStorage};
pub use storage::{CachePartition, CacheStorage, StorageResult};
