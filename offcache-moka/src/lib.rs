//! Bounded in-memory storage for offcache, powered by [Moka](https://docs.rs/moka).
//!
//! Each partition is its own Moka cache, so STATIC and DYNAMIC never compete
//! for capacity. Eviction happens inside Moka once a partition reaches its
//! configured bound; the strategies above never delete entries themselves.
//!
//! ```
//! use offcache_moka::MokaStorage;
//!
//! let storage = MokaStorage::builder()
//!     .max_entries(10_000)
//!     .build();
//! ```
#![warn(missing_docs)]

mod builder;
mod storage;

pub use builder::{ByteCapacity, EntryCapacity, MokaStorageBuilder, NoCapacity};
pub use moka::policy::EvictionPolicy;
pub use storage::{MokaPartition, MokaStorage};
