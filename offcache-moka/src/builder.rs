//! Builder for configuring [`MokaStorage`].

use std::sync::Arc;

use moka::future::CacheBuilder;
use moka::policy::EvictionPolicy;
use offcache_core::{CacheName, PartitionNames, RequestKey, StoredResponse};

use crate::storage::{MokaStorage, PartitionCache};

/// Marker type: capacity has not been configured yet.
///
/// This is the initial state of a [`MokaStorageBuilder`]. You must call either
/// [`max_entries()`](MokaStorageBuilder::max_entries) or
/// [`max_bytes()`](MokaStorageBuilder::max_bytes) before calling `build()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapacity;

/// Marker type: entry-count capacity has been configured.
///
/// Each partition holds at most `n` entries.
#[derive(Debug, Clone, Copy)]
pub struct EntryCapacity(pub(crate) u64);

/// Marker type: byte-based capacity has been configured.
///
/// Each partition uses at most `n` bytes (approximate).
#[derive(Debug, Clone, Copy)]
pub struct ByteCapacity(pub(crate) u64);

/// Builder for creating and configuring a [`MokaStorage`].
///
/// Capacity is required and applies to each partition separately. The
/// typestate makes `build()` available only once it is set:
///
/// ```
/// use offcache_core::PartitionNames;
/// use offcache_moka::{EvictionPolicy, MokaStorage};
///
/// let storage = MokaStorage::builder()
///     .names(PartitionNames::new("app-static-v3", "app-dynamic-v3"))
///     .max_entries(5_000)
///     .eviction_policy(EvictionPolicy::lru())
///     .build();
/// ```
pub struct MokaStorageBuilder<Cap> {
    capacity: Cap,
    names: PartitionNames,
    eviction_policy: Option<EvictionPolicy>,
}

impl MokaStorageBuilder<NoCapacity> {
    /// Creates a new builder with no capacity configured.
    pub fn new() -> Self {
        Self {
            capacity: NoCapacity,
            names: PartitionNames::default(),
            eviction_policy: None,
        }
    }

    /// Sets the maximum number of entries per partition.
    pub fn max_entries(self, capacity: u64) -> MokaStorageBuilder<EntryCapacity> {
        MokaStorageBuilder {
            capacity: EntryCapacity(capacity),
            names: self.names,
            eviction_policy: self.eviction_policy,
        }
    }

    /// Sets the maximum memory budget in bytes per partition.
    ///
    /// The weight of an entry is the approximate size of its request key plus
    /// headers and body of the stored response.
    pub fn max_bytes(self, bytes: u64) -> MokaStorageBuilder<ByteCapacity> {
        MokaStorageBuilder {
            capacity: ByteCapacity(bytes),
            names: self.names,
            eviction_policy: self.eviction_policy,
        }
    }
}

impl Default for MokaStorageBuilder<NoCapacity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cap> MokaStorageBuilder<Cap> {
    /// Sets the concrete partition names, used as Moka cache names.
    pub fn names(mut self, names: PartitionNames) -> Self {
        self.names = names;
        self
    }

    /// Sets the eviction policy for both partitions.
    ///
    /// # Default
    ///
    /// - entry-based capacity: [`EvictionPolicy::tiny_lfu()`]
    /// - byte-based capacity: [`EvictionPolicy::lru()`], since TinyLFU
    ///   admission can reject large entries even when eviction would make room
    pub fn eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.eviction_policy = Some(policy);
        self
    }
}

impl MokaStorageBuilder<EntryCapacity> {
    /// Builds the [`MokaStorage`] with entry-count based capacity.
    pub fn build(self) -> MokaStorage {
        let policy = self
            .eviction_policy
            .unwrap_or_else(EvictionPolicy::tiny_lfu);
        let partition = |name: CacheName| -> PartitionCache {
            CacheBuilder::new(self.capacity.0)
                .name(self.names.resolve(name))
                .eviction_policy(policy.clone())
                .build()
        };

        MokaStorage {
            static_cache: partition(CacheName::Static),
            dynamic_cache: partition(CacheName::Dynamic),
            names: self.names.clone(),
        }
    }
}

impl MokaStorageBuilder<ByteCapacity> {
    /// Builds the [`MokaStorage`] with byte-based capacity.
    pub fn build(self) -> MokaStorage {
        let policy = self.eviction_policy.unwrap_or_else(EvictionPolicy::lru);
        let partition = |name: CacheName| -> PartitionCache {
            CacheBuilder::new(self.capacity.0)
                .name(self.names.resolve(name))
                .weigher(Self::byte_weigher)
                .eviction_policy(policy.clone())
                .build()
        };

        MokaStorage {
            static_cache: partition(CacheName::Static),
            dynamic_cache: partition(CacheName::Dynamic),
            names: self.names.clone(),
        }
    }

    fn byte_weigher(key: &RequestKey, value: &Arc<StoredResponse>) -> u32 {
        (key.memory_size() + value.memory_size()).min(u32::MAX as usize) as u32
    }
}
