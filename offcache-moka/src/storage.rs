//! Moka storage implementation.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use offcache_backend::{CachePartition, CacheStorage, StorageResult};
use offcache_core::{CacheName, PartitionNames, RequestKey, StoredResponse};

use crate::builder::{MokaStorageBuilder, NoCapacity};

pub(crate) type PartitionCache = Cache<RequestKey, Arc<StoredResponse>>;

/// In-memory cache storage powered by Moka.
///
/// `MokaStorage` keeps one concurrent Moka cache per [`CacheName`]. Reads are
/// lock-free; writes use Moka's fine-grained locking, and concurrent writes
/// to the same key are last-write-wins.
///
/// # Examples
///
/// ```
/// use offcache_moka::MokaStorage;
///
/// // 64 MB per partition
/// let storage = MokaStorage::builder()
///     .max_bytes(64 * 1024 * 1024)
///     .build();
/// ```
///
/// # Caveats
///
/// - Data is **not persisted**: partitions are lost on process restart
/// - Eviction is **best-effort**: Moka may briefly exceed the bound until
///   its maintenance tasks run
#[derive(Clone)]
pub struct MokaStorage {
    pub(crate) static_cache: PartitionCache,
    pub(crate) dynamic_cache: PartitionCache,
    pub(crate) names: PartitionNames,
}

impl std::fmt::Debug for MokaStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaStorage")
            .field("names", &self.names)
            .field("static_entries", &self.static_cache.entry_count())
            .field("dynamic_entries", &self.dynamic_cache.entry_count())
            .finish()
    }
}

impl MokaStorage {
    /// Creates a new builder. A capacity must be set before `build()`.
    pub fn builder() -> MokaStorageBuilder<NoCapacity> {
        MokaStorageBuilder::new()
    }

    /// Partition names this storage was built with.
    pub fn names(&self) -> &PartitionNames {
        &self.names
    }

    /// Approximate number of entries in a partition.
    ///
    /// Pending writes may not be reflected until
    /// [`run_pending_tasks`](Self::run_pending_tasks) has run.
    pub fn entry_count(&self, name: CacheName) -> u64 {
        self.cache(name).entry_count()
    }

    /// Runs Moka's pending maintenance (evictions, counters) on both partitions.
    pub async fn run_pending_tasks(&self) {
        self.static_cache.run_pending_tasks().await;
        self.dynamic_cache.run_pending_tasks().await;
    }

    fn cache(&self, name: CacheName) -> &PartitionCache {
        match name {
            CacheName::Static => &self.static_cache,
            CacheName::Dynamic => &self.dynamic_cache,
        }
    }
}

#[async_trait]
impl CacheStorage for MokaStorage {
    type Partition = MokaPartition;

    async fn open(&self, name: CacheName) -> StorageResult<Self::Partition> {
        Ok(MokaPartition {
            name,
            cache: self.cache(name).clone(),
        })
    }

    fn label(&self) -> &str {
        "moka"
    }
}

/// Handle to one [`MokaStorage`] partition.
#[derive(Clone)]
pub struct MokaPartition {
    name: CacheName,
    cache: PartitionCache,
}

impl std::fmt::Debug for MokaPartition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaPartition")
            .field("name", &self.name)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[async_trait]
impl CachePartition for MokaPartition {
    fn name(&self) -> CacheName {
        self.name
    }

    async fn match_request(&self, key: &RequestKey) -> StorageResult<Option<StoredResponse>> {
        Ok(self.cache.get(key).await.map(|stored| stored.duplicate()))
    }

    async fn put(&self, key: RequestKey, response: StoredResponse) -> StorageResult<()> {
        tracing::trace!(partition = %self.name, %key, "moka partition put");
        self.cache.insert(key, Arc::new(response)).await;
        Ok(())
    }
}
