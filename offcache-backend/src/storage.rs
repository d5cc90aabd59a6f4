use std::sync::Arc;

use async_trait::async_trait;
use offcache_core::{CacheName, RequestKey, StoredResponse};

use crate::StorageError;

pub type StorageResult<T> = Result<T, StorageError>;

/// A named partition of cache storage.
///
/// Handles are cheap to clone and own their view of the partition, so a
/// handle can be moved into a background write.
#[async_trait]
pub trait CachePartition: Send + Sync {
    /// The partition this handle points at.
    fn name(&self) -> CacheName;

    /// Exact-key lookup.
    ///
    /// Every hit returns a fresh duplicate of the stored response.
    async fn match_request(&self, key: &RequestKey) -> StorageResult<Option<StoredResponse>>;

    /// Upserts an entry, replacing any previous response for `key`.
    ///
    /// The response is taken by value. Callers that also return the
    /// response must store a [`StoredResponse::duplicate`].
    async fn put(&self, key: RequestKey, response: StoredResponse) -> StorageResult<()>;
}

/// Storage that opens named partitions.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Handle type of an opened partition.
    type Partition: CachePartition + 'static;

    /// Opens a partition, creating it if it does not exist yet.
    ///
    /// Opening is idempotent: repeated opens of the same name see the same
    /// entries.
    async fn open(&self, name: CacheName) -> StorageResult<Self::Partition>;

    /// Returns the label of this storage for logs and metrics.
    fn label(&self) -> &str {
        "storage"
    }
}

#[async_trait]
impl<S> CacheStorage for Arc<S>
where
    S: CacheStorage + ?Sized,
{
    type Partition = S::Partition;

    async fn open(&self, name: CacheName) -> StorageResult<Self::Partition> {
        (**self).open(name).await
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

#[async_trait]
impl<S> CacheStorage for &S
where
    S: CacheStorage + ?Sized,
{
    type Partition = S::Partition;

    async fn open(&self, name: CacheName) -> StorageResult<Self::Partition> {
        (**self).open(name).await
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

#[async_trait]
impl<P> CachePartition for Arc<P>
where
    P: CachePartition + ?Sized,
{
    fn name(&self) -> CacheName {
        (**self).name()
    }

    async fn match_request(&self, key: &RequestKey) -> StorageResult<Option<StoredResponse>> {
        (**self).match_request(key).await
    }

    async fn put(&self, key: RequestKey, response: StoredResponse) -> StorageResult<()> {
        (**self).put(key, response).await
    }
}
