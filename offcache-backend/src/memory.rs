//! In-memory storage backed by `DashMap`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use offcache_core::{CacheName, PartitionNames, RequestKey, StoredResponse};
use smol_str::SmolStr;

use crate::{CachePartition, CacheStorage, StorageError, StorageResult};

type Entries = Arc<PartitionEntries>;

/// Entries of one partition plus the number of keys admitted so far.
///
/// Nothing is ever removed from a partition, so `admitted` only grows and
/// tracks `map.len()` exactly once every in-flight put has returned.
#[derive(Debug, Default)]
struct PartitionEntries {
    map: DashMap<RequestKey, StoredResponse>,
    admitted: AtomicUsize,
}

impl PartitionEntries {
    /// Claims a slot for a new key, failing once `max` keys are admitted.
    fn admit(&self, max: usize) -> bool {
        self.admitted
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |admitted| {
                (admitted < max).then_some(admitted + 1)
            })
            .is_ok()
    }
}

/// Unbounded (or entry-capped) in-memory storage.
///
/// Partitions are keyed by the concrete name resolved through
/// [`PartitionNames`] and created on first open. Entries live as long as the
/// storage; nothing is ever evicted.
///
/// Cloning is cheap, clones share the same partitions.
///
/// ```
/// use offcache_backend::MemoryStorage;
/// use offcache_core::PartitionNames;
///
/// let storage = MemoryStorage::new()
///     .with_names(PartitionNames::new("static-v2", "dynamic-v2"))
///     .max_entries(1_000);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    partitions: Arc<DashMap<SmolStr, Entries>>,
    names: PartitionNames,
    max_entries: Option<usize>,
}

impl MemoryStorage {
    /// Creates an empty storage with default partition names and no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the concrete partition names.
    pub fn with_names(mut self, names: PartitionNames) -> Self {
        self.names = names;
        self
    }

    /// Caps every partition at `max` entries.
    ///
    /// Writes of new keys into a full partition fail with
    /// [`StorageError::QuotaExceeded`]; overwrites of existing keys succeed.
    /// The cap holds under concurrent puts of distinct keys.
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Partition names this storage resolves.
    pub fn names(&self) -> &PartitionNames {
        &self.names
    }

    /// Number of entries in a partition (zero if it was never opened).
    pub fn len(&self, name: CacheName) -> usize {
        self.partitions
            .get(self.names.resolve(name))
            .map(|entries| entries.map.len())
            .unwrap_or(0)
    }

    /// Whether a partition holds no entries.
    pub fn is_empty(&self, name: CacheName) -> bool {
        self.len(name) == 0
    }

    /// Whether a partition holds an entry for `key`.
    pub fn contains(&self, name: CacheName, key: &RequestKey) -> bool {
        self.partitions
            .get(self.names.resolve(name))
            .is_some_and(|entries| entries.map.contains_key(key))
    }

    /// Drops all partitions.
    pub fn clear(&self) {
        self.partitions.clear();
    }

    fn entries(&self, name: CacheName) -> Entries {
        let resolved = SmolStr::new(self.names.resolve(name));
        Arc::clone(&self.partitions.entry(resolved).or_default())
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    type Partition = MemoryPartition;

    async fn open(&self, name: CacheName) -> StorageResult<Self::Partition> {
        Ok(MemoryPartition {
            name,
            entries: self.entries(name),
            max_entries: self.max_entries,
        })
    }

    fn label(&self) -> &str {
        "memory"
    }
}

/// Handle to one [`MemoryStorage`] partition.
#[derive(Clone, Debug)]
pub struct MemoryPartition {
    name: CacheName,
    entries: Entries,
    max_entries: Option<usize>,
}

impl MemoryPartition {
    /// Number of entries in this partition.
    pub fn len(&self) -> usize {
        self.entries.map.len()
    }

    /// Whether this partition holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.map.is_empty()
    }
}

#[async_trait]
impl CachePartition for MemoryPartition {
    fn name(&self) -> CacheName {
        self.name
    }

    async fn match_request(&self, key: &RequestKey) -> StorageResult<Option<StoredResponse>> {
        Ok(self.entries.map.get(key).map(|entry| entry.duplicate()))
    }

    async fn put(&self, key: RequestKey, response: StoredResponse) -> StorageResult<()> {
        tracing::trace!(partition = %self.name, %key, "memory partition put");
        match self.entries.map.entry(key) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(response);
            }
            Entry::Vacant(vacant) => {
                if let Some(max) = self.max_entries
                    && !self.entries.admit(max)
                {
                    return Err(StorageError::QuotaExceeded {
                        partition: self.name,
                    });
                }
                vacant.insert(response);
            }
        }
        Ok(())
    }
}
