use offcache_backend::StorageError;
use thiserror::Error;

/// Error returned by strategy execution.
///
/// Failed network fetches never surface here: strategies answer them with a
/// cached or offline response. Only storage faults while opening a
/// partition or looking an entry up propagate to the caller.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown caching strategy `{0}`")]
pub struct ParseStrategyError(pub String);
