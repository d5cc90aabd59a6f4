//! Error types for storage operations.

use offcache_core::CacheName;
use thiserror::Error;

/// Error type for storage operations.
///
/// This enum categorizes errors that can occur while opening partitions,
/// looking entries up or writing them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The partition refused a new entry because it is full.
    #[error("storage quota exceeded for {partition} partition")]
    QuotaExceeded {
        /// Partition that rejected the write.
        partition: CacheName,
    },

    /// Internal storage error, state or computation error.
    ///
    /// Any error not related to network interaction.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send + Sync>),

    /// Network interaction error.
    ///
    /// Errors occurring during communication with remote storages.
    #[error(transparent)]
    ConnectionError(Box<dyn std::error::Error + Send + Sync>),
}
