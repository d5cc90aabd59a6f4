#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # offcache
//!
//! Strategies that resolve an intercepted HTTP request against named cache
//! partitions and the network.
//!
//! | Strategy | Lookup | Fetch | Write | Fallback |
//! |---|---|---|---|---|
//! | [`Strategy::CacheFirst`] | STATIC first | on miss | STATIC | offline |
//! | [`Strategy::NetworkFirst`] | DYNAMIC on fetch failure | always | DYNAMIC | offline |
//! | [`Strategy::StaticOnly`] | STATIC | never | never | offline |
//! | [`Strategy::NetworkOnly`] | never | always | never | offline |
//!
//! The offline fallback is the synthetic `503 Service Unavailable` response
//! with body `Offline` ([`StoredResponse::offline`]).
//!
//! ## Example
//!
//! ```
//! use bytes::Bytes;
//! use http::{Request, Response};
//! use http_body_util::Full;
//! use offcache::{CacheStrategies, Strategy};
//! use offcache_backend::MemoryStorage;
//! use offcache_core::upstream_fn;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), offcache::CacheError> {
//! let strategies = CacheStrategies::new(MemoryStorage::new());
//! let upstream = upstream_fn(|_req: Request<()>| async {
//!     Ok::<_, std::io::Error>(Response::new(Full::new(Bytes::from_static(b"body-css"))))
//! });
//!
//! let request = Request::get("/app.css").body(()).unwrap();
//! let response = strategies.execute(Strategy::CacheFirst, request, upstream).await?;
//! assert_eq!(response.body().as_ref(), b"body-css");
//! # Ok(())
//! # }
//! ```

/// Error types for strategy execution.
pub mod error;

/// Metrics collection for cache observability.
///
/// When the `metrics` feature is enabled, this module records counters for
/// cache hits, misses, offline fallbacks, failed fetches and failed writes,
/// labelled by strategy.
pub mod metrics;

/// Background execution of cache writes.
pub mod offload;

/// Request to strategy routing.
pub mod selector;

/// The strategy implementations and their executor.
pub mod strategy;

pub use error::{CacheError, ParseStrategyError};
pub use offload::TokioOffload;
pub use selector::StrategySelector;
pub use strategy::{CacheStrategies, Strategy, WriteMode};

pub use offcache_backend::{CachePartition, CacheStorage, StorageError};
pub use offcache_core::{
    CacheName, Offload, PartitionNames, RequestKey, ResponseSource, StoredResponse, Upstream,
    upstream_fn,
};

/// The `offcache` prelude.
///
/// ```rust
/// use offcache::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{CacheError, CacheStorage, CacheStrategies, Strategy, StrategySelector};
}
