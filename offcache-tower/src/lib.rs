//! Tower middleware for the offcache offline caching layer.
//!
//! This crate provides [`OfflineCacheLayer`], a Tower [`Layer`] that
//! intercepts requests to a wrapped service. For each request a
//! [`StrategySelector`] picks a strategy, and the strategy answers from the
//! STATIC or DYNAMIC partition, from the wrapped service, or with the
//! synthetic `503 Service Unavailable` offline response.
//!
//! # Quick Start
//!
//! ```
//! use bytes::Bytes;
//! use http::{Request, Response};
//! use http_body_util::Full;
//! use offcache::Strategy;
//! use offcache_backend::MemoryStorage;
//! use offcache_tower::OfflineCacheLayer;
//! use tower::{ServiceBuilder, ServiceExt, service_fn};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let layer = OfflineCacheLayer::builder()
//!     .storage(MemoryStorage::new())
//!     .selector(Strategy::CacheFirst)
//!     .build();
//!
//! let service = ServiceBuilder::new()
//!     .layer(layer)
//!     .service(service_fn(|_req: Request<()>| async {
//!         Ok::<_, std::convert::Infallible>(Response::new(Full::new(Bytes::from_static(b"body"))))
//!     }));
//!
//! let response = service
//!     .oneshot(Request::get("/app.css").body(()).unwrap())
//!     .await
//!     .unwrap();
//! assert_eq!(response.headers()["x-cache-status"], "MISS");
//! # }
//! ```
//!
//! # Response Headers
//!
//! The middleware adds a cache status header to every response:
//!
//! | Header Value | Meaning |
//! |--------------|---------|
//! | `HIT` | Response served from a cache partition |
//! | `MISS` | Response fetched from the wrapped service |
//! | `OFFLINE` | Synthetic offline response |
//!
//! The default header name is `x-cache-status`. Customize it with
//! [`OfflineCacheLayerBuilder::cache_status_header`] or turn it off with
//! [`OfflineCacheLayerBuilder::without_cache_status_header`].
//!
//! Service errors are [`offcache::CacheError`]s raised by storage faults.
//! Failures of the wrapped service are never returned as errors, they end
//! in a cached or offline response.
//!
//! [`Layer`]: tower::Layer
//! [`StrategySelector`]: offcache::StrategySelector

/// Future type of the offline cache service.
pub mod future;
/// Tower layer and builder.
pub mod layer;
/// The Tower service resolving requests through strategies.
pub mod service;
/// Upstream adapter for bridging Tower services to offcache.
pub mod upstream;

use http::header::HeaderName;

/// Default header name for the cache status (HIT/MISS/OFFLINE).
pub const DEFAULT_CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache-status");

pub use layer::{NotSet, OfflineCacheLayer, OfflineCacheLayerBuilder};
pub use service::OfflineCacheService;
pub use upstream::TowerUpstream;
