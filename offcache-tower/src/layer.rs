use std::sync::Arc;

use http::header::HeaderName;
use offcache::{CacheStrategies, StrategySelector, TokioOffload, WriteMode};
use offcache_backend::CacheStorage;
use offcache_core::Offload;
use tower::Layer;

use crate::DEFAULT_CACHE_STATUS_HEADER;
use crate::service::OfflineCacheService;

/// Tower [`Layer`] that puts offline caching strategies in front of a
/// service.
pub struct OfflineCacheLayer<St, Sel, O = TokioOffload> {
    strategies: CacheStrategies<St, O>,
    selector: Arc<Sel>,
    cache_status_header: Option<HeaderName>,
}

impl<St, Sel, O> Clone for OfflineCacheLayer<St, Sel, O>
where
    O: Clone,
{
    fn clone(&self) -> Self {
        Self {
            strategies: self.strategies.clone(),
            selector: Arc::clone(&self.selector),
            cache_status_header: self.cache_status_header.clone(),
        }
    }
}

impl<St, Sel, O> OfflineCacheLayer<St, Sel, O> {
    /// Wraps prebuilt strategies, reporting through the default cache status header.
    pub fn new(strategies: CacheStrategies<St, O>, selector: Sel) -> Self {
        Self {
            strategies,
            selector: Arc::new(selector),
            cache_status_header: Some(DEFAULT_CACHE_STATUS_HEADER),
        }
    }

    /// Strategies shared by every service this layer produces.
    pub fn strategies(&self) -> &CacheStrategies<St, O> {
        &self.strategies
    }
}

impl OfflineCacheLayer<NotSet, NotSet, TokioOffload> {
    /// Starts a builder with inline writes and the default header.
    pub fn builder() -> OfflineCacheLayerBuilder<NotSet, NotSet, TokioOffload> {
        OfflineCacheLayerBuilder::default()
    }
}

impl<S, St, Sel, O> Layer<S> for OfflineCacheLayer<St, Sel, O>
where
    O: Clone,
{
    type Service = OfflineCacheService<S, St, Sel, O>;

    fn layer(&self, upstream: S) -> Self::Service {
        OfflineCacheService::new(
            upstream,
            self.strategies.clone(),
            Arc::clone(&self.selector),
            self.cache_status_header.clone(),
        )
    }
}

/// Marker for a builder field that has not been provided yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotSet;

/// Builder for [`OfflineCacheLayer`].
///
/// `build` is only available once both a storage and a selector are set.
pub struct OfflineCacheLayerBuilder<St, Sel, O> {
    storage: St,
    selector: Sel,
    write_mode: WriteMode<O>,
    cache_status_header: Option<HeaderName>,
}

impl Default for OfflineCacheLayerBuilder<NotSet, NotSet, TokioOffload> {
    fn default() -> Self {
        Self {
            storage: NotSet,
            selector: NotSet,
            write_mode: WriteMode::Inline,
            cache_status_header: Some(DEFAULT_CACHE_STATUS_HEADER),
        }
    }
}

impl<St, Sel, O> OfflineCacheLayerBuilder<St, Sel, O> {
    /// Storage backing both partitions.
    pub fn storage<NSt: CacheStorage>(self, storage: NSt) -> OfflineCacheLayerBuilder<NSt, Sel, O> {
        OfflineCacheLayerBuilder {
            storage,
            selector: self.selector,
            write_mode: self.write_mode,
            cache_status_header: self.cache_status_header,
        }
    }

    /// Picks the strategy for each request.
    pub fn selector<NSel: StrategySelector>(
        self,
        selector: NSel,
    ) -> OfflineCacheLayerBuilder<St, NSel, O> {
        OfflineCacheLayerBuilder {
            storage: self.storage,
            selector,
            write_mode: self.write_mode,
            cache_status_header: self.cache_status_header,
        }
    }

    /// How strategies perform cache writes. Defaults to [`WriteMode::Inline`].
    pub fn write_mode<NO: Offload>(
        self,
        write_mode: WriteMode<NO>,
    ) -> OfflineCacheLayerBuilder<St, Sel, NO> {
        OfflineCacheLayerBuilder {
            storage: self.storage,
            selector: self.selector,
            write_mode,
            cache_status_header: self.cache_status_header,
        }
    }

    /// Detaches cache writes onto `offload`.
    pub fn offload<NO: Offload>(self, offload: NO) -> OfflineCacheLayerBuilder<St, Sel, NO> {
        self.write_mode(WriteMode::Offload(offload))
    }

    /// Header carrying `HIT`, `MISS` or `OFFLINE`. Defaults to
    /// [`DEFAULT_CACHE_STATUS_HEADER`].
    pub fn cache_status_header(self, header: HeaderName) -> Self {
        Self {
            cache_status_header: Some(header),
            ..self
        }
    }

    /// Leaves responses without a cache status header.
    pub fn without_cache_status_header(self) -> Self {
        Self {
            cache_status_header: None,
            ..self
        }
    }
}

impl<St, Sel, O> OfflineCacheLayerBuilder<St, Sel, O>
where
    St: CacheStorage,
    Sel: StrategySelector,
    O: Offload,
{
    /// Finishes the layer.
    pub fn build(self) -> OfflineCacheLayer<St, Sel, O> {
        let strategies = CacheStrategies::new(self.storage).with_write_mode(self.write_mode);
        OfflineCacheLayer {
            strategies,
            selector: Arc::new(self.selector),
            cache_status_header: self.cache_status_header,
        }
    }
}
