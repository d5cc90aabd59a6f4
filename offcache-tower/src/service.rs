use std::fmt::Debug;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::FutureExt;
use futures::future::BoxFuture;
use http::header::HeaderName;
use http::{Request, Response};
use http_body::Body;
use http_body_util::Full;
use offcache::{CacheError, CacheStrategies, StrategySelector, TokioOffload};
use offcache_backend::CacheStorage;
use offcache_core::{Offload, StoredResponse};
use tower::Service;
use tracing::debug;

use crate::future::OfflineCacheFuture;
use crate::upstream::TowerUpstream;

/// Service that resolves every request through a caching strategy.
///
/// The strategy is chosen per request from the request head. The wrapped
/// `upstream` service is the network.
pub struct OfflineCacheService<S, St, Sel, O = TokioOffload> {
    upstream: S,
    strategies: CacheStrategies<St, O>,
    selector: Arc<Sel>,
    cache_status_header: Option<HeaderName>,
}

impl<S, St, Sel, O> OfflineCacheService<S, St, Sel, O> {
    pub fn new(
        upstream: S,
        strategies: CacheStrategies<St, O>,
        selector: Arc<Sel>,
        cache_status_header: Option<HeaderName>,
    ) -> Self {
        OfflineCacheService {
            upstream,
            strategies,
            selector,
            cache_status_header,
        }
    }
}

impl<S, St, Sel, O> Clone for OfflineCacheService<S, St, Sel, O>
where
    S: Clone,
    O: Clone,
{
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            strategies: self.strategies.clone(),
            selector: Arc::clone(&self.selector),
            cache_status_header: self.cache_status_header.clone(),
        }
    }
}

impl<S, St, Sel, O, ReqBody, ResBody> Service<Request<ReqBody>>
    for OfflineCacheService<S, St, Sel, O>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: Debug + Send,
    St: CacheStorage + 'static,
    Sel: StrategySelector + 'static,
    O: Offload + 'static,
    ReqBody: Send + 'static,
    ResBody: Body + Send + 'static,
    ResBody::Data: Send,
    ResBody::Error: Debug + Send,
{
    type Response = Response<Full<Bytes>>;
    type Error = CacheError;
    type Future = OfflineCacheFuture<BoxFuture<'static, Result<StoredResponse, CacheError>>>;

    // Readiness of the upstream is awaited per request by `TowerUpstream`,
    // strategies that never fetch do not wait on it.
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let (parts, body) = req.into_parts();
        let strategy = self.selector.select(&parts);
        debug!(%strategy, method = %parts.method, uri = %parts.uri, "strategy selected");
        let request = Request::from_parts(parts, body);

        let strategies = self.strategies.clone();
        let upstream = TowerUpstream::new(self.upstream.clone());
        let future = async move { strategies.execute(strategy, request, upstream).await }.boxed();

        OfflineCacheFuture::new(future, self.cache_status_header.clone())
    }
}
