//! Upstream adapter for bridging Tower services to offcache.
//!
//! [`TowerUpstream`] implements offcache's [`Upstream`] trait for a Tower
//! service so strategies can perform their network attempt through it.
//! It is used internally by [`OfflineCacheService`](crate::service::OfflineCacheService).

use http::{Request, Response};
use offcache_core::Upstream;
use tower::Service;
use tower::util::{Oneshot, ServiceExt};

/// Adapter that implements offcache's [`Upstream`] for a Tower [`Service`].
///
/// Every call drives a fresh clone of the service through readiness and
/// the request, so a strategy never has to poll the service itself.
#[derive(Clone, Debug)]
pub struct TowerUpstream<S> {
    service: S,
}

impl<S> TowerUpstream<S> {
    /// Creates a new upstream adapter wrapping the given service.
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

impl<S, ReqBody, ResBody> Upstream<Request<ReqBody>> for TowerUpstream<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send,
    S::Future: Send,
    ReqBody: Send,
{
    type Response = Result<Response<ResBody>, S::Error>;
    type Future = Oneshot<S, Request<ReqBody>>;

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        self.service.clone().oneshot(req)
    }
}
