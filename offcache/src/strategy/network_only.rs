use std::fmt::Debug;

use http::{Request, Response};
use http_body::Body;
use offcache_backend::CacheStorage;
use offcache_core::{Offload, ResponseSource, StoredResponse, Upstream};

use super::{CacheStrategies, Strategy, fetch, offline};

impl<S, O> CacheStrategies<S, O>
where
    S: CacheStorage,
    O: Offload,
{
    /// Network-only: fetch without touching any partition.
    ///
    /// A failed fetch yields the offline response. Infallible, since no
    /// storage is involved.
    #[tracing::instrument(
        name = "offcache.network_only",
        skip_all,
        fields(method = %request.method(), uri = %request.uri())
    )]
    pub async fn network_only<U, ReqBody, ResBody, E>(
        &self,
        request: Request<ReqBody>,
        upstream: U,
    ) -> StoredResponse
    where
        U: Upstream<Request<ReqBody>, Response = Result<Response<ResBody>, E>>,
        ResBody: Body,
        ResBody::Error: Debug,
        E: Debug,
    {
        const STRATEGY: Strategy = Strategy::NetworkOnly;

        match fetch(STRATEGY, upstream, request).await {
            Some(response) => response.with_source(ResponseSource::Network),
            None => offline(STRATEGY),
        }
    }
}
