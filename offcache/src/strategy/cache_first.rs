use std::fmt::Debug;

use http::{Request, Response};
use http_body::Body;
use offcache_backend::{CachePartition, CacheStorage};
use offcache_core::{CacheName, Offload, RequestKey, ResponseSource, StoredResponse, Upstream};

use super::{CacheStrategies, Strategy, fetch, hit, miss, offline};
use crate::CacheError;

impl<S, O> CacheStrategies<S, O>
where
    S: CacheStorage,
    O: Offload,
{
    /// Cache-first: answer from STATIC, go to the network only on a miss.
    ///
    /// 1. Open STATIC and look the request up. A hit is returned and the
    ///    upstream is never called.
    /// 2. On a miss, fetch once. A successful response is duplicated into
    ///    STATIC and the original returned.
    /// 3. If the fetch fails, return the offline response.
    #[tracing::instrument(
        name = "offcache.cache_first",
        skip_all,
        fields(method = %request.method(), uri = %request.uri())
    )]
    pub async fn cache_first<U, ReqBody, ResBody, E>(
        &self,
        request: Request<ReqBody>,
        upstream: U,
    ) -> Result<StoredResponse, CacheError>
    where
        U: Upstream<Request<ReqBody>, Response = Result<Response<ResBody>, E>>,
        ResBody: Body,
        ResBody::Error: Debug,
        E: Debug,
    {
        const STRATEGY: Strategy = Strategy::CacheFirst;

        let key = RequestKey::from_request(&request);
        let cache = self.storage.open(CacheName::Static).await?;

        if let Some(cached) = cache.match_request(&key).await? {
            return Ok(hit(STRATEGY, CacheName::Static, cached));
        }
        miss(STRATEGY, CacheName::Static);

        match fetch(STRATEGY, upstream, request).await {
            Some(response) => {
                self.store(STRATEGY, cache, key, response.duplicate()).await;
                Ok(response.with_source(ResponseSource::Network))
            }
            None => Ok(offline(STRATEGY)),
        }
    }
}
