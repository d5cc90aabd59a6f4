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
    /// Network-first: always try the network, fall back to DYNAMIC.
    ///
    /// A successful response overwrites the DYNAMIC entry for the request
    /// with a duplicate and is returned. When the fetch fails, DYNAMIC is
    /// opened for reading only; a hit is returned however old it is, a miss
    /// yields the offline response.
    #[tracing::instrument(
        name = "offcache.network_first",
        skip_all,
        fields(method = %request.method(), uri = %request.uri())
    )]
    pub async fn network_first<U, ReqBody, ResBody, E>(
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
        const STRATEGY: Strategy = Strategy::NetworkFirst;

        let key = RequestKey::from_request(&request);

        if let Some(response) = fetch(STRATEGY, upstream, request).await {
            let cache = self.storage.open(CacheName::Dynamic).await?;
            self.store(STRATEGY, cache, key, response.duplicate()).await;
            return Ok(response.with_source(ResponseSource::Network));
        }

        let cache = self.storage.open(CacheName::Dynamic).await?;
        match cache.match_request(&key).await? {
            Some(cached) => Ok(hit(STRATEGY, CacheName::Dynamic, cached)),
            None => {
                miss(STRATEGY, CacheName::Dynamic);
                Ok(offline(STRATEGY))
            }
        }
    }
}
