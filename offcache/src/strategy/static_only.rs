use http::Request;
use offcache_backend::{CachePartition, CacheStorage};
use offcache_core::{CacheName, Offload, RequestKey, StoredResponse};

use super::{CacheStrategies, Strategy, hit, miss, offline};
use crate::CacheError;

impl<S, O> CacheStrategies<S, O>
where
    S: CacheStorage,
    O: Offload,
{
    /// Static-only: answer from STATIC or not at all.
    ///
    /// Never fetches and never writes. A miss is terminal and yields the
    /// offline response. Meant for immutable build assets that are
    /// precached and must never be fetched live.
    #[tracing::instrument(
        name = "offcache.static_only",
        skip_all,
        fields(method = %request.method(), uri = %request.uri())
    )]
    pub async fn static_only<ReqBody>(
        &self,
        request: Request<ReqBody>,
    ) -> Result<StoredResponse, CacheError> {
        const STRATEGY: Strategy = Strategy::StaticOnly;

        let key = RequestKey::from_request(&request);
        let cache = self.storage.open(CacheName::Static).await?;

        match cache.match_request(&key).await? {
            Some(cached) => Ok(hit(STRATEGY, CacheName::Static, cached)),
            None => {
                miss(STRATEGY, CacheName::Static);
                Ok(offline(STRATEGY))
            }
        }
    }
}
