//! Strategy executor.
//!
//! [`CacheStrategies`] owns the storage handle and the cache write mode.
//! Each strategy lives in its own module as an inherent method:
//!
//! - [`cache_first`](CacheStrategies::cache_first)
//! - [`network_first`](CacheStrategies::network_first)
//! - [`static_only`](CacheStrategies::static_only)
//! - [`network_only`](CacheStrategies::network_only)
//!
//! Invocations are stateless. The partitions are the only state, and
//! concurrent writes to the same key are last-write-wins.

mod cache_first;
mod network_first;
mod network_only;
mod static_only;

use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use http::{Request, Response};
use http_body::Body;
use offcache_backend::{CachePartition, CacheStorage};
use offcache_core::{CacheName, Offload, RequestKey, ResponseSource, StoredResponse, Upstream};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::{ParseStrategyError, TokioOffload, metrics};

/// The policy used to resolve one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Serve from STATIC, fetch and store on a miss.
    #[serde(alias = "cache_first", alias = "cache-first")]
    CacheFirst,
    /// Fetch and store in DYNAMIC, fall back to DYNAMIC on failure.
    #[serde(alias = "network_first", alias = "network-first")]
    NetworkFirst,
    /// Serve from STATIC only, never fetch.
    #[serde(alias = "static_only", alias = "static-only")]
    StaticOnly,
    /// Always fetch, never touch the cache.
    #[serde(alias = "network_only", alias = "network-only")]
    NetworkOnly,
}

impl Strategy {
    /// Snake case name used in logs and metric labels.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Strategy::CacheFirst => "cache_first",
            Strategy::NetworkFirst => "network_first",
            Strategy::StaticOnly => "static_only",
            Strategy::NetworkOnly => "network_only",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    /// Accepts `CacheFirst`, `cache_first` and `cache-first` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").to_ascii_lowercase().as_str() {
            "cache_first" | "cachefirst" => Ok(Strategy::CacheFirst),
            "network_first" | "networkfirst" => Ok(Strategy::NetworkFirst),
            "static_only" | "staticonly" => Ok(Strategy::StaticOnly),
            "network_only" | "networkonly" => Ok(Strategy::NetworkOnly),
            _ => Err(ParseStrategyError(s.to_owned())),
        }
    }
}

/// How a duplicated network response is written to its partition.
///
/// A failing write never fails the request in either mode: the error is
/// logged and the network response is returned as is.
#[derive(Debug, Clone, Default)]
pub enum WriteMode<O = TokioOffload> {
    /// Await the write before returning the response.
    #[default]
    Inline,
    /// Hand the write to an [`Offload`] and return immediately.
    Offload(O),
}

/// Executes caching strategies against a storage.
///
/// Cloning is cheap, clones share the storage.
pub struct CacheStrategies<S, O = TokioOffload> {
    storage: Arc<S>,
    write_mode: WriteMode<O>,
}

impl<S, O> Clone for CacheStrategies<S, O>
where
    O: Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            write_mode: self.write_mode.clone(),
        }
    }
}

impl<S, O> Debug for CacheStrategies<S, O>
where
    S: CacheStorage,
    O: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStrategies")
            .field("storage", &self.storage.label())
            .field("write_mode", &self.write_mode)
            .finish()
    }
}

impl<S> CacheStrategies<S, TokioOffload>
where
    S: CacheStorage,
{
    /// Creates an executor that awaits cache writes inline.
    pub fn new(storage: S) -> Self {
        Self::from_arc(Arc::new(storage))
    }

    /// Creates an executor over an already shared storage.
    pub fn from_arc(storage: Arc<S>) -> Self {
        Self {
            storage,
            write_mode: WriteMode::Inline,
        }
    }
}

impl<S, O> CacheStrategies<S, O>
where
    S: CacheStorage,
    O: Offload,
{
    /// Detaches cache writes onto `offload`.
    pub fn with_offload<NO: Offload>(self, offload: NO) -> CacheStrategies<S, NO> {
        CacheStrategies {
            storage: self.storage,
            write_mode: WriteMode::Offload(offload),
        }
    }

    /// Replaces the write mode.
    pub fn with_write_mode<NO: Offload>(self, write_mode: WriteMode<NO>) -> CacheStrategies<S, NO> {
        CacheStrategies {
            storage: self.storage,
            write_mode,
        }
    }

    /// The storage strategies read from and write to.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Current write mode.
    pub fn write_mode(&self) -> &WriteMode<O> {
        &self.write_mode
    }

    /// Resolves `request` with the given strategy.
    pub async fn execute<U, ReqBody, ResBody, E>(
        &self,
        strategy: Strategy,
        request: Request<ReqBody>,
        upstream: U,
    ) -> Result<StoredResponse, crate::CacheError>
    where
        U: Upstream<Request<ReqBody>, Response = Result<Response<ResBody>, E>>,
        ResBody: Body,
        ResBody::Error: Debug,
        E: Debug,
    {
        match strategy {
            Strategy::CacheFirst => self.cache_first(request, upstream).await,
            Strategy::NetworkFirst => self.network_first(request, upstream).await,
            Strategy::StaticOnly => self.static_only(request).await,
            Strategy::NetworkOnly => Ok(self.network_only(request, upstream).await),
        }
    }

    /// Writes `response` into `partition` according to the write mode.
    async fn store(
        &self,
        strategy: Strategy,
        partition: S::Partition,
        key: RequestKey,
        response: StoredResponse,
    ) {
        match &self.write_mode {
            WriteMode::Inline => put_or_log(strategy, partition, key, response).await,
            WriteMode::Offload(offload) => {
                offload.spawn("cache_put", put_or_log(strategy, partition, key, response))
            }
        }
    }
}

async fn put_or_log<P>(strategy: Strategy, partition: P, key: RequestKey, response: StoredResponse)
where
    P: CachePartition,
{
    let name = partition.name();
    let logged_key = key.clone();
    match partition.put(key, response).await {
        Ok(()) => debug!(%strategy, partition = %name, key = %logged_key, "stored network response"),
        Err(error) => {
            warn!(
                %strategy,
                partition = %name,
                key = %logged_key,
                error = %error,
                "cache write failed, network response served uncached"
            );
            metrics::record_write_failure(strategy, name);
        }
    }
}

/// Performs the single network attempt of a strategy.
///
/// Returns `None` when the upstream fails or the body cannot be read.
async fn fetch<U, ReqBody, ResBody, E>(
    strategy: Strategy,
    mut upstream: U,
    request: Request<ReqBody>,
) -> Option<StoredResponse>
where
    U: Upstream<Request<ReqBody>, Response = Result<Response<ResBody>, E>>,
    ResBody: Body,
    ResBody::Error: Debug,
    E: Debug,
{
    let started = Instant::now();
    let result = upstream.call(request).await;
    metrics::record_upstream_duration(strategy, started.elapsed());

    let response = match result {
        Ok(response) => response,
        Err(error) => {
            error!(%strategy, ?error, "{strategy} strategy failed: network fetch error");
            metrics::record_network_failure(strategy);
            return None;
        }
    };

    match StoredResponse::buffer(response).await {
        Ok(response) => Some(response),
        Err(error) => {
            error!(%strategy, ?error, "{strategy} strategy failed: response body error");
            metrics::record_network_failure(strategy);
            None
        }
    }
}

fn offline(strategy: Strategy) -> StoredResponse {
    debug!(%strategy, "serving offline response");
    metrics::record_offline(strategy);
    StoredResponse::offline()
}

fn hit(strategy: Strategy, partition: CacheName, response: StoredResponse) -> StoredResponse {
    debug!(%strategy, %partition, "cache hit");
    metrics::record_hit(strategy, partition);
    response.with_source(ResponseSource::Cache(partition))
}

fn miss(strategy: Strategy, partition: CacheName) {
    debug!(%strategy, %partition, "cache miss");
    metrics::record_miss(strategy, partition);
}
