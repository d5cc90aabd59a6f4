//! Shared fakes for strategy tests.
#![allow(dead_code)]

use std::future::{Ready, ready};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use http_body::{Body, Frame};
use http_body_util::Full;
use offcache::{CacheName, CachePartition, CacheStorage, RequestKey, StorageError, StoredResponse};
use offcache_backend::{MemoryPartition, MemoryStorage, StorageResult};

/// What the fake network does when fetched.
#[derive(Clone, Debug)]
pub enum Network {
    /// Respond with status and body.
    Respond(StatusCode, &'static str),
    /// Fail the fetch as if the connection was lost.
    Down,
}

/// Upstream fake that counts fetches.
///
/// Clones share the counter and the configured behaviour can be swapped
/// between requests.
#[derive(Clone, Debug)]
pub struct FakeNetwork {
    calls: Arc<AtomicUsize>,
    behaviour: Arc<std::sync::Mutex<Network>>,
}

impl FakeNetwork {
    pub fn new(behaviour: Network) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            behaviour: Arc::new(std::sync::Mutex::new(behaviour)),
        }
    }

    pub fn ok(body: &'static str) -> Self {
        Self::new(Network::Respond(StatusCode::OK, body))
    }

    pub fn down() -> Self {
        Self::new(Network::Down)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set(&self, behaviour: Network) {
        *self.behaviour.lock().unwrap() = behaviour;
    }
}

impl offcache::Upstream<Request<()>> for FakeNetwork {
    type Response = Result<Response<Full<Bytes>>, std::io::Error>;
    type Future = Ready<Self::Response>;

    fn call(&mut self, _req: Request<()>) -> Self::Future {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behaviour = self.behaviour.lock().unwrap().clone();
        ready(match behaviour {
            Network::Respond(status, body) => Ok(Response::builder()
                .status(status)
                .header("content-type", "text/plain")
                .body(Full::new(Bytes::from_static(body.as_bytes())))
                .unwrap()),
            Network::Down => Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "network unreachable",
            )),
        })
    }
}

/// Response body whose first read fails, as when the connection drops
/// after the head arrived.
#[derive(Debug, Default)]
pub struct BrokenBody;

impl Body for BrokenBody {
    type Data = Bytes;
    type Error = std::io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(Some(Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset mid-body",
        ))))
    }
}

/// Upstream that answers `200 OK` with a [`BrokenBody`].
#[derive(Clone, Debug, Default)]
pub struct BrokenBodyNetwork {
    calls: Arc<AtomicUsize>,
}

impl BrokenBodyNetwork {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl offcache::Upstream<Request<()>> for BrokenBodyNetwork {
    type Response = Result<Response<BrokenBody>, std::io::Error>;
    type Future = Ready<Self::Response>;

    fn call(&mut self, _req: Request<()>) -> Self::Future {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ready(Ok(Response::new(BrokenBody)))
    }
}

pub fn get(path: &str) -> Request<()> {
    Request::get(path).body(()).unwrap()
}

pub fn key(path: &str) -> RequestKey {
    RequestKey::new(Method::GET, path.parse().unwrap())
}

pub async fn seed(storage: &MemoryStorage, name: CacheName, path: &str, body: &'static str) {
    storage
        .open(name)
        .await
        .unwrap()
        .put(key(path), StoredResponse::new(StatusCode::OK, body))
        .await
        .unwrap();
}

/// Storage whose reads work but whose writes always hit the quota.
#[derive(Clone, Default)]
pub struct FullStorage {
    pub inner: MemoryStorage,
}

#[derive(Clone)]
pub struct FullPartition {
    inner: MemoryPartition,
}

#[async_trait]
impl CacheStorage for FullStorage {
    type Partition = FullPartition;

    async fn open(&self, name: CacheName) -> StorageResult<Self::Partition> {
        Ok(FullPartition {
            inner: self.inner.open(name).await?,
        })
    }
}

#[async_trait]
impl CachePartition for FullPartition {
    fn name(&self) -> CacheName {
        self.inner.name()
    }

    async fn match_request(&self, key: &RequestKey) -> StorageResult<Option<StoredResponse>> {
        self.inner.match_request(key).await
    }

    async fn put(&self, _key: RequestKey, _response: StoredResponse) -> StorageResult<()> {
        Err(StorageError::QuotaExceeded {
            partition: self.inner.name(),
        })
    }
}

/// Storage that cannot open any partition.
#[derive(Clone, Default)]
pub struct BrokenStorage;

#[async_trait]
impl CacheStorage for BrokenStorage {
    type Partition = MemoryPartition;

    async fn open(&self, _name: CacheName) -> StorageResult<Self::Partition> {
        Err(StorageError::InternalError(Box::new(std::io::Error::other(
            "simulated storage failure",
        ))))
    }
}
