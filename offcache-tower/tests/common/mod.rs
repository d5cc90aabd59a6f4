#![allow(dead_code)]

use std::future::{Ready, ready};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::task::{Context, Poll};

use bytes::Bytes;
use http::{Request, Response};
use http_body_util::{BodyExt, Full};
use tower::Service;

/// Wrapped service standing in for the network.
///
/// Answers `network:<path>` while online and fails while offline. Clones
/// share the switch and the call counter.
#[derive(Clone, Debug)]
pub struct Network {
    online: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl Network {
    pub fn online() -> Self {
        Self {
            online: Arc::new(AtomicBool::new(true)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn go_offline(&self) {
        self.online.store(false, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Service<Request<()>> for Network {
    type Response = Response<Full<Bytes>>;
    type Error = io::Error;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<()>) -> Self::Future {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.online.load(Ordering::SeqCst) {
            return ready(Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "network unreachable",
            )));
        }
        let body = format!("network:{}", req.uri().path());
        ready(Ok(Response::new(Full::new(Bytes::from(body)))))
    }
}

pub fn get(uri: &str) -> Request<()> {
    Request::get(uri).body(()).unwrap()
}

pub async fn body_string(response: Response<Full<Bytes>>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
