use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Future;
use futures::ready;
use http::header::HeaderName;
use http::{HeaderValue, Response};
use http_body_util::Full;
use offcache::CacheError;
use offcache_core::{ResponseSource, StoredResponse};
use pin_project::pin_project;

/// Wrapper future that turns the strategy outcome into the HTTP response
/// and adds the cache status header.
#[pin_project]
pub struct OfflineCacheFuture<F> {
    #[pin]
    inner: F,
    cache_status_header: Option<HeaderName>,
}

impl<F> OfflineCacheFuture<F> {
    pub fn new(inner: F, cache_status_header: Option<HeaderName>) -> Self {
        Self {
            inner,
            cache_status_header,
        }
    }
}

impl<F> Future for OfflineCacheFuture<F>
where
    F: Future<Output = Result<StoredResponse, CacheError>>,
{
    type Output = Result<Response<Full<Bytes>>, CacheError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let stored = ready!(this.inner.poll(cx))?;

        let status = stored.source().map(cache_status);
        let mut response = stored.into_response();
        if let (Some(header), Some(status)) = (this.cache_status_header.take(), status) {
            response.headers_mut().insert(header, status);
        }

        Poll::Ready(Ok(response))
    }
}

fn cache_status(source: ResponseSource) -> HeaderValue {
    match source {
        ResponseSource::Cache(_) => HeaderValue::from_static("HIT"),
        ResponseSource::Network => HeaderValue::from_static("MISS"),
        ResponseSource::Offline => HeaderValue::from_static("OFFLINE"),
    }
}
