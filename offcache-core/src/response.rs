//! Buffered responses and the synthetic offline response.
//!
//! Response bodies coming off the network are single-read streams. A
//! [`StoredResponse`] holds a body that has already been read into memory,
//! but it still behaves as a move-once value: it is deliberately not
//! `Clone`. Any code path that both stores and returns a response calls
//! [`StoredResponse::duplicate`] first, and partitions hand out a fresh
//! duplicate on every lookup.

use bytes::Bytes;
use http::{Extensions, HeaderMap, Response, StatusCode, Version, response::Parts};
use http_body::Body;
use http_body_util::{BodyExt, Full};
use hyper::ext::ReasonPhrase;

use crate::CacheName;

/// Status of the synthetic offline response.
pub const OFFLINE_STATUS: StatusCode = StatusCode::SERVICE_UNAVAILABLE;
/// Status text of the synthetic offline response.
pub const OFFLINE_STATUS_TEXT: &str = "Service Unavailable";
/// Body of the synthetic offline response.
pub const OFFLINE_BODY: &str = "Offline";

/// Where a response handed back by a strategy came from.
///
/// Strategies attach this to the responses they return as an `http`
/// extension; see [`StoredResponse::source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseSource {
    /// Served from the named cache partition.
    Cache(CacheName),
    /// Fetched from the network.
    Network,
    /// Locally constructed offline response.
    Offline,
}

/// A response with a fully buffered body.
#[derive(Debug)]
pub struct StoredResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    extensions: Extensions,
    body: Bytes,
}

impl StoredResponse {
    /// Creates a response with the given status and body and no headers.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            version: Version::default(),
            headers: HeaderMap::new(),
            extensions: Extensions::new(),
            body: body.into(),
        }
    }

    /// Creates a response from response head parts and an already read body.
    pub fn from_parts(parts: Parts, body: Bytes) -> Self {
        Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            extensions: parts.extensions,
            body,
        }
    }

    /// Reads the body of `response` to the end and stores it.
    ///
    /// This is the single read of a network body. An error while reading is
    /// returned as is; callers treat it like any other failed fetch.
    pub async fn buffer<B>(response: Response<B>) -> Result<Self, B::Error>
    where
        B: Body,
    {
        let (parts, body) = response.into_parts();
        let body = body.collect().await?.to_bytes();
        Ok(Self::from_parts(parts, body))
    }

    /// The synthetic response returned when neither network nor cache can
    /// answer: `503 Service Unavailable` with body `Offline`.
    ///
    /// ```
    /// use offcache_core::StoredResponse;
    ///
    /// let offline = StoredResponse::offline();
    /// assert_eq!(offline.status(), 503);
    /// assert_eq!(offline.status_text(), Some("Service Unavailable"));
    /// assert_eq!(offline.body().as_ref(), b"Offline");
    /// ```
    pub fn offline() -> Self {
        let mut response = Self::new(OFFLINE_STATUS, Bytes::from_static(OFFLINE_BODY.as_bytes()));
        response
            .extensions
            .insert(ReasonPhrase::from_static(OFFLINE_STATUS_TEXT.as_bytes()));
        response.extensions.insert(ResponseSource::Offline);
        response
    }

    /// Returns an independent copy of this response.
    ///
    /// The body buffer is shared, headers and extensions are cloned.
    pub fn duplicate(&self) -> Self {
        Self {
            status: self.status,
            version: self.version,
            headers: self.headers.clone(),
            extensions: self.extensions.clone(),
            body: self.body.clone(),
        }
    }

    /// Response status code.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status text: the reason phrase carried by the response, or the
    /// canonical one for its status code.
    pub fn status_text(&self) -> Option<&str> {
        self.extensions
            .get::<ReasonPhrase>()
            .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
            .or_else(|| self.status.canonical_reason())
    }

    /// HTTP version of the response.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Response headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable response headers.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Response extensions.
    #[inline]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Buffered response body.
    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Where this response came from, if a strategy recorded it.
    pub fn source(&self) -> Option<ResponseSource> {
        self.extensions.get::<ResponseSource>().copied()
    }

    /// Records where this response came from.
    pub fn with_source(mut self, source: ResponseSource) -> Self {
        self.extensions.insert(source);
        self
    }

    /// Whether this is the synthetic offline response.
    pub fn is_offline(&self) -> bool {
        self.source() == Some(ResponseSource::Offline)
    }

    /// Approximate size of the response in bytes.
    ///
    /// Used by size-weighted storages.
    pub fn memory_size(&self) -> usize {
        let headers: usize = self
            .headers
            .iter()
            .map(|(name, value)| name.as_str().len() + value.len())
            .sum();
        std::mem::size_of::<Self>() + headers + self.body.len()
    }

    /// Converts into an `http::Response` with a `Full` body.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        *response.version_mut() = self.version;
        *response.headers_mut() = self.headers;
        *response.extensions_mut() = self.extensions;
        response
    }
}
