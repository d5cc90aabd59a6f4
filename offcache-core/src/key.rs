//! Request keys for cache lookups.
//!
//! A [`RequestKey`] is the part of a request a partition is addressed by:
//! the method and the full URI, compared exactly. Headers and body never
//! take part in the lookup.
//!
//! ```
//! use http::{Method, Request};
//! use offcache_core::RequestKey;
//!
//! let request = Request::get("/app.css").body(()).unwrap();
//! let key = RequestKey::from_request(&request);
//!
//! assert_eq!(key, RequestKey::new(Method::GET, "/app.css".parse().unwrap()));
//! assert_eq!(key.to_string(), "GET /app.css");
//! ```

use http::{Method, Request, Uri, request::Parts};
use std::fmt;

/// Exact-match cache key derived from a request.
///
/// Cloning a key clones the method and URI, both of which share their
/// underlying buffers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    method: Method,
    uri: Uri,
}

impl RequestKey {
    /// Creates a key from a method and URI.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }

    /// Builds the key of a request without consuming it.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::new(request.method().clone(), request.uri().clone())
    }

    /// Builds the key from request head parts.
    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(parts.method.clone(), parts.uri.clone())
    }

    /// Returns the request method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Approximate heap and inline size of the key in bytes.
    ///
    /// Used by size-weighted storages.
    pub fn memory_size(&self) -> usize {
        std::mem::size_of::<Self>() + self.method.as_str().len() + self.uri.to_string().len()
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri)
    }
}
