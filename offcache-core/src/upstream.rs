//! Network access for strategies.
//!
//! [`Upstream`] is the single network attempt a strategy makes for an
//! intercepted request. [`upstream_fn`] adapts a closure into one.

use std::future::Future;

/// Trait for performing the network fetch of an intercepted request.
/// This trait is framework-agnostic and can be implemented for any async client or service.
///
/// Strategies call an upstream at most once per request. A fetch that
/// resolves to an error is a failed fetch; strategies then fall back to a
/// cache partition or the offline response.
///
/// # Examples
///
/// ```rust
/// use offcache_core::{Upstream, upstream_fn};
///
/// let mut upstream = upstream_fn(|path: &'static str| async move {
///     Ok::<_, std::io::Error>(format!("fetched {path}"))
/// });
/// # let _ = upstream.call("/app.css");
/// ```
pub trait Upstream<Req> {
    /// The response type returned by the upstream
    type Response;

    /// The future that resolves to the response
    type Future: Future<Output = Self::Response> + Send;

    /// Fetch the given request
    fn call(&mut self, req: Req) -> Self::Future;
}

impl<Req, U> Upstream<Req> for &mut U
where
    U: Upstream<Req> + ?Sized,
{
    type Response = U::Response;
    type Future = U::Future;

    fn call(&mut self, req: Req) -> Self::Future {
        (**self).call(req)
    }
}

/// Upstream built from a closure, see [`upstream_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnUpstream<F> {
    f: F,
}

/// Wraps a closure returning a future as an [`Upstream`].
pub fn upstream_fn<F>(f: F) -> FnUpstream<F> {
    FnUpstream { f }
}

impl<Req, F, Fut> Upstream<Req> for FnUpstream<F>
where
    F: FnMut(Req) -> Fut,
    Fut: Future + Send,
{
    type Response = Fut::Output;
    type Future = Fut;

    fn call(&mut self, req: Req) -> Self::Future {
        (self.f)(req)
    }
}
