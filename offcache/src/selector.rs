use http::request::Parts;

use crate::Strategy;

/// Chooses the strategy for an intercepted request.
///
/// Selection is a pure function of the request head. It is implemented for
/// closures and for [`Strategy`] itself (every request gets the same one).
///
/// ```
/// use http::request::Parts;
/// use offcache::{Strategy, StrategySelector};
///
/// let selector = |parts: &Parts| {
///     if parts.uri.path().starts_with("/api/") {
///         Strategy::NetworkFirst
///     } else {
///         Strategy::CacheFirst
///     }
/// };
///
/// let (parts, _) = http::Request::get("/api/data").body(()).unwrap().into_parts();
/// assert_eq!(selector.select(&parts), Strategy::NetworkFirst);
/// assert_eq!(Strategy::StaticOnly.select(&parts), Strategy::StaticOnly);
/// ```
pub trait StrategySelector: Send + Sync {
    /// Returns the strategy that handles this request.
    fn select(&self, parts: &Parts) -> Strategy;
}

impl<F> StrategySelector for F
where
    F: Fn(&Parts) -> Strategy + Send + Sync,
{
    fn select(&self, parts: &Parts) -> Strategy {
        self(parts)
    }
}

impl StrategySelector for Strategy {
    fn select(&self, _parts: &Parts) -> Strategy {
        *self
    }
}
