//! Offload trait for background task execution.
//!
//! Cache writes do not have to block the response path. When a strategy
//! executor is configured with an [`Offload`], the write of a duplicated
//! network response is handed to it and the original response is returned
//! straight away.

use std::future::Future;

use smol_str::SmolStr;

/// Trait for spawning background tasks.
///
/// # Clone bound
///
/// Implementors should use `Arc` internally (or be zero sized) so that all
/// cloned instances share the same runtime handle and state.
///
/// # Example
///
/// ```ignore
/// use offcache_core::Offload;
///
/// fn offload_cache_put<O: Offload>(offload: &O, key: String) {
///     offload.spawn("cache_put", async move {
///         println!("Writing to cache: {}", key);
///     });
/// }
/// ```
pub trait Offload: Send + Sync + Clone {
    /// Spawn a future to be executed in the background.
    ///
    /// # Arguments
    ///
    /// * `kind` - A label categorizing the task type (e.g., "cache_put").
    ///   Used for tracing.
    /// * `future` - The future to execute in the background. Must be `Send + 'static`
    ///   as it may be executed on a different thread.
    fn spawn<F>(&self, kind: impl Into<SmolStr>, future: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
