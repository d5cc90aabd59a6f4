use std::future::Future;

use offcache_core::Offload;
use smol_str::SmolStr;
use tracing::{Instrument, debug_span};

/// [`Offload`] that spawns tasks on the ambient tokio runtime.
///
/// Spawned writes inherit the span of the request that produced them.
///
/// # Panics
///
/// `spawn` panics when called outside a tokio runtime, like
/// [`tokio::spawn`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioOffload;

impl Offload for TokioOffload {
    fn spawn<F>(&self, kind: impl Into<SmolStr>, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let kind = kind.into();
        let span = debug_span!("offcache.offload", kind = %kind);
        tokio::spawn(future.instrument(span));
    }
}
