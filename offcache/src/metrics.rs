//! Metrics declaration and recording.

use std::time::Duration;

use offcache_core::CacheName;

use crate::Strategy;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of cache hit events.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "offcache_cache_hit_total",
            "Total number of responses served from a cache partition."
        );
        "offcache_cache_hit_total"
    };
    /// Track number of cache miss events.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "offcache_cache_miss_total",
            "Total number of cache lookups that found no entry."
        );
        "offcache_cache_miss_total"
    };
    /// Track number of synthetic offline responses.
    pub static ref OFFLINE_RESPONSE_COUNTER: &'static str = {
        metrics::describe_counter!(
            "offcache_offline_response_total",
            "Total number of synthetic offline responses returned."
        );
        "offcache_offline_response_total"
    };
    /// Track number of failed network fetches.
    pub static ref NETWORK_FAILURE_COUNTER: &'static str = {
        metrics::describe_counter!(
            "offcache_network_failure_total",
            "Total number of network fetches that failed."
        );
        "offcache_network_failure_total"
    };
    /// Track number of cache writes that failed and were skipped.
    pub static ref WRITE_FAILURE_COUNTER: &'static str = {
        metrics::describe_counter!(
            "offcache_write_failure_total",
            "Total number of cache writes that failed."
        );
        "offcache_write_failure_total"
    };
    /// Histogram of network fetch duration.
    pub static ref UPSTREAM_DURATION: &'static str = {
        metrics::describe_histogram!(
            "offcache_upstream_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of network fetches in seconds."
        );
        "offcache_upstream_duration_seconds"
    };
}

/// Records a cache hit.
#[cfg(feature = "metrics")]
pub fn record_hit(strategy: Strategy, partition: CacheName) {
    metrics::counter!(*CACHE_HIT_COUNTER, "strategy" => strategy.as_str(), "partition" => partition.as_str())
        .increment(1);
}

/// Records a cache hit.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_hit(_strategy: Strategy, _partition: CacheName) {}

/// Records a cache miss.
#[cfg(feature = "metrics")]
pub fn record_miss(strategy: Strategy, partition: CacheName) {
    metrics::counter!(*CACHE_MISS_COUNTER, "strategy" => strategy.as_str(), "partition" => partition.as_str())
        .increment(1);
}

/// Records a cache miss.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_miss(_strategy: Strategy, _partition: CacheName) {}

/// Records a synthetic offline response.
#[cfg(feature = "metrics")]
pub fn record_offline(strategy: Strategy) {
    metrics::counter!(*OFFLINE_RESPONSE_COUNTER, "strategy" => strategy.as_str()).increment(1);
}

/// Records a synthetic offline response.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_offline(_strategy: Strategy) {}

/// Records a failed network fetch.
#[cfg(feature = "metrics")]
pub fn record_network_failure(strategy: Strategy) {
    metrics::counter!(*NETWORK_FAILURE_COUNTER, "strategy" => strategy.as_str()).increment(1);
}

/// Records a failed network fetch.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_network_failure(_strategy: Strategy) {}

/// Records a failed cache write.
#[cfg(feature = "metrics")]
pub fn record_write_failure(strategy: Strategy, partition: CacheName) {
    metrics::counter!(*WRITE_FAILURE_COUNTER, "strategy" => strategy.as_str(), "partition" => partition.as_str())
        .increment(1);
}

/// Records a failed cache write.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_write_failure(_strategy: Strategy, _partition: CacheName) {}

/// Records how long a network fetch took.
#[cfg(feature = "metrics")]
pub fn record_upstream_duration(strategy: Strategy, duration: Duration) {
    metrics::histogram!(*UPSTREAM_DURATION, "strategy" => strategy.as_str())
        .record(duration.as_secs_f64());
}

/// Records how long a network fetch took.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_upstream_duration(_strategy: Strategy, _duration: Duration) {}
