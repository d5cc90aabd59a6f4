mod common;

use std::time::Duration;

use http::StatusCode;
use offcache::{
    CacheError, CacheName, CacheStrategies, ResponseSource, StorageError, Strategy, TokioOffload,
};
use offcache_backend::MemoryStorage;

use common::{BrokenBodyNetwork, BrokenStorage, FakeNetwork, FullStorage, Network, get, key, seed};

fn assert_offline(response: &offcache::StoredResponse) {
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.status_text(), Some("Service Unavailable"));
    assert_eq!(response.body().as_ref(), b"Offline");
    assert_eq!(response.source(), Some(ResponseSource::Offline));
}

// cache-first

#[tokio::test]
async fn cache_first_hit_skips_network() {
    let storage = MemoryStorage::new();
    seed(&storage, CacheName::Static, "/app.css", "cached-css").await;
    let strategies = CacheStrategies::new(storage);
    let network = FakeNetwork::ok("network-css");

    let response = strategies
        .cache_first(get("/app.css"), network.clone())
        .await
        .unwrap();

    assert_eq!(response.body().as_ref(), b"cached-css");
    assert_eq!(response.source(), Some(ResponseSource::Cache(CacheName::Static)));
    assert_eq!(network.calls(), 0);
}

#[tokio::test]
async fn cache_first_miss_fetches_and_populates_static() {
    let storage = MemoryStorage::new();
    let strategies = CacheStrategies::new(storage.clone());
    let network = FakeNetwork::ok("body-css");

    let first = strategies
        .cache_first(get("/app.css"), network.clone())
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.body().as_ref(), b"body-css");
    assert_eq!(first.headers()["content-type"], "text/plain");
    assert_eq!(first.source(), Some(ResponseSource::Network));
    assert!(storage.contains(CacheName::Static, &key("/app.css")));
    assert!(storage.is_empty(CacheName::Dynamic));

    let second = strategies
        .cache_first(get("/app.css"), network.clone())
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.body().as_ref(), b"body-css");
    assert_eq!(second.source(), Some(ResponseSource::Cache(CacheName::Static)));
    assert_eq!(network.calls(), 1);
}

#[tokio::test]
async fn cache_first_miss_with_network_down_is_offline() {
    let storage = MemoryStorage::new();
    let strategies = CacheStrategies::new(storage.clone());
    let network = FakeNetwork::down();

    let response = strategies
        .cache_first(get("/app.css"), network.clone())
        .await
        .unwrap();

    assert_offline(&response);
    assert_eq!(network.calls(), 1);
    assert!(storage.is_empty(CacheName::Static));
}

#[tokio::test]
async fn cache_first_second_call_is_a_hit_after_network_goes_down() {
    let strategies = CacheStrategies::new(MemoryStorage::new());
    let network = FakeNetwork::ok("body-js");

    let first = strategies
        .cache_first(get("/app.js"), network.clone())
        .await
        .unwrap();
    network.set(Network::Down);
    let second = strategies
        .cache_first(get("/app.js"), network.clone())
        .await
        .unwrap();

    assert_eq!(first.status(), second.status());
    assert_eq!(first.body(), second.body());
    assert_eq!(network.calls(), 1);
}

#[tokio::test]
async fn cache_first_caches_error_statuses() {
    let storage = MemoryStorage::new();
    let strategies = CacheStrategies::new(storage.clone());
    let network = FakeNetwork::new(Network::Respond(StatusCode::NOT_FOUND, "missing"));

    let response = strategies
        .cache_first(get("/missing.png"), network)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(storage.contains(CacheName::Static, &key("/missing.png")));
}

// network-first

#[tokio::test]
async fn network_first_success_overwrites_dynamic() {
    let storage = MemoryStorage::new();
    seed(&storage, CacheName::Dynamic, "/api/data", "stale-data").await;
    let strategies = CacheStrategies::new(storage.clone());
    let network = FakeNetwork::ok("fresh-data");

    let response = strategies
        .network_first(get("/api/data"), network.clone())
        .await
        .unwrap();
    assert_eq!(response.body().as_ref(), b"fresh-data");
    assert_eq!(response.source(), Some(ResponseSource::Network));

    network.set(Network::Down);
    let fallback = strategies
        .network_first(get("/api/data"), network.clone())
        .await
        .unwrap();
    assert_eq!(fallback.body().as_ref(), b"fresh-data");
    assert_eq!(fallback.source(), Some(ResponseSource::Cache(CacheName::Dynamic)));
    assert_eq!(network.calls(), 2);
    assert!(storage.is_empty(CacheName::Static));
}

#[tokio::test]
async fn network_first_failure_returns_dynamic_entry() {
    let storage = MemoryStorage::new();
    seed(&storage, CacheName::Dynamic, "/api/data", "cached-data").await;
    let strategies = CacheStrategies::new(storage);

    let response = strategies
        .network_first(get("/api/data"), FakeNetwork::down())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"cached-data");
}

#[tokio::test]
async fn network_first_body_error_falls_back_to_dynamic() {
    let storage = MemoryStorage::new();
    seed(&storage, CacheName::Dynamic, "/api/data", "cached-data").await;
    let strategies = CacheStrategies::new(storage.clone());
    let network = BrokenBodyNetwork::default();

    let response = strategies
        .network_first(get("/api/data"), network.clone())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"cached-data");
    assert_eq!(response.source(), Some(ResponseSource::Cache(CacheName::Dynamic)));
    assert_eq!(network.calls(), 1);
    assert_eq!(storage.len(CacheName::Dynamic), 1);
}

#[tokio::test]
async fn cache_first_body_error_is_offline_and_stores_nothing() {
    let storage = MemoryStorage::new();
    let strategies = CacheStrategies::new(storage.clone());
    let network = BrokenBodyNetwork::default();

    let response = strategies
        .cache_first(get("/app.css"), network.clone())
        .await
        .unwrap();

    assert_offline(&response);
    assert_eq!(network.calls(), 1);
    assert!(storage.is_empty(CacheName::Static));
}

#[tokio::test]
async fn network_first_failure_ignores_static_entries() {
    let storage = MemoryStorage::new();
    seed(&storage, CacheName::Static, "/api/data", "static-copy").await;
    let strategies = CacheStrategies::new(storage);

    let response = strategies
        .network_first(get("/api/data"), FakeNetwork::down())
        .await
        .unwrap();

    assert_offline(&response);
}

#[tokio::test]
async fn network_first_offline_scenario() {
    let strategies = CacheStrategies::new(MemoryStorage::new());

    let response = strategies
        .network_first(get("/api/data"), FakeNetwork::down())
        .await
        .unwrap();

    assert_offline(&response);
}

// static-only

#[tokio::test]
async fn static_only_never_fetches() {
    let storage = MemoryStorage::new();
    seed(&storage, CacheName::Static, "/assets/app.1234.js", "bundle").await;
    let strategies = CacheStrategies::new(storage.clone());
    let network = FakeNetwork::ok("live");

    let hit = strategies
        .execute(Strategy::StaticOnly, get("/assets/app.1234.js"), network.clone())
        .await
        .unwrap();
    let miss = strategies
        .execute(Strategy::StaticOnly, get("/assets/other.js"), network.clone())
        .await
        .unwrap();

    assert_eq!(hit.body().as_ref(), b"bundle");
    assert_offline(&miss);
    assert_eq!(network.calls(), 0);
    assert_eq!(storage.len(CacheName::Static), 1);
}

// network-only

#[tokio::test]
async fn network_only_never_touches_storage() {
    let strategies = CacheStrategies::new(BrokenStorage);
    let network = FakeNetwork::ok("submitted");

    let response = strategies
        .execute(Strategy::NetworkOnly, get("/api/submit"), network.clone())
        .await
        .unwrap();
    assert_eq!(response.body().as_ref(), b"submitted");

    network.set(Network::Down);
    let response = strategies
        .execute(Strategy::NetworkOnly, get("/api/submit"), network.clone())
        .await
        .unwrap();
    assert_offline(&response);
    assert_eq!(network.calls(), 2);
}

// storage faults

#[tokio::test]
async fn failed_write_still_returns_network_response() {
    let strategies = CacheStrategies::new(FullStorage::default());

    let cache_first = strategies
        .cache_first(get("/app.css"), FakeNetwork::ok("body-css"))
        .await
        .unwrap();
    let network_first = strategies
        .network_first(get("/api/data"), FakeNetwork::ok("data"))
        .await
        .unwrap();

    assert_eq!(cache_first.body().as_ref(), b"body-css");
    assert_eq!(network_first.body().as_ref(), b"data");
    assert!(strategies.storage().inner.is_empty(CacheName::Static));
    assert!(strategies.storage().inner.is_empty(CacheName::Dynamic));
}

#[tokio::test]
async fn open_failure_propagates() {
    let strategies = CacheStrategies::new(BrokenStorage);
    let network = FakeNetwork::ok("body");

    let err = strategies
        .cache_first(get("/app.css"), network.clone())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CacheError::Storage(StorageError::InternalError(_))
    ));
    assert_eq!(network.calls(), 0);
}

// write modes

#[tokio::test]
async fn offloaded_write_eventually_populates_partition() {
    let storage = MemoryStorage::new();
    let strategies = CacheStrategies::new(storage.clone()).with_offload(TokioOffload);

    let response = strategies
        .cache_first(get("/app.css"), FakeNetwork::ok("body-css"))
        .await
        .unwrap();
    assert_eq!(response.body().as_ref(), b"body-css");

    let mut stored = false;
    for _ in 0..50 {
        if storage.contains(CacheName::Static, &key("/app.css")) {
            stored = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(stored, "offloaded write never landed");
}

#[tokio::test]
async fn concurrent_writes_to_same_key_keep_one_entry() {
    let storage = MemoryStorage::new();
    let strategies = CacheStrategies::new(storage.clone());

    let (a, b) = tokio::join!(
        strategies.network_first(get("/api/data"), FakeNetwork::ok("a")),
        strategies.network_first(get("/api/data"), FakeNetwork::ok("b")),
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(storage.len(CacheName::Dynamic), 1);
}
