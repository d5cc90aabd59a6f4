//! Tower Service Example
//!
//! Puts the offcache layer in front of a flaky origin served with Hyper.
//! Strategies are routed from a YAML table, partitions live in Moka and
//! cache writes are offloaded to tokio tasks.
//!
//! Run:
//!   RUST_LOG=info,offcache=debug cargo run -p offcache-demos --example tower
//!
//! Endpoints:
//!   - http://localhost:3002/app.css       - cache-first (STATIC)
//!   - http://localhost:3002/api/time      - network-first (DYNAMIC)
//!   - http://localhost:3002/assets/logo   - static-only, never fetched
//!   - http://localhost:3002/network/toggle - network-only, flips the origin on and off
//!
//! Try it:
//!   curl -i http://localhost:3002/app.css          # MISS, then HIT
//!   curl -i http://localhost:3002/api/time         # MISS while online
//!   curl -i http://localhost:3002/network/toggle   # origin goes offline
//!   curl -i http://localhost:3002/api/time         # HIT with the last value
//!   curl -i http://localhost:3002/api/other        # 503 Offline

use std::future::{Ready, ready};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use http::{Request, Response, StatusCode};
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use offcache_configuration::ConfigRoutes;
use offcache_moka::MokaStorage;
use offcache_tower::OfflineCacheLayer;
use tokio::net::TcpListener;
use tower::{Service, ServiceBuilder};
use tracing_subscriber::EnvFilter;

const ROUTES: &str = r#"
cache_names:
  static: demo-static-v1
  dynamic: demo-dynamic-v1
write: Offload
default: NetworkOnly
routes:
  - path: { prefix: "/network/" }
    strategy: NetworkOnly
  - path: { prefix: "/assets/" }
    strategy: StaticOnly
  - method: GET
    path: { regex: "\\.(css|js)$" }
    strategy: CacheFirst
  - method: GET
    path: { prefix: "/api/" }
    strategy: NetworkFirst
"#;

/// Origin that fails every request except the toggle while switched off.
#[derive(Clone)]
struct FlakyOrigin {
    online: Arc<AtomicBool>,
}

impl<B> Service<Request<B>> for FlakyOrigin {
    type Response = Response<Full<Bytes>>;
    type Error = io::Error;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        if req.uri().path() == "/network/toggle" {
            let was_online = self.online.fetch_xor(true, Ordering::SeqCst);
            let state = if was_online { "offline" } else { "online" };
            return ready(Ok(text(StatusCode::OK, format!("origin is now {state}"))));
        }
        if !self.online.load(Ordering::SeqCst) {
            return ready(Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "origin unreachable",
            )));
        }

        let response = match req.uri().path() {
            "/app.css" => text(StatusCode::OK, "body { color: teal; }".to_string()),
            "/api/time" => {
                let secs = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_secs())
                    .unwrap_or_default();
                text(StatusCode::OK, format!("unix time: {secs}"))
            }
            _ => text(StatusCode::NOT_FOUND, "Not Found".to_string()),
        };
        ready(Ok(response))
    }
}

fn text(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,offcache=debug")),
        )
        .init();

    let config: ConfigRoutes = serde_saphyr::from_str(ROUTES)?;
    let write_mode = config.write_mode();
    let names = config.clone().into_partition_names()?;
    let selector = config.into_selector()?;

    let storage = MokaStorage::builder()
        .max_entries(10_000)
        .names(names)
        .build();

    let cache_layer = OfflineCacheLayer::builder()
        .storage(storage)
        .selector(selector)
        .write_mode(write_mode)
        .build();

    let service = ServiceBuilder::new()
        .layer(cache_layer)
        .service(FlakyOrigin {
            online: Arc::new(AtomicBool::new(true)),
        });

    let addr = SocketAddr::from(([127, 0, 0, 1], 3002));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let svc = service.clone();

        tokio::task::spawn(async move {
            let hyper_service = TowerToHyperService::new(svc);

            if let Err(err) = http1::Builder::new()
                .serve_connection(io, hyper_service)
                .await
            {
                tracing::error!(?err, "Error serving connection");
            }
        });
    }
}
