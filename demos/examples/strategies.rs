//! Strategy walkthrough
//!
//! Runs the caching strategies directly against a Moka storage and an
//! in-process "network" that can be switched off, printing what each
//! request resolves to.
//!
//! Run:
//!   RUST_LOG=offcache=debug cargo run -p offcache-demos --example strategies

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use offcache::{CacheStrategies, StoredResponse, Strategy, upstream_fn};
use offcache_moka::MokaStorage;
use tracing_subscriber::EnvFilter;

fn print(label: &str, response: &StoredResponse) {
    println!(
        "{label:<32} {} {:<20} {:?} via {:?}",
        response.status().as_u16(),
        response.status_text().unwrap_or_default(),
        response.body(),
        response.source(),
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let online = Arc::new(AtomicBool::new(true));
    let network = {
        let online = Arc::clone(&online);
        upstream_fn(move |req: Request<()>| {
            let online = online.load(Ordering::SeqCst);
            async move {
                if !online {
                    return Err("network unreachable");
                }
                let body = format!("fresh {}", req.uri().path());
                Ok(Response::new(Full::new(Bytes::from(body))))
            }
        })
    };

    let strategies = CacheStrategies::new(MokaStorage::builder().max_entries(1_000).build());
    let get = |path: &str| Request::get(path).body(());

    println!("=== Online ===");
    let response = strategies
        .execute(Strategy::CacheFirst, get("/app.css")?, network.clone())
        .await?;
    print("cache-first GET /app.css", &response);
    let response = strategies
        .execute(Strategy::NetworkFirst, get("/api/data")?, network.clone())
        .await?;
    print("network-first GET /api/data", &response);
    let response = strategies
        .execute(Strategy::StaticOnly, get("/assets/app.1234.js")?, network.clone())
        .await?;
    print("static-only GET /assets/app.1234.js", &response);

    online.store(false, Ordering::SeqCst);

    println!("\n=== Offline ===");
    let response = strategies
        .execute(Strategy::CacheFirst, get("/app.css")?, network.clone())
        .await?;
    print("cache-first GET /app.css", &response);
    let response = strategies
        .execute(Strategy::NetworkFirst, get("/api/data")?, network.clone())
        .await?;
    print("network-first GET /api/data", &response);
    let response = strategies
        .execute(Strategy::NetworkFirst, get("/api/other")?, network.clone())
        .await?;
    print("network-first GET /api/other", &response);
    let response = strategies
        .execute(Strategy::NetworkOnly, get("/api/submit")?, network)
        .await?;
    print("network-only GET /api/submit", &response);

    Ok(())
}
