//! End-to-end tests over a real TCP listener.
//!
//! The gateway runs on an ephemeral port and is driven with reqwest.

use std::net::SocketAddr;
use std::sync::Arc;

use cache_gateway::{
    api::create_router, config::EvictionSettings, store::MemoryStore, AppState, CacheGateway,
};
use serde_json::Value;

const SECRET: &str = "e2e-secret";

async fn spawn_server() -> SocketAddr {
    let gateway = CacheGateway::new(Arc::new(MemoryStore::new()), Some(SECRET.to_string()));
    gateway
        .initialize(&EvictionSettings::default())
        .await
        .unwrap();
    let app = create_router(AppState::new(gateway));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}/api/v1/cache{}", addr, path)
}

#[tokio::test]
async fn test_set_get_and_flush_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(url(addr, "/set"))
        .query(&[("key", "greeting"), ("value", "hello world")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body: Value = client
        .get(url(addr, "/get"))
        .query(&[("key", "greeting")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["value"], "hello world");

    let resp = client
        .delete(url(addr, "/cleardatabase"))
        .query(&[("secret", SECRET)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body: Value = client
        .get(url(addr, "/get"))
        .query(&[("key", "greeting")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["value"].is_null());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_gets_lose_no_counts() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(url(addr, "/set"))
        .query(&[("key", "hot"), ("value", "1")])
        .send()
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..40 {
        let client = client.clone();
        let key = if i % 4 == 0 { "cold" } else { "hot" };
        let target = url(addr, "/get");
        handles.push(tokio::spawn(async move {
            client
                .get(target)
                .query(&[("key", key)])
                .send()
                .await
                .unwrap()
                .status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), reqwest::StatusCode::OK);
    }

    let stats: Value = client
        .get(url(addr, "/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["cache_hits"], 30);
    assert_eq!(stats["cache_misses"], 10);
    assert_eq!(stats["hit_miss_ratio"], 3.0);
}
