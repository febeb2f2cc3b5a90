#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use admin_panel::api::ApiClient;
use admin_panel::config::SessionConfig;
use admin_panel::crypto::{StaticKeyCipher, TokenCipher};
use admin_panel::session::{MemorySessionStore, TokenStore};
use anyhow::{Context, Result};
use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{any, get, post},
    Json, Router,
};
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";
pub const ADMIN_TOKEN: &str = "tok-123";

/// Stand-in for the remote admin API, served on a free local port
pub struct MockUpstream {
    pub port: u16,
    pub base_url: String,
}

impl MockUpstream {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock upstream")?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, upstream_routes()).await;
        });

        let upstream = Self { port, base_url };
        upstream.wait_ready(Duration::from_secs(5)).await?;
        Ok(upstream)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("mock upstream did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub fn cipher() -> Arc<dyn TokenCipher> {
    Arc::new(StaticKeyCipher::new(TEST_SECRET))
}

/// Token store over an in-memory cookie jar
pub fn memory_tokens() -> (Arc<MemorySessionStore>, TokenStore) {
    let store = Arc::new(MemorySessionStore::new());
    let tokens = TokenStore::new(store.clone(), cipher(), SessionConfig::default());
    (store, tokens)
}

pub fn client_for(upstream: &MockUpstream, tokens: TokenStore) -> ApiClient {
    ApiClient::new(reqwest::Client::new(), upstream.base_url.clone(), tokens)
}

/// `Cookie` header value carrying `token` the way the panel stores it
pub fn session_cookie(token: &str) -> Result<String> {
    let envelope = cipher().encrypt(token)?;
    Ok(format!("{}={}", SessionConfig::default().token_title, envelope))
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn is_admin(headers: &HeaderMap) -> bool {
    authorization(headers).as_deref() == Some(ADMIN_TOKEN)
}

fn sample_products() -> Value {
    json!([
        {
            "_id": "p1",
            "name": "Wireless Headphones",
            "brand": "Sony",
            "price": 200,
            "discount": 10,
            "discountedPrice": 180,
            "stock": 4
        },
        {
            "_id": "p2",
            "name": "Desk Lamp",
            "brand": "Ikea",
            "price": 40,
            "stock": 0
        }
    ])
}

fn upstream_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Reports the Authorization header it received
        .route(
            "/echo",
            any(|headers: HeaderMap| async move {
                Json(json!({ "status": true, "data": { "authorization": authorization(&headers) } }))
            }),
        )
        .route(
            "/fail",
            any(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/login",
            post(|Json(body): Json<Value>| async move {
                if body["userName"] == ADMIN_USER && body["password"] == ADMIN_PASSWORD {
                    Json(json!({
                        "status": true,
                        "message": "Login successful",
                        "data": { "token": ADMIN_TOKEN }
                    }))
                } else {
                    Json(json!({ "status": false, "message": "Invalid credentials" }))
                }
            }),
        )
        .route(
            "/products",
            post(|headers: HeaderMap| async move {
                if !is_admin(&headers) {
                    return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
                }
                Json(json!({
                    "status": 200,
                    "data": { "total": 2, "products": sample_products() }
                }))
                .into_response()
            }),
        )
        .route(
            "/products/add",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if !is_admin(&headers) {
                    return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
                }
                Json(json!({
                    "status": true,
                    "message": "Product submitted successfully!",
                    "data": body
                }))
                .into_response()
            }),
        )
        .route(
            "/products/upload",
            post(|headers: HeaderMap| async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "status": true, "data": { "content_type": content_type } }))
            }),
        )
        .route(
            "/products/:id",
            get(|headers: HeaderMap, Path(id): Path<String>| async move {
                if !is_admin(&headers) {
                    return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
                }
                match sample_products()
                    .as_array()
                    .and_then(|all| all.iter().find(|p| p["_id"] == id.as_str()).cloned())
                {
                    Some(product) => Json(json!({ "status": true, "data": product })).into_response(),
                    None => (StatusCode::NOT_FOUND, "not found").into_response(),
                }
            })
            .delete(|headers: HeaderMap| async move {
                if !is_admin(&headers) {
                    return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
                }
                Json(json!({ "status": "success", "message": "Product deleted successfully" }))
                    .into_response()
            }),
        )
}
