// handlers/mod.rs - Page handlers, split by guard tier
//
// Public (login pages, /auth/*) and Protected (dashboard, /dashboard/*).
// The route guard middleware decides who reaches which tier; handlers only
// deal with the admin API.
pub mod protected;
pub mod public;

use axum::response::{IntoResponse, Json};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Admin Panel",
            "version": version,
            "description": "Admin panel backend with encrypted session cookies",
            "endpoints": {
                "home": "/ (public)",
                "login": "/auth, /auth/login (public, signed-in users are sent to /dashboard)",
                "dashboard": "/dashboard (protected)",
                "products": "/dashboard/product-list[/:id], /dashboard/product-add (protected)",
                "logout": "/dashboard/logout (protected)",
            }
        }
    }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
