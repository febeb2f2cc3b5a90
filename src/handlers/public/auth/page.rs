// handlers/public/auth/page.rs - GET /auth handler

use axum::response::Json;
use serde_json::{json, Value};

/// Describes the login form; rendering is left to the frontend
pub async fn login_page() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "title": "Welcome Back",
            "subtitle": "Admin portal access only",
            "form": {
                "action": "/auth/login",
                "method": "POST",
                "fields": ["userName", "password"],
            }
        }
    }))
}
