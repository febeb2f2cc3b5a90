// handlers/protected/dashboard.rs - GET /dashboard, POST /dashboard/logout

use axum::{
    extract::Extension,
    response::{Redirect, Response},
};
use serde_json::{json, Value};

use crate::auth;
use crate::guard::AuthState;
use crate::middleware::{ApiResponse, RequestSession};

pub async fn overview(auth_state: Option<Extension<AuthState>>) -> ApiResponse<Value> {
    let authenticated = matches!(auth_state, Some(Extension(AuthState::Authenticated)));

    ApiResponse::success(json!({
        "authenticated": authenticated,
        "sections": [
            {
                "title": "Products",
                "items": [
                    { "title": "Product List", "href": "/dashboard/product-list" },
                    { "title": "Add Product", "href": "/dashboard/product-add" },
                ]
            }
        ],
        "logout": "/dashboard/logout",
    }))
}

/// Clears the session cookie and sends the browser to the login page
pub async fn logout(session: RequestSession) -> Response {
    let redirect = auth::logout(session.client());
    let location = redirect.location.clone();
    session.respond(Redirect::to(&location))
}
