// handlers/public/auth/login.rs - POST /auth/login handler

use axum::{
    extract::State,
    response::{Json, Redirect, Response},
};

use crate::auth::{self, LoginRequest};
use crate::error::ApiError;
use crate::middleware::RequestSession;
use crate::server::AppState;

/**
 * POST /auth/login - Exchange admin credentials for a session cookie
 *
 * Expected Input:
 * ```json
 * { "userName": "admin", "password": "secret" }
 * ```
 *
 * On success the encrypted token is set as the session cookie and the
 * browser is sent to the dashboard with `303 See Other`.
 */
pub async fn login(
    State(state): State<AppState>,
    session: RequestSession,
    Json(credentials): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if credentials.user_name.trim().is_empty() || credentials.password.is_empty() {
        return Err(ApiError::bad_request("userName and password are required"));
    }

    auth::login(session.client(), &credentials).await?;

    if !session.client().tokens().is_authenticated() {
        tracing::error!("Login succeeded but the token could not be stored");
        return Err(ApiError::internal_server_error("Failed to store session"));
    }

    Ok(session.respond(Redirect::to(&state.guard.protected_prefix)))
}
