//! Login and logout against the remote admin API.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiEnvelope};
use crate::session::HardRedirect;

/// Endpoint of the credential exchange on the admin API
pub const LOGIN_ENDPOINT: &str = "/login";

const LOGIN_FAILED: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "userName", alias = "username")]
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
    #[error("Login failed. Please try again.")]
    Unavailable,
    #[error("Login response did not include a token")]
    MissingToken,
}

/// Exchange credentials for a token and store it in the session cookie.
/// Returns the API's success message.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<String, AuthError> {
    let envelope: ApiEnvelope<LoginData> = client
        .post_no_token(LOGIN_ENDPOINT, request)
        .await
        .ok_or(AuthError::Unavailable)?;

    if !envelope.is_ok() {
        tracing::warn!("Login rejected for user '{}'", request.user_name);
        return Err(AuthError::Rejected(envelope.message_or(LOGIN_FAILED).to_string()));
    }

    let token = envelope
        .data
        .as_ref()
        .map(|d| d.token.as_str())
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    client.tokens().set_token(token);
    tracing::info!("User '{}' logged in", request.user_name);

    Ok(envelope.message_or("Login successful").to_string())
}

/// Forget the session and return where the client has to go next
pub fn logout(client: &ApiClient) -> HardRedirect {
    client.tokens().remove_token()
}
