use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};

use crate::api::ApiClient;
use crate::server::AppState;
use crate::session::{RequestCookies, TokenStore};

/// Per-request view of the session: an admin API client whose token store
/// reads the request's cookies and records any cookie writes.
pub struct RequestSession {
    cookies: Arc<RequestCookies>,
    client: ApiClient,
}

impl RequestSession {
    pub fn new(state: &AppState, cookies: RequestCookies) -> Self {
        let cookies = Arc::new(cookies);
        let tokens = TokenStore::new(cookies.clone(), state.cipher.clone(), state.session.clone());
        let client = ApiClient::new(state.http.clone(), state.admin_base_url.clone(), tokens)
            .with_request_logging(state.log_requests);
        Self { cookies, client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Finish the request, attaching `Set-Cookie` for every cookie write
    pub fn respond(self, inner: impl IntoResponse) -> Response {
        let mut response = inner.into_response();
        self.cookies.apply_to(response.headers_mut());
        response
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(RequestSession::new(state, RequestCookies::from_headers(&parts.headers)))
    }
}
