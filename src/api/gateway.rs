use reqwest::header::AUTHORIZATION;
use reqwest::{multipart, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::session::TokenStore;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{method} {url} returned an unreadable body: {source}")]
    Decode {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GatewayError {
    /// Upstream status code, when the server answered at all
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// HTTP client for the remote admin API.
///
/// Every call except [`ApiClient::post_no_token`] carries the current
/// session token as its `Authorization` header.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, tokens: TokenStore) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            tokens,
            log_requests: false,
        }
    }

    /// Client pointed at the configured admin API
    pub fn from_config(http: reqwest::Client, tokens: TokenStore) -> Self {
        let api = &crate::config::config().api;
        Self::new(http, api.admin_base_url.clone(), tokens)
            .with_request_logging(api.enable_request_logging)
    }

    /// Log method and URL of every call at debug level
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, GatewayError> {
        self.send(Method::GET, endpoint, |req| req).await
    }

    pub async fn post<T, P>(&self, endpoint: &str, payload: &P) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.send(Method::POST, endpoint, |req| req.json(payload)).await
    }

    pub async fn put<T, P>(&self, endpoint: &str, payload: &P) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.send(Method::PUT, endpoint, |req| req.json(payload)).await
    }

    pub async fn patch<T, P>(&self, endpoint: &str, payload: &P) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.send(Method::PATCH, endpoint, |req| req.json(payload)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, GatewayError> {
        self.send(Method::DELETE, endpoint, |req| req).await
    }

    /// Multipart upload; the client sets `multipart/form-data` with its boundary
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: multipart::Form,
    ) -> Result<T, GatewayError> {
        self.send(Method::POST, endpoint, |req| req.multipart(form)).await
    }

    /// Unauthenticated POST used for login. Failures are logged and yield `None`.
    pub async fn post_no_token<T, P>(&self, endpoint: &str, payload: &P) -> Option<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        let request = self.http.request(Method::POST, &url).json(payload);
        match self.execute(Method::POST, url, request).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!("{}", e);
                None
            }
        }
    }

    async fn send<T, F>(&self, method: Method, endpoint: &str, build: F) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(endpoint);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = self.tokens.get_token() {
            request = request.header(AUTHORIZATION, token);
        }

        self.execute(method.clone(), url, build(request))
            .await
            .map_err(|e| {
                tracing::error!("{} request failed: {}", method, e);
                e
            })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        if self.log_requests {
            tracing::debug!("{} {}", method, url);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => return Err(GatewayError::Transport { method, url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status { method, url, status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| GatewayError::Decode { method, url, source })
    }
}
