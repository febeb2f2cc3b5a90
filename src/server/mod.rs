//! HTTP surface of the admin panel.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, GuardConfig, SessionConfig};
use crate::crypto::{StaticKeyCipher, TokenCipher};
use crate::handlers;
use crate::middleware::route_guard_middleware;

/// Shared state handed to the guard and every handler
#[derive(Clone)]
pub struct AppState {
    pub cipher: Arc<dyn TokenCipher>,
    pub http: reqwest::Client,
    pub admin_base_url: String,
    pub session: SessionConfig,
    pub guard: GuardConfig,
    /// Debug-log every admin API call
    pub log_requests: bool,
    /// Allowed CORS origins; `None` installs no CORS layer, empty is permissive
    pub cors_origins: Option<Vec<String>>,
}

impl AppState {
    pub fn new(cipher: Arc<dyn TokenCipher>, admin_base_url: impl Into<String>) -> Self {
        Self {
            cipher,
            http: reqwest::Client::new(),
            admin_base_url: admin_base_url.into(),
            session: SessionConfig::default(),
            guard: GuardConfig::default(),
            log_requests: false,
            cors_origins: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        config.admin_base_url()?;
        Ok(Self {
            cipher: Arc::new(StaticKeyCipher::new(&config.security.secret_key)),
            http: reqwest::Client::builder()
                .user_agent(concat!("admin-panel/", env!("CARGO_PKG_VERSION")))
                .build()?,
            admin_base_url: config.api.admin_base_url.clone(),
            session: config.session.clone(),
            guard: config.guard.clone(),
            log_requests: config.api.enable_request_logging,
            cors_origins: config
                .security
                .enable_cors
                .then(|| config.security.cors_origins.clone()),
        })
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Login
        .merge(auth_public_routes())
        // Protected dashboard
        .merge(dashboard_routes())
        .layer(middleware::from_fn_with_state(state.clone(), route_guard_middleware))
        .layer(TraceLayer::new_for_http());

    if let Some(origins) = &state.cors_origins {
        router = router.layer(cors_layer(origins));
    }

    router.with_state(state)
}

/// Permissive when no origins are listed, otherwise restricted to the list
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter(|o| !o.is_empty() && o.as_str() != "*")
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/auth", get(auth::login_page))
        .route("/auth/login", post(auth::login))
}

fn dashboard_routes() -> Router<AppState> {
    use handlers::protected::{dashboard, products};

    Router::new()
        .route("/dashboard", get(dashboard::overview))
        .route("/dashboard/logout", post(dashboard::logout))
        .route("/dashboard/product-list", get(products::product_list))
        .route(
            "/dashboard/product-list/:id",
            get(products::product_get).delete(products::product_delete),
        )
        .route("/dashboard/product-add", post(products::product_add))
}
