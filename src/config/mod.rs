use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Secret used when neither the build nor the environment provides one.
pub const FALLBACK_SECRET_KEY: &str = "admin-panel-development-secret";

/// Secret baked in at compile time, if the build environment set one.
const EMBEDDED_SECRET_KEY: Option<&str> = option_env!("ADMIN_PANEL_SECRET_KEY");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub guard: GuardConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin (and path prefix) of the remote admin API
    pub admin_base_url: String,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the encrypted token
    pub token_title: String,
    pub ttl_hours: i64,
    pub secure: bool,
    /// Where a logout sends the browser
    pub login_route: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    pub protected_prefix: String,
    pub public_prefix: String,
    /// Path prefixes (without the leading slash) the guard never evaluates
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub secret_key: String,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides();

        if config.environment == Environment::Production && config.uses_fallback_secret() {
            tracing::warn!("Running in production with the fallback secret key; set SECRET_KEY");
        }

        config
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("ADMIN_API_URL") {
            self.api.admin_base_url = v;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_TOKEN_TITLE") {
            if !v.trim().is_empty() {
                self.session.token_title = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("SESSION_TTL_HOURS") {
            self.session.ttl_hours = v.parse().unwrap_or(self.session.ttl_hours);
        }
        if let Ok(v) = env::var("SESSION_COOKIE_SECURE") {
            self.session.secure = v.parse().unwrap_or(self.session.secure);
        }
        if let Ok(v) = env::var("SESSION_LOGIN_ROUTE") {
            self.session.login_route = v;
        }

        // Guard overrides
        if let Ok(v) = env::var("GUARD_PROTECTED_PREFIX") {
            self.guard.protected_prefix = v;
        }
        if let Ok(v) = env::var("GUARD_PUBLIC_PREFIX") {
            self.guard.public_prefix = v;
        }

        // Security overrides
        if let Ok(v) = env::var("SECRET_KEY") {
            if !v.is_empty() {
                self.security.secret_key = v;
            }
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    /// True when no real secret was supplied at build or run time
    pub fn uses_fallback_secret(&self) -> bool {
        self.security.secret_key == FALLBACK_SECRET_KEY
    }

    /// Validate the admin API base URL, returning it parsed
    pub fn admin_base_url(&self) -> anyhow::Result<url::Url> {
        url::Url::parse(&self.api.admin_base_url).map_err(|e| {
            anyhow::anyhow!("Invalid ADMIN_API_URL '{}': {}", self.api.admin_base_url, e)
        })
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                admin_base_url: "http://localhost:8000/api/admin".to_string(),
                enable_request_logging: true,
            },
            session: SessionConfig::default(),
            guard: GuardConfig::default(),
            security: SecurityConfig {
                secret_key: default_secret(),
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                admin_base_url: "https://staging.example.com/api/admin".to_string(),
                enable_request_logging: true,
            },
            session: SessionConfig::default(),
            guard: GuardConfig::default(),
            security: SecurityConfig {
                secret_key: default_secret(),
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                admin_base_url: "https://api.example.com/api/admin".to_string(),
                enable_request_logging: false,
            },
            session: SessionConfig::default(),
            guard: GuardConfig::default(),
            security: SecurityConfig {
                secret_key: default_secret(),
                enable_cors: false,
                cors_origins: vec!["https://admin.example.com".to_string()],
            },
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_title: "admin_token".to_string(),
            ttl_hours: 24,
            secure: true,
            login_route: "/auth".to_string(),
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protected_prefix: "/dashboard".to_string(),
            public_prefix: "/auth".to_string(),
            excluded: [
                "api",
                "_next/static",
                "_next/image",
                "favicon.ico",
                "sitemap.xml",
                "robots.txt",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

fn default_secret() -> String {
    EMBEDDED_SECRET_KEY
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_SECRET_KEY)
        .to_string()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
