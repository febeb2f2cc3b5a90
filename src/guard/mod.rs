//! Per-navigation authorization decisions.
//!
//! Nothing here touches HTTP types: a path and the raw cookie value go in,
//! an allow/redirect decision comes out. The axum wiring lives in
//! `middleware::guard`.

use crate::config::GuardConfig;
use crate::crypto::TokenCipher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Never evaluated (API routes, static assets, crawler files)
    Excluded,
    Protected,
    PublicAuth,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo(String),
}

impl AuthState {
    /// Authenticated only if the cookie is present and decrypts to a token
    pub fn from_cookie(cookie: Option<&str>, cipher: &dyn TokenCipher) -> Self {
        match cookie {
            Some(envelope) if !envelope.is_empty() => match cipher.decrypt(envelope) {
                Ok(token) if !token.is_empty() => AuthState::Authenticated,
                Ok(_) => AuthState::Unauthenticated,
                Err(e) => {
                    tracing::debug!("Session cookie rejected: {}", e);
                    AuthState::Unauthenticated
                }
            },
            _ => AuthState::Unauthenticated,
        }
    }
}

pub fn classify(path: &str, config: &GuardConfig) -> RouteClass {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if config.excluded.iter().any(|prefix| rest.starts_with(prefix.as_str())) {
        return RouteClass::Excluded;
    }
    if path.starts_with(&config.protected_prefix) {
        RouteClass::Protected
    } else if path.starts_with(&config.public_prefix) {
        RouteClass::PublicAuth
    } else {
        RouteClass::Other
    }
}

pub fn decide(state: AuthState, class: RouteClass, config: &GuardConfig) -> GuardDecision {
    match (state, class) {
        (AuthState::Unauthenticated, RouteClass::Protected) => {
            GuardDecision::RedirectTo(config.public_prefix.clone())
        }
        (AuthState::Authenticated, RouteClass::PublicAuth) => {
            GuardDecision::RedirectTo(config.protected_prefix.clone())
        }
        _ => GuardDecision::Allow,
    }
}

/// Result of guarding one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub class: RouteClass,
    /// `None` for excluded paths, whose cookie is never read
    pub state: Option<AuthState>,
    pub decision: GuardDecision,
}

/// Classify `path`, derive the auth state from `cookie` and decide.
/// Excluded paths are allowed without looking at the cookie.
pub fn evaluate(
    path: &str,
    cookie: Option<&str>,
    cipher: &dyn TokenCipher,
    config: &GuardConfig,
) -> Evaluation {
    let class = classify(path, config);
    if class == RouteClass::Excluded {
        return Evaluation {
            class,
            state: None,
            decision: GuardDecision::Allow,
        };
    }

    let state = AuthState::from_cookie(cookie, cipher);
    Evaluation {
        class,
        state: Some(state),
        decision: decide(state, class, config),
    }
}
