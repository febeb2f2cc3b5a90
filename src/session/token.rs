use std::sync::Arc;

use chrono::{Duration, Utc};

use super::{Cookie, SameSite, SessionStore};
use crate::config::SessionConfig;
use crate::crypto::TokenCipher;

/// A full navigation the caller must perform; the current page state is gone.
#[must_use = "logout is only complete once the client is sent to the login route"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardRedirect {
    pub location: String,
}

/// Encrypted auth token kept in the session cookie
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn SessionStore>,
    cipher: Arc<dyn TokenCipher>,
    config: SessionConfig,
}

impl TokenStore {
    pub fn new(
        store: Arc<dyn SessionStore>,
        cipher: Arc<dyn TokenCipher>,
        config: SessionConfig,
    ) -> Self {
        Self { store, cipher, config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.token_title
    }

    /// Encrypt and store `raw_token`. Does nothing if encryption yields nothing.
    pub fn set_token(&self, raw_token: &str) {
        let envelope = match self.cipher.encrypt(raw_token) {
            Ok(envelope) if !envelope.is_empty() => envelope,
            Ok(_) => return,
            Err(e) => {
                tracing::debug!("Token not stored: {}", e);
                return;
            }
        };

        let cookie = Cookie::new(&self.config.token_title, envelope)
            .expires(Utc::now() + Duration::hours(self.config.ttl_hours))
            .secure(self.config.secure)
            .same_site(SameSite::Strict);

        self.store.set(cookie);
    }

    /// Decrypted token, or `None` when there is no usable session
    pub fn get_token(&self) -> Option<String> {
        let envelope = self.store.get(&self.config.token_title)?;

        match self.cipher.decrypt(&envelope) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!("Failed to decrypt token: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// Drop the session cookie and send the client back to the login route
    pub fn remove_token(&self) -> HardRedirect {
        self.store.clear(&self.config.token_title);
        tracing::info!("Session cleared, redirecting to {}", self.config.login_route);
        HardRedirect {
            location: self.config.login_route.clone(),
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("cookie", &self.config.token_title)
            .finish_non_exhaustive()
    }
}
