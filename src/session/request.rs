use std::sync::Mutex;

use axum::http::{header, HeaderMap, HeaderValue};

use super::{find_cookie, Cookie, SessionStore};

/// Cookies of one incoming request, plus the writes a handler made to them.
///
/// Writes shadow the request's own cookies and are emitted as `Set-Cookie`
/// headers on the response.
#[derive(Debug, Default)]
pub struct RequestCookies {
    header: String,
    pending: Mutex<Vec<Cookie>>,
}

impl RequestCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            header,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Writes made during the request, last write per name wins
    pub fn pending(&self) -> Vec<Cookie> {
        self.pending.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Append a `Set-Cookie` header for every pending write
    pub fn apply_to(&self, headers: &mut HeaderMap) {
        for cookie in self.pending() {
            match HeaderValue::from_str(&cookie.to_header_value()) {
                Ok(value) => {
                    headers.append(header::SET_COOKIE, value);
                }
                Err(e) => tracing::error!("Cookie '{}' is not a valid header value: {}", cookie.name, e),
            }
        }
    }

    fn record(&self, cookie: Cookie) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|c| c.name != cookie.name);
            pending.push(cookie);
        }
    }
}

impl SessionStore for RequestCookies {
    fn get(&self, name: &str) -> Option<String> {
        if let Ok(pending) = self.pending.lock() {
            if let Some(cookie) = pending.iter().find(|c| c.name == name) {
                return (!cookie.is_expired() && !cookie.value.is_empty())
                    .then(|| cookie.value.clone());
            }
        }
        find_cookie(&self.header, name).filter(|v| !v.is_empty())
    }

    fn set(&self, cookie: Cookie) {
        self.record(cookie);
    }

    fn clear(&self, name: &str) {
        self.record(Cookie::removal(name));
    }
}
