use std::collections::HashMap;
use std::sync::Mutex;

use super::{Cookie, SessionStore};

/// In-process cookie jar
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    cookies: Mutex<HashMap<String, Cookie>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full cookie as stored, including attributes
    pub fn cookie(&self, name: &str) -> Option<Cookie> {
        self.cookies.lock().ok()?.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.cookies.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, name: &str) -> Option<String> {
        let mut cookies = self.cookies.lock().ok()?;
        match cookies.get(name) {
            Some(cookie) if cookie.is_expired() => {
                cookies.remove(name);
                None
            }
            Some(cookie) => Some(cookie.value.clone()),
            None => None,
        }
    }

    fn set(&self, cookie: Cookie) {
        if let Ok(mut cookies) = self.cookies.lock() {
            cookies.insert(cookie.name.clone(), cookie);
        }
    }

    fn clear(&self, name: &str) {
        if let Ok(mut cookies) = self.cookies.lock() {
            cookies.remove(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_set_get_clear() {
        let store = MemorySessionStore::new();
        assert!(store.is_empty());

        store.set(Cookie::new("admin_token", "v1"));
        assert_eq!(store.get("admin_token").as_deref(), Some("v1"));

        store.set(Cookie::new("admin_token", "v2"));
        assert_eq!(store.get("admin_token").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.clear("admin_token");
        assert_eq!(store.get("admin_token"), None);
    }

    #[test]
    fn test_expired_cookie_is_dropped() {
        let store = MemorySessionStore::new();
        store.set(Cookie::new("admin_token", "old").expires(Utc::now() - Duration::minutes(1)));
        assert_eq!(store.get("admin_token"), None);
        assert!(store.is_empty());
    }
}
