use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{Cookie, SessionStore};

/// Cookie jar persisted as pretty JSON, used by the CLI between invocations
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at `<dir>/cookies.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("cookies.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> anyhow::Result<HashMap<String, Cookie>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, cookies: &HashMap<String, Cookie>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(cookies)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut HashMap<String, Cookie>)) {
        let _guard = self.lock.lock();
        let mut cookies = match self.load() {
            Ok(cookies) => cookies,
            Err(e) => {
                tracing::warn!("Discarding unreadable cookie file {}: {}", self.path.display(), e);
                HashMap::new()
            }
        };
        apply(&mut cookies);
        if let Err(e) = self.save(&cookies) {
            tracing::error!("Failed to write cookie file {}: {}", self.path.display(), e);
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, name: &str) -> Option<String> {
        let _guard = self.lock.lock();
        let cookies = match self.load() {
            Ok(cookies) => cookies,
            Err(e) => {
                tracing::warn!("Failed to read cookie file {}: {}", self.path.display(), e);
                return None;
            }
        };
        cookies
            .get(name)
            .filter(|cookie| !cookie.is_expired())
            .map(|cookie| cookie.value.clone())
    }

    fn set(&self, cookie: Cookie) {
        self.update(|cookies| {
            cookies.retain(|_, c| !c.is_expired());
            cookies.insert(cookie.name.clone(), cookie);
        });
    }

    fn clear(&self, name: &str) {
        self.update(|cookies| {
            cookies.remove(name);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_cookies_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::in_dir(dir.path());
        store.set(Cookie::new("admin_token", "persisted"));

        let reopened = FileSessionStore::in_dir(dir.path());
        assert_eq!(reopened.get("admin_token").as_deref(), Some("persisted"));

        reopened.clear("admin_token");
        assert_eq!(store.get("admin_token"), None);
    }

    #[test]
    fn test_missing_and_corrupt_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("jar.json"));
        assert_eq!(store.get("admin_token"), None);

        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.get("admin_token"), None);

        store.set(Cookie::new("admin_token", "fresh"));
        assert_eq!(store.get("admin_token").as_deref(), Some("fresh"));
    }

    #[test]
    fn test_expired_cookie_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::in_dir(dir.path());
        store.set(Cookie::new("admin_token", "stale").expires(Utc::now() - Duration::seconds(5)));
        assert_eq!(store.get("admin_token"), None);
    }
}
