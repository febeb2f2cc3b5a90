//! Cookie-backed session state.
//!
//! Everything that reads or writes the session cookie goes through a
//! [`SessionStore`]: an in-memory store for tests and embedding, a JSON file
//! store for the CLI, and a per-request store for HTTP handlers.

pub mod cookie;
pub mod file;
pub mod memory;
pub mod request;
pub mod token;

pub use self::cookie::{find_cookie, Cookie, SameSite};
pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use request::RequestCookies;
pub use token::{HardRedirect, TokenStore};

/// Storage for named cookies
pub trait SessionStore: Send + Sync {
    /// Value of a live cookie, if one is stored
    fn get(&self, name: &str) -> Option<String>;

    fn set(&self, cookie: Cookie);

    fn clear(&self, name: &str);
}
