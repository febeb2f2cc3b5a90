use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl From<SameSite> for cookie::SameSite {
    fn from(same_site: SameSite) -> Self {
        match same_site {
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::None => cookie::SameSite::None,
        }
    }
}

/// A cookie as written by the token store.
///
/// Kept as a plain record so the file store can persist it; anything that
/// goes over the wire is rendered through [`cookie::Cookie`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            secure: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }

    pub fn expires(mut self, at: DateTime<Utc>) -> Self {
        self.expires = Some(at);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// A cookie that instructs the client to drop `name`
    pub fn removal(name: impl Into<String>) -> Self {
        Self::new(name, "").expires(Utc.timestamp_opt(0, 0).single().unwrap_or_default())
    }

    pub fn is_removal(&self) -> bool {
        self.value.is_empty() && self.is_expired()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.map(|at| at <= now).unwrap_or(false)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn to_cookie(&self) -> cookie::Cookie<'static> {
        let mut out = cookie::Cookie::build((self.name.clone(), self.value.clone()))
            .path(self.path.clone())
            .secure(self.secure)
            .same_site(self.same_site.into())
            .build();

        if self.is_removal() {
            out.make_removal();
        } else if let Some(at) = self
            .expires
            .and_then(|at| time::OffsetDateTime::from_unix_timestamp(at.timestamp()).ok())
        {
            out.set_expires(at);
        }
        out
    }

    /// Render as a `Set-Cookie` header value
    pub fn to_header_value(&self) -> String {
        self.to_cookie().to_string()
    }
}

/// Find the value of cookie `name` in a `Cookie` request header
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    cookie::Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}
