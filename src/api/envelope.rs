use serde::{Deserialize, Serialize};

/// `status` as the admin API reports it: sometimes a flag, sometimes a code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusFlag {
    Flag(bool),
    Code(u16),
    Text(String),
}

impl StatusFlag {
    pub fn is_ok(&self) -> bool {
        match self {
            StatusFlag::Flag(ok) => *ok,
            StatusFlag::Code(code) => (200..300).contains(code),
            StatusFlag::Text(text) => matches!(text.as_str(), "ok" | "success" | "true"),
        }
    }
}

impl Default for StatusFlag {
    fn default() -> Self {
        StatusFlag::Flag(false)
    }
}

/// Response wrapper used by every admin API endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: StatusFlag,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().filter(|m| !m.is_empty()).unwrap_or(fallback)
    }
}
