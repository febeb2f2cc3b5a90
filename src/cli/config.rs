use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::crypto::StaticKeyCipher;
use crate::session::{FileSessionStore, TokenStore};

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("ADMIN_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("admin-panel").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Token store backed by the CLI's cookie file
pub fn token_store() -> anyhow::Result<TokenStore> {
    let config = crate::config::config();
    let store = FileSessionStore::in_dir(&get_config_dir()?);
    tracing::debug!("Using cookie file {}", store.path().display());

    Ok(TokenStore::new(
        Arc::new(store),
        Arc::new(StaticKeyCipher::from_config()),
        config.session.clone(),
    ))
}

/// Admin API client carrying the CLI's stored session
pub fn api_client() -> anyhow::Result<ApiClient> {
    let config = crate::config::config();
    config.admin_base_url()?;

    let http = reqwest::Client::builder()
        .user_agent(concat!("admin-cli/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(ApiClient::from_config(http, token_store()?))
}
