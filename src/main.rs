use admin_panel::server::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ADMIN_API_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = admin_panel::config::config();
    tracing::info!("Starting Admin Panel in {:?} mode", config.environment);
    tracing::info!("Admin API: {}", config.api.admin_base_url);

    let state = AppState::from_config(config)?;
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("ADMIN_PANEL_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Admin Panel listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
