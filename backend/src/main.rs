use anyhow::Context;
use backend::config::Config;
use backend::{app, AppState, HistoryStore};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let store = HistoryStore::with_persistence(&config.history_path)
        .await
        .with_context(|| format!("loading {}", config.history_path.display()))?;
    let app = app(AppState::new(store, &config.static_root));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!("Starting server on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
