use clap::Parser;
use mtword::app::{Services, router};
use mtword::config::Config;
use mtword::provider::client::EsvClient;
use mtword::storage::memory::Database;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    if config.api_key.is_empty() {
        tracing::warn!("API_KEY is not set, passage lookups will be rejected by the provider");
    }

    // 1. Storage and external services:
    let db = Arc::new(Database::new());
    let provider = Arc::new(EsvClient::new(&config.api_url, &config.api_key));
    let services = Services::new(db, provider, config.search_index());

    // 2. Administrator account:
    if let Some(username) = &config.admin {
        let admin = services.ensure_admin(username)?;
        tracing::info!("Administrator {} has id {}", admin.username, admin.id);
    }

    // 3. HTTP server:
    let app = router(&services);

    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
