use anyhow::Result;
use defi_dashboard::config::Config;
use defi_dashboard::services::ApiService;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(config.max_level()).init();
    info!("Configuration loaded successfully");

    // Create and start API service
    let api_service = ApiService::new(config).await?;
    api_service.start().await?;

    Ok(())
}
