use anyhow::Result;
use defi_dashboard::config::Config;
use defi_dashboard::dashboard::DashboardState;
use defi_dashboard::services::DashboardService;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt().with_max_level(config.max_level()).init();

    info!("🔧 渲染仪表盘...");

    let service = DashboardService::new(&config);
    if let DashboardState::Error(reason) = service.render_once().await? {
        return Err(anyhow::anyhow!("Failed to load dashboard data: {}", reason));
    }
    Ok(())
}
