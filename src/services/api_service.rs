use crate::{
    api::{create_router, ApiState},
    config::Config,
    database::{Database, MetricsStore},
};
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub struct ApiService {
    config: Config,
    database: Database,
}

impl ApiService {
    /// Opens the store and makes sure the snapshot table exists.
    pub async fn new(config: Config) -> Result<Self> {
        let database = Database::open(&config.database.url).await?;
        database.create_tables().await?;
        info!("Database connected and tables created");

        Ok(Self { config, database })
    }

    /// Serves until Ctrl-C, then closes the store.
    pub async fn start(self) -> Result<()> {
        info!("🚀 启动API服务...");

        let listener = TcpListener::bind(self.config.bind_address()).await?;
        info!("API Server starting on {}", listener.local_addr()?);

        let result = serve(listener, Arc::new(self.database.clone()), shutdown_signal()).await;

        self.database.close().await;
        result
    }
}

/// Serves the router on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, store: Arc<dyn MetricsStore>, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = create_router(ApiState::new(store));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
