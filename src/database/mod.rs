pub mod operations;

use crate::types::*;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub use operations::*;

/// Read side of the snapshot table, as seen by the HTTP layer.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    async fn list_snapshots(&self) -> Result<Vec<ProtocolSnapshot>>;
    async fn sum_tvl_by_protocol(&self) -> Result<Vec<ProtocolTvl>>;
    async fn sum_volume_by_chain(&self) -> Result<Vec<ChainVolume>>;
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the database file, creating it if absent. A single connection
    /// is held for the lifetime of the handle.
    pub async fn open(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        info!("Opened metrics database at {}", url);
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn create_tables(&self) -> Result<()> {
        SystemOperations::create_tables(&self.pool).await
    }

    pub async fn insert_snapshot(&self, snapshot: &NewSnapshot) -> Result<i64> {
        MetricsOperations::insert_snapshot(&self.pool, snapshot).await
    }

    pub async fn close(self) {
        self.pool.close().await;
        info!("Metrics database closed");
    }
}

#[async_trait]
impl MetricsStore for Database {
    async fn list_snapshots(&self) -> Result<Vec<ProtocolSnapshot>> {
        MetricsOperations::list_snapshots(&self.pool).await
    }

    async fn sum_tvl_by_protocol(&self) -> Result<Vec<ProtocolTvl>> {
        MetricsOperations::sum_tvl_by_protocol(&self.pool).await
    }

    async fn sum_volume_by_chain(&self) -> Result<Vec<ChainVolume>> {
        MetricsOperations::sum_volume_by_chain(&self.pool).await
    }
}

/// Runs the three store reads and assembles the endpoint payload.
/// Any failing read fails the whole payload.
pub async fn load_metrics_payload(store: &dyn MetricsStore) -> Result<MetricsPayload> {
    let metrics = store.list_snapshots().await?;
    let tvl_by_protocol = store.sum_tvl_by_protocol().await?;
    let volume_by_chain = store.sum_volume_by_chain().await?;

    Ok(MetricsPayload {
        metrics,
        tvl_by_protocol,
        volume_by_chain,
    })
}
