//! Loads a JSON array of snapshots into the metrics database.
//!
//! Usage: `seed-metrics <snapshots.json>` (or set `SEED_FILE`).

use anyhow::{Context, Result};
use defi_dashboard::config::{required_env_var, Config};
use defi_dashboard::database::Database;
use defi_dashboard::types::NewSnapshot;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt().with_max_level(config.max_level()).init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => required_env_var("SEED_FILE")?,
    };

    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("读取 {} 失败", path))?;
    let snapshots: Vec<NewSnapshot> =
        serde_json::from_str(&raw).with_context(|| format!("解析 {} 失败", path))?;

    let database = Database::open(&config.database.url).await?;
    database.create_tables().await?;

    let mut inserted = 0usize;
    for snapshot in &snapshots {
        match database.insert_snapshot(snapshot).await {
            Ok(_) => inserted += 1,
            Err(e) => warn!(
                "Skipping {} snapshot at {}: {}",
                snapshot.protocol, snapshot.timestamp, e
            ),
        }
    }

    info!("✅ 导入 {}/{} 条快照", inserted, snapshots.len());
    database.close().await;
    Ok(())
}
