use anyhow::Result;
use sqlx::SqlitePool;

pub struct SystemOperations;

impl SystemOperations {
    /// 幂等建表，可在每次启动时调用
    pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS protocol_metrics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                protocol TEXT NOT NULL,
                chain TEXT NOT NULL,
                total_value_locked_usd REAL NOT NULL,
                daily_volume_usd REAL NOT NULL,
                active_users INTEGER NOT NULL,
                token TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
