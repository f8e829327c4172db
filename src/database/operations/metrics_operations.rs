use crate::types::{ChainVolume, NewSnapshot, ProtocolSnapshot, ProtocolTvl};
use anyhow::Result;
use sqlx::SqlitePool;
use tracing::debug;

pub struct MetricsOperations;

impl MetricsOperations {
    /// All snapshots, most recent first.
    pub async fn list_snapshots(pool: &SqlitePool) -> Result<Vec<ProtocolSnapshot>> {
        let snapshots = sqlx::query_as::<_, ProtocolSnapshot>(
            r#"
            SELECT id, timestamp, protocol, chain,
                   total_value_locked_usd, daily_volume_usd, active_users, token
            FROM protocol_metrics
            ORDER BY timestamp DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        debug!("Loaded {} protocol snapshots", snapshots.len());
        Ok(snapshots)
    }

    // TOTAL() always yields REAL, unlike SUM() which may yield INTEGER
    pub async fn sum_tvl_by_protocol(pool: &SqlitePool) -> Result<Vec<ProtocolTvl>> {
        let rows = sqlx::query_as::<_, ProtocolTvl>(
            r#"
            SELECT protocol, TOTAL(total_value_locked_usd) AS tvl
            FROM protocol_metrics
            GROUP BY protocol
            "#,
        )
        .fetch_all(pool)
        .await?;

        debug!("Aggregated TVL for {} protocols", rows.len());
        Ok(rows)
    }

    pub async fn sum_volume_by_chain(pool: &SqlitePool) -> Result<Vec<ChainVolume>> {
        let rows = sqlx::query_as::<_, ChainVolume>(
            r#"
            SELECT chain, TOTAL(daily_volume_usd) AS volume
            FROM protocol_metrics
            GROUP BY chain
            "#,
        )
        .fetch_all(pool)
        .await?;

        debug!("Aggregated volume for {} chains", rows.len());
        Ok(rows)
    }

    /// Returns the id assigned to the new row.
    pub async fn insert_snapshot(pool: &SqlitePool, snapshot: &NewSnapshot) -> Result<i64> {
        snapshot.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO protocol_metrics (
                timestamp, protocol, chain,
                total_value_locked_usd, daily_volume_usd, active_users, token
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&snapshot.timestamp)
        .bind(&snapshot.protocol)
        .bind(&snapshot.chain)
        .bind(snapshot.total_value_locked_usd)
        .bind(snapshot.daily_volume_usd)
        .bind(snapshot.active_users)
        .bind(&snapshot.token)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
