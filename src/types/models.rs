// ProtocolSnapshot, NewSnapshot, ProtocolTvl, ChainVolume
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One timestamped observation of a protocol's metrics.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProtocolSnapshot {
    pub id: i64,
    /// ISO-8601, stored verbatim
    pub timestamp: String,
    pub protocol: String,
    pub chain: String,
    pub total_value_locked_usd: f64,
    pub daily_volume_usd: f64,
    pub active_users: i64,
    pub token: String,
}

/// Snapshot as handed to the store before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSnapshot {
    pub timestamp: String,
    pub protocol: String,
    pub chain: String,
    pub total_value_locked_usd: f64,
    pub daily_volume_usd: f64,
    pub active_users: i64,
    pub token: String,
}

impl NewSnapshot {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.total_value_locked_usd < 0.0 || !self.total_value_locked_usd.is_finite() {
            return Err(anyhow::anyhow!(
                "total_value_locked_usd must be a finite value >= 0, got {}",
                self.total_value_locked_usd
            ));
        }
        if self.daily_volume_usd < 0.0 || !self.daily_volume_usd.is_finite() {
            return Err(anyhow::anyhow!(
                "daily_volume_usd must be a finite value >= 0, got {}",
                self.daily_volume_usd
            ));
        }
        if self.active_users < 0 {
            return Err(anyhow::anyhow!(
                "active_users must be >= 0, got {}",
                self.active_users
            ));
        }
        Ok(())
    }
}

// 按协议汇总的TVL
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProtocolTvl {
    pub protocol: String,
    pub tvl: f64,
}

// 按链汇总的交易量
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ChainVolume {
    pub chain: String,
    pub volume: f64,
}
