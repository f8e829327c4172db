//! 仪表盘数据聚合
//!
//! Pure reductions over the `/api/metrics` payload: summary totals, ranked
//! chart series and the daily volume trend. Nothing here touches I/O.

use crate::types::{ChainVolume, ProtocolSnapshot, ProtocolTvl};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub total_tvl: f64,
    pub total_volume: f64,
    pub total_users: i64,
}

pub fn summarize(
    tvl_by_protocol: &[ProtocolTvl],
    volume_by_chain: &[ChainVolume],
    snapshots: &[ProtocolSnapshot],
) -> SummaryTotals {
    SummaryTotals {
        total_tvl: tvl_by_protocol.iter().map(|row| row.tvl).sum(),
        total_volume: volume_by_chain.iter().map(|row| row.volume).sum(),
        total_users: snapshots
            .iter()
            .fold(0i64, |acc, row| acc.saturating_add(row.active_users)),
    }
}

/// Highest TVL first. Equal values keep their input order.
pub fn sort_tvl_desc(rows: &[ProtocolTvl]) -> Vec<ProtocolTvl> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.tvl.total_cmp(&a.tvl));
    sorted
}

/// Highest volume first. Equal values keep their input order.
pub fn sort_volume_desc(rows: &[ChainVolume]) -> Vec<ChainVolume> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.volume.total_cmp(&a.volume));
    sorted
}

/// Volume merged across every snapshot that falls on the same calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub month: u32,
    pub day: u32,
    pub volume: f64,
    pub count: usize,
}

impl DayBucket {
    /// `"M/D"`, without zero padding
    pub fn label(&self) -> String {
        format!("{}/{}", self.month, self.day)
    }
}

/// Buckets snapshots by (month, day) and sums their daily volume.
///
/// The year is deliberately not part of the key: snapshots from the same
/// day of different years land in one bucket. Buckets come back ordered by
/// month, then day. Snapshots whose timestamp cannot be parsed are skipped.
pub fn daily_volume_trend(snapshots: &[ProtocolSnapshot]) -> Vec<DayBucket> {
    let mut buckets: BTreeMap<(u32, u32), (f64, usize)> = BTreeMap::new();

    for snapshot in snapshots {
        let Some(key) = calendar_day(&snapshot.timestamp) else {
            tracing::debug!(
                "Skipping snapshot {} with unparseable timestamp {:?}",
                snapshot.id,
                snapshot.timestamp
            );
            continue;
        };

        let entry = buckets.entry(key).or_insert((0.0, 0));
        entry.0 += snapshot.daily_volume_usd;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((month, day), (volume, count))| DayBucket {
            month,
            day,
            volume,
            count,
        })
        .collect()
}

/// Extracts (month, day) from an ISO-8601 timestamp, in the timestamp's own offset.
pub fn calendar_day(timestamp: &str) -> Option<(u32, u32)> {
    let timestamp = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some((dt.month(), dt.day()));
    }

    // %#z takes `Z`, `+hh`, `+hhmm` and `+hh:mm`
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f%#z",
        "%Y-%m-%d %H:%M:%S%.f%#z",
        "%Y-%m-%dT%H:%M%#z",
    ] {
        if let Ok(dt) = DateTime::parse_from_str(timestamp, format) {
            return Some((dt.month(), dt.day()));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, format) {
            return Some((dt.month(), dt.day()));
        }
    }

    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .map(|d| (d.month(), d.day()))
}

/// The first `limit` snapshots, in the order given.
pub fn table_rows(snapshots: &[ProtocolSnapshot], limit: usize) -> &[ProtocolSnapshot] {
    &snapshots[..snapshots.len().min(limit)]
}
