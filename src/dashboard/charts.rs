//! Chart.js datasets for the three dashboard charts.

use super::aggregation::DayBucket;
use super::formatting::{format_number, format_share};
use crate::types::{ChainVolume, ProtocolTvl};
use serde::{Deserialize, Serialize};

pub const TVL_LABEL: &str = "Total Value Locked (USD)";
pub const VOLUME_LABEL: &str = "Volume by Chain (USD)";
pub const TREND_LABEL: &str = "Daily Volume Trend";

/// Blue, indigo, purple, pink, red, amber, emerald.
pub const PALETTE: [(u8, u8, u8); 7] = [
    (59, 130, 246),
    (99, 102, 241),
    (139, 92, 246),
    (236, 72, 153),
    (239, 68, 68),
    (245, 158, 11),
    (16, 185, 129),
];

const FILL_ALPHA: f64 = 0.7;
const BORDER_ALPHA: f64 = 1.0;

pub fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> String {
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

/// Chart.js accepts a single colour or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: ColorSpec,
    pub border_color: ColorSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    /// Pre-formatted tooltip line per data point
    pub tooltips: Vec<String>,
}

/// `count` colours cycling through `palette`.
fn cycle_colors(palette: &[(u8, u8, u8)], count: usize, alpha: f64) -> Vec<String> {
    palette
        .iter()
        .cycle()
        .take(count)
        .map(|rgb| rgba(*rgb, alpha))
        .collect()
}

/// Bar chart over TVL series already sorted for display.
pub fn tvl_chart(series: &[ProtocolTvl]) -> ChartData {
    let labels: Vec<String> = series.iter().map(|row| row.protocol.clone()).collect();
    let data: Vec<f64> = series.iter().map(|row| row.tvl).collect();
    let tooltips = series
        .iter()
        .map(|row| format!("{}: {}", row.protocol, format_number(row.tvl)))
        .collect();

    ChartData {
        datasets: vec![ChartDataset {
            label: TVL_LABEL.to_string(),
            background_color: ColorSpec::PerPoint(cycle_colors(&PALETTE, data.len(), FILL_ALPHA)),
            border_color: ColorSpec::PerPoint(cycle_colors(&PALETTE, data.len(), BORDER_ALPHA)),
            border_width: Some(1),
            hover_offset: None,
            tension: None,
            fill: None,
            data,
        }],
        labels,
        tooltips,
    }
}

/// Doughnut over volume series; tooltips carry each chain's share of `total_volume`.
pub fn volume_chart(series: &[ChainVolume], total_volume: f64) -> ChartData {
    let palette: Vec<(u8, u8, u8)> = PALETTE.iter().rev().copied().collect();
    let labels: Vec<String> = series.iter().map(|row| row.chain.clone()).collect();
    let data: Vec<f64> = series.iter().map(|row| row.volume).collect();
    let tooltips = series
        .iter()
        .map(|row| {
            format!(
                "{}: {} ({}%)",
                row.chain,
                format_number(row.volume),
                format_share(row.volume, total_volume)
            )
        })
        .collect();

    ChartData {
        datasets: vec![ChartDataset {
            label: VOLUME_LABEL.to_string(),
            background_color: ColorSpec::PerPoint(cycle_colors(&palette, data.len(), FILL_ALPHA)),
            border_color: ColorSpec::PerPoint(cycle_colors(&palette, data.len(), BORDER_ALPHA)),
            border_width: Some(1),
            hover_offset: Some(15),
            tension: None,
            fill: None,
            data,
        }],
        labels,
        tooltips,
    }
}

pub fn trend_chart(buckets: &[DayBucket]) -> ChartData {
    let blue = PALETTE[0];
    let labels: Vec<String> = buckets.iter().map(DayBucket::label).collect();
    let data: Vec<f64> = buckets.iter().map(|bucket| bucket.volume).collect();
    let tooltips = buckets
        .iter()
        .map(|bucket| format!("Volume: {}", format_number(bucket.volume)))
        .collect();

    ChartData {
        datasets: vec![ChartDataset {
            label: TREND_LABEL.to_string(),
            data,
            background_color: ColorSpec::Single(rgba(blue, 0.2)),
            border_color: ColorSpec::Single(rgba(blue, BORDER_ALPHA)),
            border_width: None,
            hover_offset: None,
            tension: Some(0.4),
            fill: Some(true),
        }],
        labels,
        tooltips,
    }
}
