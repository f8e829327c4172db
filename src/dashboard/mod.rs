//! 仪表盘渲染
//!
//! Turns a [`MetricsPayload`] into everything the page shows. Aggregation and
//! formatting are free functions so they can be tested without a server.

pub mod aggregation;
pub mod charts;
pub mod formatting;
pub mod html;

pub use aggregation::{
    calendar_day, daily_volume_trend, sort_tvl_desc, sort_volume_desc, summarize, table_rows,
    DayBucket, SummaryTotals,
};
pub use charts::{trend_chart, tvl_chart, volume_chart, ChartData, ChartDataset, ColorSpec};
pub use formatting::{format_count, format_number, format_share};
pub use html::render_page;

use crate::config::DEFAULT_TABLE_ROWS;
use crate::types::{ChainVolume, MetricsPayload, ProtocolSnapshot, ProtocolTvl};

/// Derived, display-ready form of one payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub summary: SummaryTotals,
    pub tvl_series: Vec<ProtocolTvl>,
    pub volume_series: Vec<ChainVolume>,
    pub trend: Vec<DayBucket>,
    pub table: Vec<ProtocolSnapshot>,
}

impl DashboardView {
    pub fn from_payload(payload: &MetricsPayload) -> Self {
        Self::with_table_rows(payload, DEFAULT_TABLE_ROWS)
    }

    pub fn with_table_rows(payload: &MetricsPayload, table_limit: usize) -> Self {
        Self {
            summary: summarize(
                &payload.tvl_by_protocol,
                &payload.volume_by_chain,
                &payload.metrics,
            ),
            tvl_series: sort_tvl_desc(&payload.tvl_by_protocol),
            volume_series: sort_volume_desc(&payload.volume_by_chain),
            trend: daily_volume_trend(&payload.metrics),
            table: table_rows(&payload.metrics, table_limit).to_vec(),
        }
    }

    pub fn tvl_chart(&self) -> ChartData {
        tvl_chart(&self.tvl_series)
    }

    pub fn volume_chart(&self) -> ChartData {
        volume_chart(&self.volume_series, self.summary.total_volume)
    }

    pub fn trend_chart(&self) -> ChartData {
        trend_chart(&self.trend)
    }
}

/// The three mutually exclusive things the page can show.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Error(String),
    Loaded(Box<DashboardView>),
}

impl DashboardState {
    pub fn loaded(view: DashboardView) -> Self {
        Self::Loaded(Box::new(view))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}
