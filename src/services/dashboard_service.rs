use crate::{
    config::Config,
    dashboard::{render_page, DashboardState, DashboardView},
    types::{ErrorResponse, MetricsPayload},
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info};

/// HTTP client for `GET /api/metrics`.
#[derive(Clone)]
pub struct MetricsClient {
    http: reqwest::Client,
    base_url: String,
}

impl MetricsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn metrics_url(&self) -> String {
        format!("{}/api/metrics", self.base_url)
    }

    /// One request, no retry. Non-2xx responses and undecodable bodies are errors.
    pub async fn fetch_payload(&self) -> Result<MetricsPayload> {
        let url = self.metrics_url();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("请求 {} 失败", url))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "no error body".to_string());
            return Err(anyhow::anyhow!("{} returned {}: {}", url, status, reason));
        }

        response
            .json::<MetricsPayload>()
            .await
            .with_context(|| format!("解析 {} 响应失败", url))
    }

    /// Fetches once and maps the outcome onto the page state.
    pub async fn fetch_state(&self, table_rows: usize) -> DashboardState {
        match self.fetch_payload().await {
            Ok(payload) => DashboardState::loaded(DashboardView::with_table_rows(&payload, table_rows)),
            Err(e) => {
                error!("Error fetching data: {:#}", e);
                DashboardState::Error(format!("{:#}", e))
            }
        }
    }
}

/// Fetches the metrics once and writes the rendered page to disk.
pub struct DashboardService {
    client: MetricsClient,
    output_path: PathBuf,
    table_rows: usize,
}

impl DashboardService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: MetricsClient::new(config.dashboard.api_url.clone()),
            output_path: PathBuf::from(&config.dashboard.output_path),
            table_rows: config.dashboard.table_rows,
        }
    }

    /// Writes the loading page, fetches once, then overwrites it with the
    /// loaded or error page. Returns the final state.
    pub async fn render_once(&self) -> Result<DashboardState> {
        self.write_page(&DashboardState::Loading).await?;
        info!("📊 获取仪表盘数据: {}", self.client.metrics_url());

        let state = self.client.fetch_state(self.table_rows).await;
        self.write_page(&state).await?;

        if let DashboardState::Loaded(view) = &state {
            info!(
                "Dashboard written to {} (TVL {}, volume {}, users {})",
                self.output_path.display(),
                crate::dashboard::format_number(view.summary.total_tvl),
                crate::dashboard::format_number(view.summary.total_volume),
                crate::dashboard::format_count(view.summary.total_users),
            );
        } else {
            info!("Error page written to {}", self.output_path.display());
        }

        Ok(state)
    }

    async fn write_page(&self, state: &DashboardState) -> Result<()> {
        tokio::fs::write(&self.output_path, render_page(state))
            .await
            .with_context(|| format!("写入 {} 失败", self.output_path.display()))
    }
}
