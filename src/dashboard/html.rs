//! Self-contained HTML page for each [`DashboardState`].
//!
//! Charts are drawn client-side by Chart.js from the serialized datasets;
//! every number and string shown outside the charts is rendered here.

use super::charts::ChartData;
use super::formatting::{format_count, format_number};
use super::{DashboardState, DashboardView};
use crate::types::ProtocolSnapshot;

pub const PAGE_TITLE: &str = "DeFi Protocol Dashboard";
const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

pub fn render_page(state: &DashboardState) -> String {
    match state {
        DashboardState::Loading => render_loading(),
        DashboardState::Error(_) => render_error(),
        DashboardState::Loaded(view) => render_dashboard(view),
    }
}

fn render_loading() -> String {
    page_shell(
        r#"<div class="center"><div class="spinner"></div><p class="muted">Loading dashboard data...</p></div>"#,
        "",
    )
}

fn render_error() -> String {
    page_shell(
        r#"<div class="center"><div class="card narrow"><h2 class="error">Error Loading Data</h2><p class="muted">Unable to load dashboard data. Please try again later.</p></div></div>"#,
        "",
    )
}

fn render_dashboard(view: &DashboardView) -> String {
    let summary = &view.summary;
    let body = format!(
        r#"<header>
  <h1>{title}</h1>
  <p class="muted">Real-time analytics for decentralized finance protocols</p>
</header>
<section class="cards">
  {tvl_card}
  {volume_card}
  {users_card}
</section>
<nav class="tabs">
  <button class="tab active" data-tab="charts">Charts</button>
  <button class="tab" data-tab="trends">Trends</button>
  <button class="tab" data-tab="data">Raw Data</button>
</nav>
<section class="panel" id="charts">
  <div class="grid">
    <div class="card"><h2>TVL by Protocol</h2><p class="muted">Distribution of Total Value Locked across protocols</p><div class="chart"><canvas id="tvl-chart"></canvas></div></div>
    <div class="card"><h2>Volume by Chain</h2><p class="muted">Trading volume distribution across different blockchains</p><div class="chart"><canvas id="volume-chart"></canvas></div></div>
  </div>
</section>
<section class="panel hidden" id="trends">
  <div class="card"><h2>Volume Trends</h2><p class="muted">Daily trading volume trends across all protocols</p><div class="chart tall"><canvas id="trend-chart"></canvas></div></div>
</section>
<section class="panel hidden" id="data">
  <div class="card"><h2>Raw Protocol Data</h2><p class="muted">Raw data table with all protocol metrics</p>
{table}
  </div>
</section>"#,
        title = PAGE_TITLE,
        tvl_card = summary_card("Total Value Locked", &format_number(summary.total_tvl)),
        volume_card = summary_card("Total Trading Volume", &format_number(summary.total_volume)),
        users_card = summary_card("Active Users", &format_count(summary.total_users)),
        table = render_table(&view.table),
    );

    let script = format!(
        r#"<script src="{cdn}"></script>
<script>
const formatNumber = (n) => {{
  if (n >= 1e9) return "$" + (n / 1e9).toFixed(2) + "B";
  if (n >= 1e6) return "$" + (n / 1e6).toFixed(2) + "M";
  if (n >= 1e3) return "$" + (n / 1e3).toFixed(2) + "K";
  return "$" + Number(n).toFixed(2);
}};
const charts = {{ tvl: {tvl}, volume: {volume}, trend: {trend} }};
const tooltip = (data) => ({{ callbacks: {{ label: (ctx) => data.tooltips[ctx.dataIndex] }} }});
const moneyAxis = {{ y: {{ beginAtZero: true, ticks: {{ callback: (v) => formatNumber(v) }} }} }};
new Chart(document.getElementById("tvl-chart"), {{ type: "bar", data: charts.tvl,
  options: {{ responsive: true, maintainAspectRatio: false, plugins: {{ legend: {{ position: "bottom" }}, tooltip: tooltip(charts.tvl) }}, scales: moneyAxis }} }});
new Chart(document.getElementById("volume-chart"), {{ type: "doughnut", data: charts.volume,
  options: {{ responsive: true, maintainAspectRatio: false, cutout: "60%", radius: "90%", plugins: {{ legend: {{ position: "bottom" }}, tooltip: tooltip(charts.volume) }} }} }});
new Chart(document.getElementById("trend-chart"), {{ type: "line", data: charts.trend,
  options: {{ responsive: true, maintainAspectRatio: false, plugins: {{ legend: {{ position: "top" }}, tooltip: tooltip(charts.trend) }}, scales: moneyAxis }} }});
document.querySelectorAll(".tab").forEach((tab) => tab.addEventListener("click", () => {{
  document.querySelectorAll(".tab").forEach((t) => t.classList.toggle("active", t === tab));
  document.querySelectorAll(".panel").forEach((p) => p.classList.toggle("hidden", p.id !== tab.dataset.tab));
}}));
</script>"#,
        cdn = CHART_JS_CDN,
        tvl = chart_json(&view.tvl_chart()),
        volume = chart_json(&view.volume_chart()),
        trend = chart_json(&view.trend_chart()),
    );

    page_shell(&body, &script)
}

fn summary_card(title: &str, value: &str) -> String {
    format!(
        r#"<div class="card"><h3 class="muted">{}</h3><p class="value">{}</p></div>"#,
        html_escape(title),
        html_escape(value)
    )
}

pub fn render_table(rows: &[ProtocolSnapshot]) -> String {
    let mut body = String::new();
    for (index, row) in rows.iter().enumerate() {
        let stripe = if index % 2 == 0 { "even" } else { "odd" };
        body.push_str(&format!(
            "      <tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            stripe,
            html_escape(&row.protocol),
            html_escape(&row.chain),
            html_escape(&format_number(row.total_value_locked_usd)),
            html_escape(&format_number(row.daily_volume_usd)),
            format_count(row.active_users),
            html_escape(&row.token),
        ));
    }

    format!(
        "  <table>\n    <thead><tr><th>Protocol</th><th>Chain</th><th>TVL</th><th>Volume</th><th>Users</th><th>Token</th></tr></thead>\n    <tbody>\n{}    </tbody>\n  </table>",
        body
    )
}

/// JSON safe to inline inside a `<script>` element.
fn chart_json(chart: &ChartData) -> String {
    match serde_json::to_string(chart) {
        Ok(json) => json.replace('<', "\\u003c"),
        Err(e) => {
            tracing::warn!("Failed to serialize chart data: {}", e);
            "{\"labels\":[],\"datasets\":[],\"tooltips\":[]}".to_string()
        }
    }
}

fn page_shell(body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: system-ui, sans-serif; background: #f9fafb; color: #111827; margin: 0; padding: 24px; }}
.muted {{ color: #6b7280; }}
.error {{ color: #ef4444; }}
.center {{ min-height: 90vh; display: flex; flex-direction: column; align-items: center; justify-content: center; }}
.spinner {{ width: 48px; height: 48px; border: 4px solid #3b82f6; border-top-color: transparent; border-radius: 50%; animation: spin 1s linear infinite; }}
@keyframes spin {{ to {{ transform: rotate(360deg); }} }}
.cards, .grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 24px; margin-bottom: 24px; }}
.card {{ background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1); padding: 20px; }}
.card.narrow {{ max-width: 420px; }}
.value {{ font-size: 1.5rem; font-weight: 600; }}
.tabs {{ display: inline-flex; background: #f3f4f6; border-radius: 8px; padding: 4px; margin-bottom: 24px; }}
.tab {{ border: 0; background: transparent; padding: 6px 12px; border-radius: 6px; cursor: pointer; }}
.tab.active {{ background: #fff; box-shadow: 0 1px 2px rgba(0, 0, 0, 0.1); }}
.hidden {{ display: none; }}
.chart {{ position: relative; height: 320px; }}
.chart.tall {{ height: 384px; }}
table {{ width: 100%; border-collapse: collapse; font-size: 0.875rem; }}
th {{ text-align: left; text-transform: uppercase; font-size: 0.75rem; color: #6b7280; background: #f3f4f6; padding: 12px 16px; }}
td {{ padding: 12px 16px; border-top: 1px solid #e5e7eb; white-space: nowrap; }}
tr.odd {{ background: #f9fafb; }}
</style>
</head>
<body>
{body}
{script}
</body>
</html>
"#,
        title = PAGE_TITLE,
        body = body,
        script = script,
    )
}

pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
