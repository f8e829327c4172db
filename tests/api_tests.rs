//! End-to-end: SQLite store → axum server on an ephemeral port → reqwest client → page.

use defi_dashboard::config::{Config, DashboardConfig, DatabaseConfig, ServerConfig};
use defi_dashboard::dashboard::DashboardState;
use defi_dashboard::database::Database;
use defi_dashboard::services::{serve, DashboardService, MetricsClient};
use defi_dashboard::types::NewSnapshot;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

fn snapshot(ts: &str, protocol: &str, chain: &str, tvl: f64, volume: f64, users: i64) -> NewSnapshot {
    NewSnapshot {
        timestamp: ts.to_string(),
        protocol: protocol.to_string(),
        chain: chain.to_string(),
        total_value_locked_usd: tvl,
        daily_volume_usd: volume,
        active_users: users,
        token: "TKN".to_string(),
    }
}

struct TestServer {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(database: Database) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let base_url = format!("http://{}", listener.local_addr().expect("addr"));
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            serve(listener, Arc::new(database), shutdown)
                .await
                .expect("server");
        });

        Self {
            base_url,
            shutdown: Some(tx),
            handle,
        }
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

async fn seeded_database(url: &str) -> Database {
    let db = Database::open(url).await.expect("open");
    db.create_tables().await.expect("tables");
    for row in [
        snapshot("2024-03-01T00:00:00Z", "Aave", "Ethereum", 100.0, 10.0, 5),
        snapshot("2024-03-03T00:00:00Z", "Aave", "Polygon", 50.0, 20.0, 7),
        snapshot("2024-03-02T00:00:00Z", "Compound", "Ethereum", 30.0, 5.0, 1),
    ] {
        db.insert_snapshot(&row).await.expect("insert");
    }
    db
}

#[tokio::test]
async fn test_client_fetches_payload_from_running_server() {
    let server = TestServer::start(seeded_database("sqlite::memory:").await).await;
    let client = MetricsClient::new(server.base_url.clone());

    let payload = client.fetch_payload().await.expect("payload");

    let timestamps: Vec<&str> = payload.metrics.iter().map(|m| m.timestamp.as_str()).collect();
    assert_eq!(
        timestamps,
        vec!["2024-03-03T00:00:00Z", "2024-03-02T00:00:00Z", "2024-03-01T00:00:00Z"]
    );

    let mut tvl = payload.tvl_by_protocol.clone();
    tvl.sort_by(|a, b| a.protocol.cmp(&b.protocol));
    assert_eq!(tvl.len(), 2);
    assert_eq!((tvl[0].protocol.as_str(), tvl[0].tvl), ("Aave", 150.0));
    assert_eq!((tvl[1].protocol.as_str(), tvl[1].tvl), ("Compound", 30.0));

    let volume: f64 = payload.volume_by_chain.iter().map(|v| v.volume).sum();
    assert_eq!(volume, 35.0);

    server.stop().await;
}

#[tokio::test]
async fn test_closed_store_yields_500_and_error_state() {
    let database = seeded_database("sqlite::memory:").await;
    let handle = database.clone();
    let server = TestServer::start(database).await;
    handle.close().await;

    let response = reqwest::get(format!("{}/api/metrics", server.base_url))
        .await
        .expect("response");
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["error"], "Failed to fetch metrics");

    let state = MetricsClient::new(server.base_url.clone()).fetch_state(10).await;
    assert!(matches!(state, DashboardState::Error(_)));

    server.stop().await;
}

#[tokio::test]
async fn test_dashboard_service_writes_rendered_page() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_url = format!("sqlite://{}", dir.path().join("defi.db").display());
    let server = TestServer::start(seeded_database(&db_url).await).await;

    let output = dir.path().join("dashboard.html");
    let config = Config {
        database: DatabaseConfig { url: db_url },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        dashboard: DashboardConfig {
            api_url: server.base_url.clone(),
            output_path: output.display().to_string(),
            table_rows: 2,
        },
        log_level: "info".to_string(),
    };

    let state = DashboardService::new(&config).render_once().await.expect("render");
    let DashboardState::Loaded(view) = state else {
        panic!("expected loaded state");
    };
    assert_eq!(view.summary.total_tvl, 180.0);
    assert_eq!(view.summary.total_volume, 35.0);
    assert_eq!(view.summary.total_users, 13);
    assert_eq!(view.table.len(), 2);

    let page = std::fs::read_to_string(&output).expect("page");
    assert!(page.contains("DeFi Protocol Dashboard"));
    assert!(page.contains("$180.00"));
    assert_eq!(page.matches("<tr class=").count(), 2);

    server.stop().await;
}
