use super::super::ApiState;
use super::FETCH_METRICS_ERROR;
use crate::database::load_metrics_payload;
use crate::types::*;
use axum::{extract::State, http::StatusCode, response::Json};

/// `GET /api/metrics`
///
/// Returns all snapshots (newest first) together with TVL per protocol and
/// volume per chain. Any storage failure is logged and collapsed into a
/// single 500 `{"error": "Failed to fetch metrics"}` response.
pub async fn get_metrics(
    State(state): State<ApiState>,
) -> Result<Json<MetricsPayload>, (StatusCode, Json<ErrorResponse>)> {
    match load_metrics_payload(state.store.as_ref()).await {
        Ok(payload) => {
            tracing::debug!(
                "Serving {} snapshots, {} protocols, {} chains",
                payload.metrics.len(),
                payload.tvl_by_protocol.len(),
                payload.volume_by_chain.len()
            );
            Ok(Json(payload))
        }
        Err(e) => {
            tracing::error!("Failed to fetch metrics: {:#}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(FETCH_METRICS_ERROR)),
            ))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::database::MetricsStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Store double serving fixed rows, or failing on one chosen read.
    pub(crate) struct FakeStore {
        pub snapshots: Vec<ProtocolSnapshot>,
        pub tvl: Vec<ProtocolTvl>,
        pub volume: Vec<ChainVolume>,
        pub fail_volume: bool,
    }

    #[async_trait]
    impl MetricsStore for FakeStore {
        async fn list_snapshots(&self) -> Result<Vec<ProtocolSnapshot>> {
            Ok(self.snapshots.clone())
        }

        async fn sum_tvl_by_protocol(&self) -> Result<Vec<ProtocolTvl>> {
            Ok(self.tvl.clone())
        }

        async fn sum_volume_by_chain(&self) -> Result<Vec<ChainVolume>> {
            if self.fail_volume {
                return Err(anyhow::anyhow!("database is locked"));
            }
            Ok(self.volume.clone())
        }
    }

    pub(crate) fn fake_store(fail_volume: bool) -> FakeStore {
        FakeStore {
            snapshots: vec![ProtocolSnapshot {
                id: 1,
                timestamp: "2024-03-01T00:00:00Z".to_string(),
                protocol: "Aave".to_string(),
                chain: "Ethereum".to_string(),
                total_value_locked_usd: 100.0,
                daily_volume_usd: 20.0,
                active_users: 42,
                token: "AAVE".to_string(),
            }],
            tvl: vec![ProtocolTvl { protocol: "Aave".to_string(), tvl: 100.0 }],
            volume: vec![ChainVolume { chain: "Ethereum".to_string(), volume: 20.0 }],
            fail_volume,
        }
    }

    async fn call(store: FakeStore, uri: &str) -> (StatusCode, Vec<u8>) {
        let app = create_router(ApiState::new(Arc::new(store)));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_get_metrics_success() {
        let (status, body) = call(fake_store(false), "/api/metrics").await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["metrics"][0]["protocol"], "Aave");
        assert_eq!(value["metrics"][0]["active_users"], 42);
        assert_eq!(value["tvlByProtocol"][0]["tvl"], 100.0);
        assert_eq!(value["volumeByChain"][0]["chain"], "Ethereum");
    }

    #[tokio::test]
    async fn test_get_metrics_collapses_any_failure() {
        let (status, body) = call(fake_store(true), "/api/metrics").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, FETCH_METRICS_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = call(fake_store(false), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
