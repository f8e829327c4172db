use serde::{Deserialize, Serialize};

use super::{ChainVolume, ProtocolSnapshot, ProtocolTvl};

/// Body of `GET /api/metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsPayload {
    pub metrics: Vec<ProtocolSnapshot>,
    pub tvl_by_protocol: Vec<ProtocolTvl>,
    pub volume_by_chain: Vec<ChainVolume>,
}

impl MetricsPayload {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.tvl_by_protocol.is_empty() && self.volume_by_chain.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
