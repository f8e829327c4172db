pub mod handlers;
pub mod routes;

use crate::database::MetricsStore;
use std::sync::Arc;

pub use routes::create_router;

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn MetricsStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn MetricsStore>) -> Self {
        Self { store }
    }
}
