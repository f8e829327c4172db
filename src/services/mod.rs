pub mod api_service;
pub mod dashboard_service;

pub use api_service::{serve, ApiService};
pub use dashboard_service::{DashboardService, MetricsClient};
