pub mod metrics_handlers;
pub mod page_handlers;

pub use metrics_handlers::*;
pub use page_handlers::*;

pub const FETCH_METRICS_ERROR: &str = "Failed to fetch metrics";
