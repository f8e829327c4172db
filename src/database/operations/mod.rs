pub mod metrics_operations;
pub mod system_operations;

pub use metrics_operations::*;
pub use system_operations::*;
