pub mod models;
pub mod api_types;

pub use models::*;
pub use api_types::*;
