pub mod config;
pub mod database;
pub mod api;
pub mod dashboard;
pub mod types;
pub mod services;

pub use config::Config;
pub use database::{Database, MetricsStore};
pub use types::*;
