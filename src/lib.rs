pub mod config;
pub mod errors;
pub mod graph_db;
pub mod handlers;
pub mod models;

pub use config::AnalyticsConfig;
pub use errors::{AnalyticsError, AnalyticsResult};
pub use graph_db::{GdsService, GraphAnalytics, Neo4jClient};
