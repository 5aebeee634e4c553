pub mod neo4j_client;
pub mod operations;
pub mod projection;

pub use neo4j_client::Neo4jClient;
pub use operations::{GdsService, GraphAnalytics, DAMPING_FACTOR};
pub use projection::Projection;
