use std::env;

/// Service configuration loaded from the environment.
///
/// `NEO4J_DATABASE` is optional: when unset the driver's default database is
/// used, when set the client is constructed against that database explicitly.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub neo4j_database: Option<String>,
    pub node_label: String,
    pub relationship_type: String,
    pub port: u16,
}

impl AnalyticsConfig {
    pub fn from_env() -> Self {
        Self {
            neo4j_uri: env::var("NEO4J_URI")
                .unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            neo4j_user: env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string()),
            neo4j_password: env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "password".to_string()),
            neo4j_database: env::var("NEO4J_DATABASE").ok(),
            node_label: env::var("GRAPH_NODE_LABEL").unwrap_or_else(|_| "Location".to_string()),
            relationship_type: env::var("GRAPH_REL_TYPE").unwrap_or_else(|_| "TRIP".to_string()),
            port: env::var("ANALYTICS_PORT")
                .unwrap_or_else(|_| "8007".to_string())
                .parse::<u16>()
                .expect("Invalid port number"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Scoped to variables this test doesn't set; CI doesn't export them.
        std::env::remove_var("GRAPH_NODE_LABEL");
        std::env::remove_var("GRAPH_REL_TYPE");
        std::env::remove_var("ANALYTICS_PORT");

        let config = AnalyticsConfig::from_env();
        assert_eq!(config.node_label, "Location");
        assert_eq!(config.relationship_type, "TRIP");
        assert_eq!(config.port, 8007);
    }
}
