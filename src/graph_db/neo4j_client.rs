use crate::errors::{AnalyticsError, AnalyticsResult};
use neo4rs::{query, ConfigBuilder, Graph};

/// Connection manager for the Neo4j store hosting the GDS analytics engine.
///
/// Holds a single driver handle, verifies reachability at construction, and
/// releases the connection through the consuming [`close`](Self::close).
pub struct Neo4jClient {
    graph: Graph,
    uri: String,
}

impl Neo4jClient {
    /// Connect against the driver's default database.
    ///
    /// Supports local (`bolt://localhost:7687`) and AuraDB
    /// (`neo4j+s://xxxxx.databases.neo4j.io`) URIs. Fails fast with a
    /// connection error when the store is unreachable or credentials are
    /// rejected.
    pub async fn connect(uri: &str, user: &str, password: &str) -> AnalyticsResult<Self> {
        Self::connect_inner(uri, user, password, "neo4j").await
    }

    /// Connect against an explicitly named database.
    pub async fn connect_with_db(
        uri: &str,
        user: &str,
        password: &str,
        database: &str,
    ) -> AnalyticsResult<Self> {
        Self::connect_inner(uri, user, password, database).await
    }

    async fn connect_inner(
        uri: &str,
        user: &str,
        password: &str,
        database: &str,
    ) -> AnalyticsResult<Self> {
        tracing::info!("🔷 Connecting to Neo4j at: {}", uri);

        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db(database)
            .fetch_size(500)
            .max_connections(10)
            .build()
            .map_err(|e| AnalyticsError::Neo4j(format!("Failed to build Neo4j config: {}", e)))?;

        let graph = Graph::connect(config)
            .await
            .map_err(|e| AnalyticsError::Neo4j(format!("Failed to connect to Neo4j: {}", e)))?;

        // Verify reachability before handing the client out
        let mut result = graph
            .execute(query("RETURN 1 as test"))
            .await
            .map_err(|e| AnalyticsError::Neo4j(format!("Connection test failed: {}", e)))?;

        if result
            .next()
            .await
            .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?
            .is_some()
        {
            tracing::info!("✅ Neo4j connection established successfully");
        }

        Ok(Self {
            graph,
            uri: uri.to_string(),
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Release the underlying connection. Consuming `self` makes a second
    /// close a compile error rather than undefined driver behavior.
    pub fn close(self) {
        tracing::info!("🔌 Closing Neo4j connection to {}", self.uri);
        drop(self.graph);
    }
}
