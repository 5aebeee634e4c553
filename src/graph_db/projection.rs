use crate::errors::{AnalyticsError, AnalyticsResult};
use neo4rs::{query, Graph};
use uuid::Uuid;

/// A named, transient in-memory GDS projection of one node label and one
/// relationship type.
///
/// Names are generated per call (`{prefix}_{uuid}`) so concurrent
/// invocations never collide on the server's shared projection namespace.
/// Release is explicit: callers must run [`release`](Self::release) on every
/// control path, including early returns.
pub struct Projection {
    name: String,
}

impl Projection {
    pub(crate) fn generate_name(prefix: &str) -> String {
        format!("{}_{}", prefix, Uuid::new_v4().simple())
    }

    /// Materialize an unweighted projection in natural orientation.
    pub async fn create(
        graph: &Graph,
        prefix: &str,
        label: &str,
        rel_type: &str,
    ) -> AnalyticsResult<Self> {
        let name = Self::generate_name(prefix);
        // Labels and relationship types cannot be bound as parameters
        let cypher = format!(
            "CALL gds.graph.project(\
                $graph_name, \
                '{0}', \
                {{ {1}: {{ type: '{1}', orientation: 'NATURAL' }} }}\
            )",
            label, rel_type
        );

        graph
            .run(query(&cypher).param("graph_name", name.clone()))
            .await
            .map_err(|e| AnalyticsError::Neo4j(format!("Failed to project graph: {}", e)))?;

        tracing::debug!("📊 Created projection '{}'", name);
        Ok(Self { name })
    }

    /// Materialize a weighted projection: each relationship carries a
    /// numeric `weight` sourced from `weight_property`, defaulting to 1.0
    /// on edges where the attribute is absent.
    pub async fn create_weighted(
        graph: &Graph,
        prefix: &str,
        label: &str,
        rel_type: &str,
        weight_property: &str,
    ) -> AnalyticsResult<Self> {
        let name = Self::generate_name(prefix);
        let cypher = format!(
            "CALL gds.graph.project(\
                $graph_name, \
                '{0}', \
                {{ {1}: {{ \
                    type: '{1}', \
                    orientation: 'NATURAL', \
                    properties: {{ \
                        weight: {{ \
                            property: $weight_property, \
                            defaultValue: 1.0 \
                        }} \
                    }} \
                }} }}\
            )",
            label, rel_type
        );

        graph
            .run(
                query(&cypher)
                    .param("graph_name", name.clone())
                    .param("weight_property", weight_property),
            )
            .await
            .map_err(|e| AnalyticsError::Neo4j(format!("Failed to project graph: {}", e)))?;

        tracing::debug!("📊 Created weighted projection '{}'", name);
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drop the server-side projection. `failIfMissing: false` keeps the
    /// drop idempotent against a projection already gone.
    pub async fn release(self, graph: &Graph) -> AnalyticsResult<()> {
        graph
            .run(query("CALL gds.graph.drop($graph_name, false)").param("graph_name", self.name.clone()))
            .await
            .map_err(|e| AnalyticsError::Neo4j(format!("Failed to drop projection: {}", e)))?;

        tracing::debug!("🧹 Dropped projection '{}'", self.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names_carry_prefix() {
        let name = Projection::generate_name("bfs");
        assert!(name.starts_with("bfs_"));
        assert!(name.len() > "bfs_".len());
    }

    #[test]
    fn test_generated_names_are_unique_across_calls() {
        let first = Projection::generate_name("pagerank");
        let second = Projection::generate_name("pagerank");
        assert_ne!(first, second);
    }
}
