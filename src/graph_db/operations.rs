use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::graph_db::{Neo4jClient, Projection};
use crate::models::{PathRecord, RankedNode, RankingExtremes, TargetSpec};
use async_trait::async_trait;
use neo4rs::query;
use std::sync::Arc;

/// Random-restart probability of the ranking iteration.
pub const DAMPING_FACTOR: f64 = 0.85;

/// The two analytics operations delegated to the server-side engine.
/// Handlers depend on this trait so tests can substitute a mock backend.
#[async_trait]
pub trait GraphAnalytics: Send + Sync {
    /// Paths reported by the engine between `start` and the targets, or an
    /// empty list when the start identifier is absent from the store.
    async fn bfs(&self, start: &str, targets: TargetSpec) -> AnalyticsResult<Vec<PathRecord>>;

    /// Extremal entries of a full weighted ranking over the subgraph.
    async fn pagerank(
        &self,
        max_iterations: u32,
        weight_property: &str,
    ) -> AnalyticsResult<RankingExtremes>;
}

/// GDS-backed implementation. Each call materializes a uniquely named
/// projection, runs the engine procedure, and releases the projection on
/// every control path. Queries within one call run sequentially; there is no
/// retry, timeout override, or cancellation beyond the driver's defaults.
pub struct GdsService {
    client: Arc<Neo4jClient>,
    node_label: String,
    relationship_type: String,
}

impl GdsService {
    pub fn new(
        client: Arc<Neo4jClient>,
        node_label: impl Into<String>,
        relationship_type: impl Into<String>,
    ) -> Self {
        Self {
            client,
            node_label: node_label.into(),
            relationship_type: relationship_type.into(),
        }
    }

    async fn stream_bfs(
        &self,
        projection: &Projection,
        start: &str,
        targets: &[String],
    ) -> AnalyticsResult<Vec<PathRecord>> {
        let graph = self.client.graph();

        // Resolve names to the engine's internal node handles
        let lookup = format!(
            "MATCH (start:{0} {{name: $start_node}}) \
             MATCH (target:{0}) WHERE target.name IN $target_nodes \
             RETURN id(start) AS sourceId, collect(id(target)) AS targetIds",
            self.node_label
        );

        let mut rows = graph
            .execute(
                query(&lookup)
                    .param("start_node", start)
                    .param("target_nodes", targets.to_vec()),
            )
            .await
            .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?;

        let row = match rows
            .next()
            .await
            .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?
        {
            Some(row) => row,
            None => {
                tracing::info!("🔍 Start node '{}' not found, traversal is empty", start);
                return Ok(Vec::new());
            }
        };

        let source_id: i64 = row
            .get("sourceId")
            .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?;
        let target_ids: Vec<i64> = row
            .get("targetIds")
            .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?;

        let mut result = graph
            .execute(
                query(
                    "CALL gds.bfs.stream($graph_name, { \
                        sourceNode: $source_id, \
                        targetNodes: $target_ids \
                    }) \
                    YIELD path \
                    RETURN path",
                )
                .param("graph_name", projection.name())
                .param("source_id", source_id)
                .param("target_ids", target_ids),
            )
            .await
            .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?;

        let mut paths = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?
        {
            let path: neo4rs::Path = row
                .get("path")
                .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?;
            paths.push(PathRecord {
                node_ids: path.nodes().iter().map(|node| node.id()).collect(),
            });
        }

        Ok(paths)
    }

    async fn stream_pagerank(
        &self,
        projection: &Projection,
        max_iterations: u32,
    ) -> AnalyticsResult<RankingExtremes> {
        let graph = self.client.graph();

        let cypher = format!(
            "CALL gds.pageRank.stream($graph_name, {{ \
                maxIterations: $max_iterations, \
                dampingFactor: {}, \
                relationshipWeightProperty: 'weight' \
            }}) \
            YIELD nodeId, score \
            RETURN gds.util.asNode(nodeId).name AS name, score \
            ORDER BY score DESC",
            DAMPING_FACTOR
        );

        let mut result = graph
            .execute(
                query(&cypher)
                    .param("graph_name", projection.name())
                    .param("max_iterations", max_iterations as i64),
            )
            .await
            .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?;

        let mut ranked = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?
        {
            let name: Option<String> = row
                .get("name")
                .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?;
            let score: f64 = row
                .get("score")
                .map_err(|e| AnalyticsError::Neo4j(e.to_string()))?;
            ranked.push(RankedNode {
                name,
                score: Some(score),
            });
        }

        Ok(RankingExtremes::from_ordered(ranked))
    }

    /// A drop failure after the computation already finished is logged and
    /// swallowed: the leaked projection is reclaimable server-side, the
    /// computed result is not. A compute failure wins over a drop failure.
    fn release_or_warn(operation: &str, released: AnalyticsResult<()>) {
        if let Err(e) = released {
            tracing::warn!("Projection left behind after {}: {}", operation, e);
        }
    }
}

#[async_trait]
impl GraphAnalytics for GdsService {
    async fn bfs(&self, start: &str, targets: TargetSpec) -> AnalyticsResult<Vec<PathRecord>> {
        let targets = targets.into_vec();
        tracing::info!(
            "🔷 BFS from '{}' toward {} target(s)",
            start,
            targets.len()
        );

        let graph = self.client.graph();
        let projection =
            Projection::create(graph, "bfs", &self.node_label, &self.relationship_type).await?;

        let outcome = self.stream_bfs(&projection, start, &targets).await;
        Self::release_or_warn("bfs", projection.release(graph).await);

        outcome
    }

    async fn pagerank(
        &self,
        max_iterations: u32,
        weight_property: &str,
    ) -> AnalyticsResult<RankingExtremes> {
        tracing::info!(
            "🔷 PageRank, max {} iteration(s), weight property '{}'",
            max_iterations,
            weight_property
        );

        let graph = self.client.graph();
        let projection = Projection::create_weighted(
            graph,
            "pagerank",
            &self.node_label,
            &self.relationship_type,
            weight_property,
        )
        .await?;

        let outcome = self.stream_pagerank(&projection, max_iterations).await;
        Self::release_or_warn("pagerank", projection.release(graph).await);

        outcome
    }
}
