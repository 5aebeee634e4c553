use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

/// BFS targets accepted as either a bare string or a list of strings.
/// A single string is treated as a one-element collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TargetSpec {
    One(String),
    Many(Vec<String>),
}

impl TargetSpec {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TargetSpec::One(target) => vec![target],
            TargetSpec::Many(targets) => targets,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BfsRequest {
    pub start: String,
    pub targets: TargetSpec,
}

/// One path returned by the traversal, opaque beyond the ordered sequence of
/// internal node ids encountered between source and target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRecord {
    pub node_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct BfsResponse {
    pub paths: Vec<PathRecord>,
    pub path_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct PagerankRequest {
    pub max_iterations: u32,
    pub weight_property: String,
}

/// One entry of the ranking result. Fields are nullable only for the
/// sentinel case substituted when the computation yields no records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub name: Option<String>,
    pub score: Option<f64>,
}

impl RankedNode {
    pub fn sentinel() -> Self {
        Self {
            name: None,
            score: None,
        }
    }
}

/// Extremal entries of a full ranking, or the explicit empty case.
///
/// The wire form is always a 2-element array: `[top, bottom]` of the
/// descending-ordered result, collapsing to two sentinel records when the
/// ranking produced nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum RankingExtremes {
    Extremes { top: RankedNode, bottom: RankedNode },
    Empty,
}

impl RankingExtremes {
    /// Collapse a descending-ordered ranking to its first and last entries.
    /// A single-node ranking yields the same record twice.
    pub fn from_ordered(ranked: Vec<RankedNode>) -> Self {
        match (ranked.first(), ranked.last()) {
            (Some(top), Some(bottom)) => RankingExtremes::Extremes {
                top: top.clone(),
                bottom: bottom.clone(),
            },
            _ => RankingExtremes::Empty,
        }
    }

    pub fn into_pair(self) -> [RankedNode; 2] {
        match self {
            RankingExtremes::Extremes { top, bottom } => [top, bottom],
            RankingExtremes::Empty => [RankedNode::sentinel(), RankedNode::sentinel()],
        }
    }
}

impl Serialize for RankingExtremes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pair = self.clone().into_pair();
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&pair[0])?;
        seq.serialize_element(&pair[1])?;
        seq.end()
    }
}
