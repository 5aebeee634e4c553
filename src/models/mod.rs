pub mod analytics;

pub use analytics::{
    BfsRequest, BfsResponse, PagerankRequest, PathRecord, RankedNode, RankingExtremes, TargetSpec,
};
