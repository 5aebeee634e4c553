pub mod analytics_handler;

pub use analytics_handler::{run_bfs, run_pagerank};
