// Module declarations
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod graph;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;


// Re-export commonly used items
pub use client::{CachedTracker, IssueTracker, JiraClient, MockTracker};
pub use config::{Config, Settings, load_config, save_config};
pub use error::{DepGraphError, DepGraphResult};
pub use graph::DependencyGraph;
pub use pipeline::{BuildOptions, build_graph};
pub use render::{GraphvizRenderer, LayoutEngine};
