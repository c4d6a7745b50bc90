//! Advisor Core — course graph data model, catalog loading and configuration

pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;


#[cfg(test)]
pub mod test_utils;

pub use catalog::{CATALOG_FILE, Catalog, CatalogMilestone, CatalogPrerequisite, RequiresLink, SequencePath, load_catalog, load_graph};
pub use config::{AdvisorConfig, CONFIG_FILE, ResolverConfig, StoreBackend, StoreConfig};
pub use error::CoreError;
pub use graph::Graph;
pub use model::{Course, EdgeId, EdgeKind, GraphEdge, GraphNode, Milestone, NodeId, NodeKind, OrGroup};
