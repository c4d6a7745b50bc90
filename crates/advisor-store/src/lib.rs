//! Graph store access for the advisor
//!
//! The resolver never talks to a database directly: it issues [`Query`]
//! values through a [`GraphStore`] handed to it at construction. Two stores
//! ship here: [`MemoryStore`] over a catalog-built graph and [`Neo4jStore`]
//! over Neo4j's HTTP API.

pub mod error;
pub mod memory;
pub mod neo4j;
pub mod query;
pub mod row;


pub use error::StoreError;
pub use memory::MemoryStore;
pub use neo4j::Neo4jStore;
pub use query::Query;
pub use row::Row;

use advisor_core::{StoreBackend, StoreConfig};
use anyhow::Context;
use std::sync::Arc;

/// Read-only access to the course graph.
#[async_trait::async_trait]
pub trait GraphStore: Send + Sync {
    /// Run one query and return its rows in store order.
    async fn run(&self, query: &Query) -> Result<Vec<Row>, StoreError>;

    /// Get store name
    fn name(&self) -> &str;
}

#[async_trait::async_trait]
impl<S: GraphStore + ?Sized> GraphStore for Arc<S> {
    async fn run(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        (**self).run(query).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Factory function to open the store a config describes
pub fn create_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn GraphStore>> {
    match config.backend {
        StoreBackend::Memory => {
            let graph = advisor_core::load_graph(&config.catalog)
                .with_context(|| format!("Failed to load catalog {}", config.catalog.display()))?;
            Ok(Arc::new(MemoryStore::new(graph)))
        }
        StoreBackend::Neo4j => {
            let uri = config
                .uri
                .as_deref()
                .context("Neo4j backend selected but no store URI configured (set NEO4J_URI)")?;
            let store = Neo4jStore::new(uri, &config.database, config.username.clone(), config.password.clone());
            tracing::info!("Using Neo4j store at {}", store.endpoint());
            Ok(Arc::new(store))
        }
    }
}
