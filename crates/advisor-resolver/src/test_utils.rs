//! Test utilities for advisor-resolver

use crate::identifier::MajorRegistry;
use crate::Resolver;
use advisor_core::{AdvisorConfig, Catalog};
use advisor_store::{GraphStore, MemoryStore, Query, Row, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const SAMPLE_CATALOG: &str = include_str!("../../../fixtures/catalog.json");

/// Memory store that counts every query it receives.
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Self {
        CountingStore {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl GraphStore for CountingStore {
    async fn run(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.run(query).await
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Store that fails every query as if the database were down.
pub struct OfflineStore;

#[async_trait::async_trait]
impl GraphStore for OfflineStore {
    async fn run(&self, _query: &Query) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

pub fn store_from_json(json: &str) -> CountingStore {
    let graph = Catalog::from_json(json).unwrap().build_graph().unwrap();
    CountingStore::new(MemoryStore::new(graph))
}

/// Resolver over the sample catalog with the default allow-list.
pub fn sample_resolver() -> Resolver<CountingStore> {
    Resolver::from_config(store_from_json(SAMPLE_CATALOG), &AdvisorConfig::default())
}

/// Resolver over an ad hoc catalog.
pub fn resolver_for(json: &str) -> Resolver<CountingStore> {
    Resolver::new(store_from_json(json), MajorRegistry::from_config(&AdvisorConfig::default()))
}
