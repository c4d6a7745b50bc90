//! Prerequisite and requirement resolution over the course graph
//!
//! Every operation validates its input first, then issues one or more
//! read-only [`Query`]s through the injected [`GraphStore`] and reshapes the
//! rows in memory. Nothing is cached or shared between calls.

pub mod course;
pub mod error;
pub mod identifier;
pub mod milestones;
pub mod prerequisites;
pub mod requirements;
pub mod tools;


#[cfg(test)]
pub mod test_utils;

pub use course::{CourseContext, CourseRecord};
pub use error::ResolverError;
pub use identifier::{COURSE_ID_PATTERN, MajorRegistry, normalize_course_id, validate_course_id};
pub use milestones::{MilestoneEntry, MilestoneGroups};
pub use prerequisites::{CourseDependencies, PrerequisiteClosure, PrerequisiteGroup, PrerequisiteTerm, format_prerequisites};
pub use requirements::{build_requirement_tree, Division, Needed, Requirement, RequirementSelection, RequirementTree};
pub use tools::Tool;

use advisor_core::AdvisorConfig;
use advisor_store::{GraphStore, Query, Row};
use std::sync::Arc;

/// Default bound on courses expanded by one transitive walk.
pub const DEFAULT_MAX_EXPANSIONS: usize = 500;

/// Read-only resolver over a graph store.
pub struct Resolver<S = Arc<dyn GraphStore>> {
    store: S,
    majors: MajorRegistry,
    max_expansions: usize,
}

impl<S: GraphStore> Resolver<S> {
    pub fn new(store: S, majors: MajorRegistry) -> Self {
        Self {
            store,
            majors,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }

    /// Resolver with the allow-list and limits from `config`.
    pub fn from_config(store: S, config: &AdvisorConfig) -> Self {
        Self::new(store, MajorRegistry::from_config(config)).with_max_expansions(config.resolver.max_expansions)
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn majors(&self) -> &MajorRegistry {
        &self.majors
    }

    pub fn max_expansions(&self) -> usize {
        self.max_expansions
    }

    async fn fetch(&self, query: Query) -> Result<Vec<Row>, ResolverError> {
        tracing::debug!("{}: dispatching {}", self.store.name(), query.name());
        Ok(self.store.run(&query).await?)
    }
}

impl<S: GraphStore> std::fmt::Debug for Resolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("store", &self.store.name())
            .field("majors", &self.majors)
            .field("max_expansions", &self.max_expansions)
            .finish()
    }
}
