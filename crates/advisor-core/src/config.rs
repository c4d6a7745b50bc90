//! Configuration for the graph store, major allow-list and resolver limits.
//!
//! Load order: `advisor.toml` → environment variables (including `.env`) → defaults.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "advisor.toml";

/// Top-level advisor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub store: StoreConfig,
    /// Human-readable major name → major milestone identifier.
    /// Only identifiers listed here are ever sent to the store.
    pub majors: BTreeMap<String, String>,
    pub resolver: ResolverConfig,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            majors: BTreeMap::from([("Math-CS".to_string(), "MA30".to_string())]),
            resolver: ResolverConfig::default(),
        }
    }
}

/// Which graph store backs the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process graph built from a JSON catalog.
    #[default]
    Memory,
    /// Hosted Neo4j reached over its HTTP API.
    Neo4j,
}

/// Graph store connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Catalog file for the memory backend. Relative paths resolve against the config file.
    pub catalog: PathBuf,
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            catalog: PathBuf::from(crate::catalog::CATALOG_FILE),
            uri: None,
            username: None,
            password: None,
            database: "neo4j".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Upper bound on courses expanded by one transitive prerequisite walk.
    pub max_expansions: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { max_expansions: 500 }
    }
}

impl AdvisorConfig {
    /// Load config from `path` (defaults if it does not exist), then apply
    /// `.env` and process environment overrides.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let mut config = Self::from_file(path)?;
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", env_file.display());
        }
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from `path` only; a missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let toml_str = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: AdvisorConfig =
            toml::from_str(&toml_str).map_err(|source| CoreError::Config {
                path: path.to_path_buf(),
                source,
            })?;

        if config.store.catalog.is_relative() {
            if let Some(dir) = path.parent() {
                config.store.catalog = dir.join(&config.store.catalog);
            }
        }
        tracing::debug!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Apply `NEO4J_*` overrides. Setting `NEO4J_URI` selects the Neo4j backend.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("NEO4J_URI") {
            self.store.uri = Some(uri);
            self.store.backend = StoreBackend::Neo4j;
        }
        if let Some(username) = lookup("NEO4J_USERNAME") {
            self.store.username = Some(username);
        }
        if let Some(password) = lookup("NEO4J_PASSWORD") {
            self.store.password = Some(password);
        }
        if let Some(database) = lookup("NEO4J_DATABASE") {
            self.store.database = database;
        }
    }
}
