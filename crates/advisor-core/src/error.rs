//! Error type for graph construction, catalog and config loading

use crate::model::NodeKind;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate {kind:?} node '{key}'")]
    DuplicateNode { kind: NodeKind, key: String },

    #[error("unknown milestone '{milestone_id}' referenced by {referenced_by}")]
    UnknownMilestone {
        milestone_id: String,
        referenced_by: String,
    },
}
