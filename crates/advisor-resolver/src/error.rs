//! Resolver errors

use advisor_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// Malformed course identifier; raised before any query is sent.
    #[error("Course ID must be in format like \"MATH 18\" or \"MATH 20C\"")]
    InvalidIdentifier { input: String },

    /// Major identifier outside the configured allow-list; raised before any query is sent.
    #[error("unknown major identifier '{input}' (known: {allowed})")]
    InvalidMajorIdentifier { input: String, allowed: String },

    #[error("course {course_id} not found")]
    NotFound { course_id: String },

    /// The major exists in the allow-list but the store holds no hierarchy for it.
    #[error("major {major_id} has no modeled divisions or requirements")]
    MajorNotFound { major_id: String },

    #[error("prerequisite walk from {course_id} exceeded {limit} course expansions")]
    ExpansionLimit { course_id: String, limit: usize },

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to render result: {0}")]
    Render(#[from] serde_json::Error),
}
