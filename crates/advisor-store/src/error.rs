//! Graph store errors

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport or connection failure. Never retried here.
    #[error("graph store unavailable: {0}")]
    Unavailable(String),

    /// The store answered but refused the query.
    #[error("graph store rejected query ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("malformed row: column '{column}' {reason}")]
    MalformedRow { column: String, reason: String },
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
