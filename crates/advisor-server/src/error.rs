//! Mapping resolver failures onto HTTP responses

use advisor_resolver::ResolverError;
use advisor_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Resolver error carried out of a handler; renders as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError(pub ResolverError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ResolverError::InvalidIdentifier { .. } | ResolverError::InvalidMajorIdentifier { .. } => {
                StatusCode::BAD_REQUEST
            }
            ResolverError::NotFound { .. } | ResolverError::MajorNotFound { .. } | ResolverError::UnknownTool(_) => {
                StatusCode::NOT_FOUND
            }
            ResolverError::ExpansionLimit { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ResolverError::Store(StoreError::MalformedRow { .. }) => StatusCode::BAD_GATEWAY,
            ResolverError::Store(StoreError::Unavailable(_) | StoreError::Rejected { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ResolverError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResolverError> for ApiError {
    fn from(err: ResolverError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
