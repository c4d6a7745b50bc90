//! Axum router setup for the advisor server

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{
        get_course, get_course_context, get_major_requirements, get_milestones, get_prerequisites,
        get_transitive_prerequisites, health_check, invoke_tool, list_majors, list_tools,
    },
    AppState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/majors", get(list_majors))
        .route("/api/majors/:id/requirements", get(get_major_requirements))
        .route("/api/courses/:id", get(get_course))
        .route("/api/courses/:id/context", get(get_course_context))
        .route("/api/courses/:id/prerequisites", get(get_prerequisites))
        .route("/api/courses/:id/prerequisites/transitive", get(get_transitive_prerequisites))
        .route("/api/milestones", get(get_milestones))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:name", post(invoke_tool))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
