//! REST API handlers for the advisor server

use std::sync::Arc;

use advisor_resolver::{
    CourseContext, CourseDependencies, CourseRecord, MilestoneGroups, PrerequisiteGroup, RequirementTree, Tool,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}

#[derive(Debug, Serialize)]
pub struct MajorResponse {
    pub name: String,
    pub major_id: String,
}

/// Both renderings of a course's direct prerequisites
#[derive(Debug, Serialize)]
pub struct PrerequisitesResponse {
    pub course: String,
    pub text: String,
    pub groups: Vec<PrerequisiteGroup>,
}

#[derive(Debug, Serialize)]
pub struct TransitiveResponse {
    pub course: String,
    pub visited: Vec<String>,
    pub dependencies: Vec<CourseDependencies>,
    pub trace: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ToolRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct ToolOutput {
    pub output: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.resolver.store().name().to_string(),
    })
}

/// Configured major allow-list
pub async fn list_majors(State(state): State<Arc<AppState>>) -> Json<Vec<MajorResponse>> {
    let majors = state
        .resolver
        .majors()
        .iter()
        .map(|(name, id)| MajorResponse {
            name: name.to_string(),
            major_id: id.to_string(),
        })
        .collect();
    Json(majors)
}

pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseRecord>, ApiError> {
    Ok(Json(state.resolver.lookup_course(&course_id).await?))
}

pub async fn get_course_context(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseContext>, ApiError> {
    Ok(Json(state.resolver.course_context(&course_id).await?))
}

pub async fn get_prerequisites(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<PrerequisitesResponse>, ApiError> {
    let groups = state.resolver.immediate_prerequisites(&course_id).await?;
    Ok(Json(PrerequisitesResponse {
        course: advisor_resolver::normalize_course_id(&course_id),
        text: advisor_resolver::format_prerequisites(&groups),
        groups,
    }))
}

pub async fn get_transitive_prerequisites(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<TransitiveResponse>, ApiError> {
    let closure = state.resolver.transitive_prerequisites(&course_id).await?;
    let trace = closure.trace_lines();
    Ok(Json(TransitiveResponse {
        course: closure.root,
        visited: closure.visited,
        dependencies: closure.dependencies,
        trace,
    }))
}

pub async fn get_major_requirements(
    State(state): State<Arc<AppState>>,
    Path(major_id): Path<String>,
) -> Result<Json<RequirementTree>, ApiError> {
    Ok(Json(state.resolver.major_requirements(&major_id).await?))
}

pub async fn get_milestones(State(state): State<Arc<AppState>>) -> Result<Json<MilestoneGroups>, ApiError> {
    Ok(Json(state.resolver.milestone_groups().await?))
}

pub async fn list_tools() -> Json<Vec<ToolResponse>> {
    Json(
        Tool::ALL
            .into_iter()
            .map(|tool| ToolResponse {
                name: tool.name(),
                description: tool.description(),
            })
            .collect(),
    )
}

pub async fn invoke_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<ToolOutput>, ApiError> {
    let tool = Tool::from_name(&name)?;
    let output = tool.invoke(&state.resolver, &request.input).await?;
    Ok(Json(ToolOutput { output }))
}
