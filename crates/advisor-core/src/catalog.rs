//! JSON catalog describing a course graph, for running without a hosted database

use crate::error::CoreError;
use crate::graph::Graph;
use crate::model::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default catalog file name looked up next to the config.
pub const CATALOG_FILE: &str = "catalog.json";

/// Serialized form of a course graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub courses: Vec<Course>,
    /// One entry per prerequisite OrGroup.
    pub prerequisites: Vec<CatalogPrerequisite>,
    pub milestones: Vec<CatalogMilestone>,
    pub requires: Vec<RequiresLink>,
}

/// `members` are alternatives; any one of them satisfies the slot on `course`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPrerequisite {
    pub group_id: String,
    pub course: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMilestone {
    pub milestone_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units_required: Option<u32>,
    /// Milestone this one is REQUIRED by (division → major, requirement → division).
    #[serde(default)]
    pub parent: Option<String>,
    /// Courses that directly satisfy this milestone.
    #[serde(default)]
    pub courses: Vec<String>,
    /// Interchangeable course sequences, each modelled as an OrGroup.
    #[serde(default)]
    pub sequences: Vec<SequencePath>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencePath {
    pub group_id: String,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiresLink {
    pub milestone_id: String,
    pub group_id: String,
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CoreError> {
    let json_str = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json(&json_str)?;
    tracing::debug!(
        "Catalog loaded from {}: {} courses, {} milestones",
        path.display(),
        catalog.courses.len(),
        catalog.milestones.len()
    );
    Ok(catalog)
}

impl Catalog {
    pub fn from_json(json_str: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Build the graph this catalog describes.
    pub fn build_graph(&self) -> Result<Graph, CoreError> {
        let mut graph = Graph::new();

        for course in &self.courses {
            graph.add_node(GraphNode::Course(course.clone()))?;
        }

        // All milestones first so parents may be listed after their children
        for entry in &self.milestones {
            graph.add_node(GraphNode::Milestone(Milestone {
                milestone_id: entry.milestone_id.clone(),
                title: entry.title.clone(),
                description: entry.description.clone(),
                units_required: entry.units_required,
            }))?;
        }

        for entry in &self.milestones {
            let milestone = milestone_node(&graph, &entry.milestone_id, &entry.milestone_id)?;

            if let Some(parent) = &entry.parent {
                let parent_id = milestone_node(&graph, parent, &entry.milestone_id)?;
                graph.add_edge(milestone, parent_id, EdgeKind::Required);
            }

            for course_id in &entry.courses {
                let course = course_node(&mut graph, course_id);
                graph.add_edge(course, milestone, EdgeKind::IncludedIn);
            }

            for path in &entry.sequences {
                let group = graph.add_node(GraphNode::OrGroup(OrGroup {
                    group_id: path.group_id.clone(),
                }))?;
                graph.add_edge(group, milestone, EdgeKind::IncludedIn);
                for course_id in &path.courses {
                    let course = course_node(&mut graph, course_id);
                    graph.add_edge(course, group, EdgeKind::Required);
                }
            }
        }

        for prereq in &self.prerequisites {
            let group = graph.add_node(GraphNode::OrGroup(OrGroup {
                group_id: prereq.group_id.clone(),
            }))?;
            let target = course_node(&mut graph, &prereq.course);
            graph.add_edge(group, target, EdgeKind::Required);
            for member in &prereq.members {
                let course = course_node(&mut graph, member);
                graph.add_edge(course, group, EdgeKind::IncludedIn);
            }
        }

        for link in &self.requires {
            let referenced_by = format!("requires link to '{}'", link.group_id);
            let milestone = milestone_node(&graph, &link.milestone_id, &referenced_by)?;
            let group = graph.ensure_node(GraphNode::OrGroup(OrGroup {
                group_id: link.group_id.clone(),
            }));
            graph.add_edge(milestone, group, EdgeKind::Requires);
        }

        tracing::info!(
            "Built course graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

fn milestone_node(graph: &Graph, milestone_id: &str, referenced_by: &str) -> Result<NodeId, CoreError> {
    graph
        .find(NodeKind::Milestone, milestone_id)
        .ok_or_else(|| CoreError::UnknownMilestone {
            milestone_id: milestone_id.to_string(),
            referenced_by: referenced_by.to_string(),
        })
}

/// Courses outside the catalog still take part in prerequisite chains.
fn course_node(graph: &mut Graph, course_id: &str) -> NodeId {
    if let Some(id) = graph.find(NodeKind::Course, course_id) {
        return id;
    }
    tracing::debug!("Adding stub course {}", course_id);
    graph.ensure_node(GraphNode::Course(Course::stub(course_id)))
}

/// Load a catalog file and build its graph in one step.
pub fn load_graph(path: &Path) -> Result<Graph, CoreError> {
    load_catalog(path)?.build_graph()
}
