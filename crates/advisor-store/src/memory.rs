//! In-process graph store over an advisor-core graph

use crate::error::StoreError;
use crate::query::Query;
use crate::row::Row;
use crate::GraphStore;
use advisor_core::{EdgeKind, Graph, GraphNode, Milestone, NodeId, NodeKind};
use serde_json::Value;

/// Evaluates each [`Query`] directly against a [`Graph`].
///
/// Produces the same aliases, grouping and ordering as the Cypher text:
/// collected lists follow edge insertion order, `ORDER BY` columns sort as strings.
pub struct MemoryStore {
    graph: Graph,
}

impl MemoryStore {
    pub fn new(graph: Graph) -> Self {
        MemoryStore { graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn keys(&self, ids: Vec<NodeId>) -> Vec<String> {
        ids.into_iter()
            .filter_map(|id| self.graph.node(id))
            .map(|n| n.key().to_string())
            .collect()
    }

    fn milestone(&self, id: NodeId) -> Option<&Milestone> {
        self.graph.node(id).and_then(GraphNode::as_milestone)
    }

    fn course_info(&self, course_id: &str) -> Vec<Row> {
        let Some(course) = self.graph.course(course_id) else {
            return Vec::new();
        };
        vec![Row::new()
            .with("id", course.course_id.clone())
            .with("title", opt(&course.title))
            .with("units", opt(&course.units))
            .with("description", opt(&course.description))]
    }

    /// `(group_id, members)` for every non-empty prerequisite group of a course.
    fn prerequisite_groups(&self, course_id: &str) -> Vec<(String, Vec<String>)> {
        let Some(course) = self.graph.find(NodeKind::Course, course_id) else {
            return Vec::new();
        };
        let mut groups: Vec<_> = self
            .graph
            .sources_of(course, EdgeKind::Required, NodeKind::OrGroup)
            .into_iter()
            .filter_map(|group| {
                let members = self.keys(self.graph.sources_of(group, EdgeKind::IncludedIn, NodeKind::Course));
                let group_id = self.graph.node(group)?.key().to_string();
                (!members.is_empty()).then_some((group_id, members))
            })
            .collect();
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        groups
    }

    fn required_for(&self, course_id: &str) -> Vec<Row> {
        let Some(course) = self.graph.find(NodeKind::Course, course_id) else {
            return Vec::new();
        };
        let mut milestone_ids: Vec<String> = self
            .graph
            .sources_of(course, EdgeKind::Required, NodeKind::OrGroup)
            .into_iter()
            .flat_map(|group| self.keys(self.graph.sources_of(group, EdgeKind::Requires, NodeKind::Milestone)))
            .collect();
        milestone_ids.sort();
        milestone_ids.dedup();
        milestone_ids
            .into_iter()
            .map(|id| Row::new().with("milestone_id", id))
            .collect()
    }

    /// Every (major, division, requirement) triple below `major_id`.
    fn requirement_levels(&self, major_id: &str) -> Vec<(&Milestone, &Milestone, NodeId, &Milestone)> {
        let Some(major_node) = self.graph.find(NodeKind::Milestone, major_id) else {
            return Vec::new();
        };
        let Some(major) = self.milestone(major_node) else {
            return Vec::new();
        };
        let mut levels = Vec::new();
        for div_node in self.graph.sources_of(major_node, EdgeKind::Required, NodeKind::Milestone) {
            let Some(division) = self.milestone(div_node) else { continue };
            for req_node in self.graph.sources_of(div_node, EdgeKind::Required, NodeKind::Milestone) {
                if let Some(requirement) = self.milestone(req_node) {
                    levels.push((major, division, req_node, requirement));
                }
            }
        }
        levels
    }

    fn major_direct_requirements(&self, major_id: &str) -> Vec<Row> {
        self.requirement_levels(major_id)
            .into_iter()
            .filter_map(|(major, division, req_node, requirement)| {
                let courses = self.keys(self.graph.sources_of(req_node, EdgeKind::IncludedIn, NodeKind::Course));
                (!courses.is_empty()).then(|| hierarchy_row(major, division, requirement).with("courses", courses))
            })
            .collect()
    }

    fn major_sequence_requirements(&self, major_id: &str) -> Vec<Row> {
        let mut rows = Vec::new();
        for (major, division, req_node, requirement) in self.requirement_levels(major_id) {
            for group in self.graph.sources_of(req_node, EdgeKind::IncludedIn, NodeKind::OrGroup) {
                let courses = self.keys(self.graph.sources_of(group, EdgeKind::Required, NodeKind::Course));
                if courses.is_empty() {
                    continue;
                }
                let path = self.graph.node(group).map(|n| n.key().to_string());
                rows.push(
                    hierarchy_row(major, division, requirement)
                        .with("path", path)
                        .with("courses", courses),
                );
            }
        }
        rows
    }

    /// All milestones ordered by `milestone_id`.
    fn milestones_by_id(&self) -> Vec<(NodeId, &Milestone)> {
        let mut milestones: Vec<_> = self
            .graph
            .nodes_of_kind(NodeKind::Milestone)
            .filter_map(|(id, node)| node.as_milestone().map(|m| (id, m)))
            .collect();
        milestones.sort_by(|a, b| a.1.milestone_id.cmp(&b.1.milestone_id));
        milestones
    }

    fn milestone_courses(&self) -> Vec<Row> {
        self.milestones_by_id()
            .into_iter()
            .filter_map(|(id, milestone)| {
                let courses = self.keys(self.graph.sources_of(id, EdgeKind::IncludedIn, NodeKind::Course));
                (!courses.is_empty()).then(|| {
                    Row::new()
                        .with("milestone_id", milestone.milestone_id.clone())
                        .with("title", milestone.title.clone())
                        .with("course_ids", courses)
                })
            })
            .collect()
    }

    fn milestone_or_groups(&self) -> Vec<Row> {
        self.milestones_by_id()
            .into_iter()
            .filter_map(|(id, milestone)| {
                let grouped: Vec<Value> = self
                    .graph
                    .sources_of(id, EdgeKind::IncludedIn, NodeKind::OrGroup)
                    .into_iter()
                    .map(|group| self.keys(self.graph.sources_of(group, EdgeKind::Required, NodeKind::Course)))
                    .filter(|courses| !courses.is_empty())
                    .map(Value::from)
                    .collect();
                (!grouped.is_empty()).then(|| {
                    Row::new()
                        .with("milestone_id", milestone.milestone_id.clone())
                        .with("title", milestone.title.clone())
                        .with("grouped_courses", grouped)
                })
            })
            .collect()
    }
}

fn opt(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::String)
}

fn hierarchy_row(major: &Milestone, division: &Milestone, requirement: &Milestone) -> Row {
    Row::new()
        .with("major_title", major.title.clone())
        .with("major_description", opt(&major.description))
        .with("division", division.milestone_id.clone())
        .with("division_description", opt(&division.description))
        .with("requirement", requirement.title.clone())
        .with("requirement_description", opt(&requirement.description))
        .with("units_required", requirement.units_required)
}

#[async_trait::async_trait]
impl GraphStore for MemoryStore {
    async fn run(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        let rows = match query {
            Query::CourseInfo { course_id } => self.course_info(course_id),
            Query::PrerequisiteGroups { course_id } => self
                .prerequisite_groups(course_id)
                .into_iter()
                .map(|(group_id, members)| {
                    Row::new()
                        .with("group_id", group_id)
                        .with("prereq_courses", members)
                })
                .collect(),
            Query::RequiredFor { course_id } => self.required_for(course_id),
            Query::MajorDirectRequirements { major_id } => self.major_direct_requirements(major_id),
            Query::MajorSequenceRequirements { major_id } => self.major_sequence_requirements(major_id),
            Query::MilestoneCourses => self.milestone_courses(),
            Query::MilestoneOrGroups => self.milestone_or_groups(),
        };
        tracing::debug!("memory store: {} -> {} rows", query.name(), rows.len());
        Ok(rows)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
