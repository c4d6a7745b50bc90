//! Core data structures for the course graph

use serde::{Deserialize, Serialize};

/// Stable identifier for a node inside a [`crate::Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

/// Stable identifier for an edge inside a [`crate::Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u64);

/// Discriminates what kind of entity a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A single enrollable course, keyed by `course_id` ("MATH 20C").
    Course,
    /// A disjunctive set of courses, keyed by `group_id`.
    OrGroup,
    /// A major, division or requirement node, keyed by `milestone_id`.
    Milestone,
}

/// What kind of relationship an edge represents.
///
/// Directions, as stored:
/// - `OrGroup -Required-> Course`: the group is a prerequisite slot of the course
/// - `Course -IncludedIn-> OrGroup`: the course is one option of the group
/// - `Milestone -Required-> Milestone`: child milestone belongs to its parent
/// - `Course -IncludedIn-> Milestone`: the course directly satisfies a requirement
/// - `OrGroup -IncludedIn-> Milestone`: the group is one sequence path of a requirement
/// - `Course -Required-> OrGroup`: the course is a step of a sequence path
/// - `Milestone -Requires-> OrGroup`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Required,
    IncludedIn,
    Requires,
}

/// Descriptive attributes of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Kept as text: catalogs use both `4` and `2-4`.
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Course {
    /// A course known only by its identifier.
    pub fn stub(course_id: impl Into<String>) -> Self {
        Course {
            course_id: course_id.into(),
            title: None,
            units: None,
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrGroup {
    pub group_id: String,
}

/// A node of the major → division → requirement hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub milestone_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Only meaningful on leaf requirement milestones.
    #[serde(default)]
    pub units_required: Option<u32>,
}

/// A single node in the course graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphNode {
    Course(Course),
    OrGroup(OrGroup),
    Milestone(Milestone),
}

impl GraphNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            GraphNode::Course(_) => NodeKind::Course,
            GraphNode::OrGroup(_) => NodeKind::OrGroup,
            GraphNode::Milestone(_) => NodeKind::Milestone,
        }
    }

    /// The identifier this node is looked up by.
    pub fn key(&self) -> &str {
        match self {
            GraphNode::Course(c) => &c.course_id,
            GraphNode::OrGroup(g) => &g.group_id,
            GraphNode::Milestone(m) => &m.milestone_id,
        }
    }

    pub fn as_course(&self) -> Option<&Course> {
        match self {
            GraphNode::Course(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_milestone(&self) -> Option<&Milestone> {
        match self {
            GraphNode::Milestone(m) => Some(m),
            _ => None,
        }
    }
}

/// A directed edge in the course graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}
