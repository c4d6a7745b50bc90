//! Immediate and transitive prerequisite resolution
//!
//! A course's prerequisites are a conjunction of OrGroups: every group must be
//! satisfied, and any one member course satisfies a group. Single-member
//! groups render as plain terms.

use crate::error::ResolverError;
use crate::identifier::validate_course_id;
use crate::Resolver;
use advisor_store::{GraphStore, Query};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// Answer for a course with no incoming prerequisite groups.
pub const NO_PREREQUISITES: &str = "This course has no prerequisites.";

/// One OrGroup and its member courses, in store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrerequisiteGroup {
    pub group_id: String,
    pub courses: Vec<String>,
}

/// Render groups for a direct answer:
/// `Prerequisites: MATH 20B AND (MATH 10B OR MATH 20B)`.
pub fn format_prerequisites(groups: &[PrerequisiteGroup]) -> String {
    if groups.is_empty() {
        return NO_PREREQUISITES.to_string();
    }
    let terms: Vec<String> = groups
        .iter()
        .map(|group| match group.courses.as_slice() {
            [only] => only.clone(),
            courses => format!("({})", courses.join(" OR ")),
        })
        .collect();
    format!("Prerequisites: {}", terms.join(" AND "))
}

/// One conjunct of a course's prerequisites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrerequisiteTerm {
    Course(String),
    AnyOf(Vec<String>),
}

impl PrerequisiteTerm {
    fn from_group(courses: &[String]) -> Self {
        match courses {
            [only] => PrerequisiteTerm::Course(only.clone()),
            _ => PrerequisiteTerm::AnyOf(courses.to_vec()),
        }
    }

    /// Trace fragment: `(MATH 20B)` or `(MATH 10B or MATH 20B)`.
    fn trace_fragment(&self) -> String {
        match self {
            PrerequisiteTerm::Course(course) => format!("({})", course),
            PrerequisiteTerm::AnyOf(courses) => format!("({})", courses.join(" or ")),
        }
    }
}

// `"MATH 20B"` or `{"type": "OR", "courses": [...]}`
impl Serialize for PrerequisiteTerm {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            PrerequisiteTerm::Course(course) => serializer.serialize_str(course),
            PrerequisiteTerm::AnyOf(courses) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "OR")?;
                map.serialize_entry("courses", courses)?;
                map.end()
            }
        }
    }
}

/// Prerequisite terms of one expanded course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDependencies {
    pub course: String,
    pub requires: Vec<PrerequisiteTerm>,
}

/// Result of a transitive prerequisite walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrerequisiteClosure {
    pub root: String,
    /// Every course expanded, in expansion order, each exactly once.
    pub visited: Vec<String>,
    /// Courses with at least one prerequisite group, in expansion order.
    pub dependencies: Vec<CourseDependencies>,
}

impl PrerequisiteClosure {
    /// `MATH 20C: (MATH 20B) and (MATH 10B or MATH 20B)`, one per dependent course.
    pub fn trace_lines(&self) -> Vec<String> {
        self.dependencies
            .iter()
            .map(|dep| {
                let fragments: Vec<String> = dep.requires.iter().map(PrerequisiteTerm::trace_fragment).collect();
                format!("{}: {}", dep.course, fragments.join(" and "))
            })
            .collect()
    }
}

impl fmt::Display for PrerequisiteClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trace_lines().join("\n"))
    }
}

impl<S: GraphStore> Resolver<S> {
    /// Direct OrGroups of a course, ordered by group id.
    pub async fn immediate_prerequisites(&self, input: &str) -> Result<Vec<PrerequisiteGroup>, ResolverError> {
        let course_id = validate_course_id(input)?;
        self.prerequisite_groups(&course_id).await
    }

    /// [`Self::immediate_prerequisites`] rendered for a direct answer.
    pub async fn immediate_prerequisites_text(&self, input: &str) -> Result<String, ResolverError> {
        let groups = self.immediate_prerequisites(input).await?;
        Ok(format_prerequisites(&groups))
    }

    /// Breadth-first closure over [`Self::immediate_prerequisites`].
    ///
    /// Each course is expanded at most once, so cycles terminate. The walk
    /// uses a FIFO queue, which makes the expansion order reproducible.
    pub async fn transitive_prerequisites(&self, input: &str) -> Result<PrerequisiteClosure, ResolverError> {
        let root = validate_course_id(input)?;

        let mut queue = VecDeque::from([root.clone()]);
        let mut discovered: HashSet<String> = HashSet::from([root.clone()]);
        let mut visited = Vec::new();
        let mut dependencies = Vec::new();

        while let Some(current) = queue.pop_front() {
            if visited.len() >= self.max_expansions {
                tracing::warn!("Prerequisite walk from {} hit the {} expansion limit", root, self.max_expansions);
                return Err(ResolverError::ExpansionLimit {
                    course_id: root,
                    limit: self.max_expansions,
                });
            }

            // Identifiers coming back from the store are held to the same format
            let course_id = validate_course_id(&current)?;
            let groups = self.prerequisite_groups(&course_id).await?;
            tracing::debug!("Expanded {}: {} prerequisite groups", course_id, groups.len());
            visited.push(course_id.clone());

            if groups.is_empty() {
                continue;
            }

            let mut requires = Vec::with_capacity(groups.len());
            for group in &groups {
                requires.push(PrerequisiteTerm::from_group(&group.courses));
                for member in &group.courses {
                    if discovered.insert(member.clone()) {
                        queue.push_back(member.clone());
                    }
                }
            }
            dependencies.push(CourseDependencies {
                course: course_id,
                requires,
            });
        }

        Ok(PrerequisiteClosure {
            root,
            visited,
            dependencies,
        })
    }

    /// Newline-joined trace of [`Self::transitive_prerequisites`].
    pub async fn transitive_prerequisites_text(&self, input: &str) -> Result<String, ResolverError> {
        Ok(self.transitive_prerequisites(input).await?.to_string())
    }

    /// Raw groups for an already validated course id.
    pub(crate) async fn prerequisite_groups(&self, course_id: &str) -> Result<Vec<PrerequisiteGroup>, ResolverError> {
        let rows = self
            .fetch(Query::PrerequisiteGroups {
                course_id: course_id.to_string(),
            })
            .await?;
        rows.iter()
            .map(|row| -> Result<PrerequisiteGroup, ResolverError> {
                Ok(PrerequisiteGroup {
                    group_id: row.str("group_id")?,
                    courses: row.strings("prereq_courses")?,
                })
            })
            .collect()
    }
}
