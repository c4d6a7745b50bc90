//! The closed set of read-only queries the resolver issues

use serde_json::{Map, Value};

/// A named, parameterized read-only query.
///
/// Hosted stores run [`Query::cypher`] with [`Query::params`]; the in-memory
/// store evaluates the variant directly and yields rows with the same aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// One course's attributes. Aliases: `id`, `title`, `units`, `description`.
    CourseInfo { course_id: String },
    /// Direct prerequisite OrGroups of a course, ordered by group id.
    /// Aliases: `group_id`, `prereq_courses`.
    PrerequisiteGroups { course_id: String },
    /// Milestones that REQUIRE one of the course's prerequisite groups.
    /// Aliases: `milestone_id`.
    RequiredFor { course_id: String },
    /// major ← division ← requirement ← course.
    MajorDirectRequirements { major_id: String },
    /// major ← division ← requirement ← OrGroup ← course, one row per sequence path.
    MajorSequenceRequirements { major_id: String },
    /// Courses INCLUDED_IN each milestone. Aliases: `milestone_id`, `title`, `course_ids`.
    MilestoneCourses,
    /// OrGroup course lists per milestone. Aliases: `milestone_id`, `title`, `grouped_courses`.
    MilestoneOrGroups,
}

const COURSE_INFO: &str = r#"
MATCH (c:Course {course_id: $course_id})
RETURN
    c.course_id AS id,
    c.title AS title,
    c.units AS units,
    c.description AS description
"#;

const PREREQUISITE_GROUPS: &str = r#"
MATCH (c:Course {course_id: $course_id})
MATCH (og:OrGroup)-[:REQUIRED]->(c)
MATCH (prereq:Course)-[:INCLUDED_IN]->(og)
RETURN og.group_id AS group_id,
    collect(prereq.course_id) AS prereq_courses
ORDER BY og.group_id
"#;

const REQUIRED_FOR: &str = r#"
MATCH (c:Course {course_id: $course_id})
MATCH (m:Milestone)-[:REQUIRES]->(og:OrGroup)-[:REQUIRED]->(c)
RETURN DISTINCT m.milestone_id AS milestone_id
ORDER BY milestone_id
"#;

const MAJOR_DIRECT_REQUIREMENTS: &str = r#"
MATCH (major:Milestone {milestone_id: $major_id})
MATCH (div:Milestone)-[:REQUIRED]->(major)
MATCH (require:Milestone)-[:REQUIRED]->(div)
MATCH (c:Course)-[:INCLUDED_IN]->(require)
RETURN major.title AS major_title, major.description AS major_description,
    div.milestone_id AS division, div.description AS division_description,
    require.title AS requirement, require.description AS requirement_description,
    require.units_required AS units_required,
    collect(c.course_id) AS courses
"#;

const MAJOR_SEQUENCE_REQUIREMENTS: &str = r#"
MATCH (major:Milestone {milestone_id: $major_id})
MATCH (div:Milestone)-[:REQUIRED]->(major)
MATCH (require:Milestone)-[:REQUIRED]->(div)
MATCH (og:OrGroup)-[:INCLUDED_IN]->(require)
MATCH (c:Course)-[:REQUIRED]->(og)
RETURN major.title AS major_title, major.description AS major_description,
    div.milestone_id AS division, div.description AS division_description,
    require.title AS requirement, require.description AS requirement_description,
    require.units_required AS units_required,
    og.group_id AS path,
    collect(c.course_id) AS courses
"#;

const MILESTONE_COURSES: &str = r#"
MATCH (c:Course)-[:INCLUDED_IN]->(m:Milestone)
RETURN m.milestone_id AS milestone_id,
    m.title AS title,
    collect(c.course_id) AS course_ids
ORDER BY m.milestone_id
"#;

const MILESTONE_OR_GROUPS: &str = r#"
MATCH (m:Milestone)<-[:INCLUDED_IN]-(og:OrGroup)<-[:REQUIRED]-(c:Course)
WITH m.milestone_id AS milestone_id, m.title AS title,
    og.group_id AS or_group_id, collect(c.course_id) AS courses
WITH milestone_id, title, collect(courses) AS grouped_courses
RETURN milestone_id, title, grouped_courses
ORDER BY milestone_id
"#;

impl Query {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Query::CourseInfo { .. } => "course_info",
            Query::PrerequisiteGroups { .. } => "prerequisite_groups",
            Query::RequiredFor { .. } => "required_for",
            Query::MajorDirectRequirements { .. } => "major_direct_requirements",
            Query::MajorSequenceRequirements { .. } => "major_sequence_requirements",
            Query::MilestoneCourses => "milestone_courses",
            Query::MilestoneOrGroups => "milestone_or_groups",
        }
    }

    /// Cypher text for hosted graph stores.
    pub fn cypher(&self) -> &'static str {
        match self {
            Query::CourseInfo { .. } => COURSE_INFO,
            Query::PrerequisiteGroups { .. } => PREREQUISITE_GROUPS,
            Query::RequiredFor { .. } => REQUIRED_FOR,
            Query::MajorDirectRequirements { .. } => MAJOR_DIRECT_REQUIREMENTS,
            Query::MajorSequenceRequirements { .. } => MAJOR_SEQUENCE_REQUIREMENTS,
            Query::MilestoneCourses => MILESTONE_COURSES,
            Query::MilestoneOrGroups => MILESTONE_OR_GROUPS,
        }
    }

    /// Named parameters referenced by [`Query::cypher`].
    pub fn params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        match self {
            Query::CourseInfo { course_id }
            | Query::PrerequisiteGroups { course_id }
            | Query::RequiredFor { course_id } => {
                params.insert("course_id".to_string(), Value::String(course_id.clone()));
            }
            Query::MajorDirectRequirements { major_id }
            | Query::MajorSequenceRequirements { major_id } => {
                params.insert("major_id".to_string(), Value::String(major_id.clone()));
            }
            Query::MilestoneCourses | Query::MilestoneOrGroups => {}
        }
        params
    }
}
