//! Single-course lookups

use crate::error::ResolverError;
use crate::identifier::validate_course_id;
use crate::prerequisites::PrerequisiteGroup;
use crate::Resolver;
use advisor_store::{GraphStore, Query, Row};
use serde::Serialize;

/// Descriptive attributes of one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecord {
    pub id: String,
    pub title: Option<String>,
    pub units: Option<String>,
    pub description: Option<String>,
}

impl CourseRecord {
    fn from_row(row: &Row) -> Result<Self, ResolverError> {
        Ok(CourseRecord {
            id: row.str("id")?,
            title: row.opt_str("title")?,
            units: row.opt_str("units")?,
            description: row.opt_str("description")?,
        })
    }
}

/// A course together with its direct prerequisites and the milestones that require it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseContext {
    #[serde(flatten)]
    pub course: CourseRecord,
    pub prerequisites: Vec<PrerequisiteGroup>,
    pub required_for: Vec<String>,
}

impl<S: GraphStore> Resolver<S> {
    /// Fetch a course's attributes; no traversal.
    pub async fn lookup_course(&self, input: &str) -> Result<CourseRecord, ResolverError> {
        let course_id = validate_course_id(input)?;
        let rows = self
            .fetch(Query::CourseInfo {
                course_id: course_id.clone(),
            })
            .await?;
        match rows.first() {
            Some(row) => CourseRecord::from_row(row),
            None => Err(ResolverError::NotFound { course_id }),
        }
    }

    /// Course record plus direct prerequisite groups and `required_for` milestones.
    pub async fn course_context(&self, input: &str) -> Result<CourseContext, ResolverError> {
        let course = self.lookup_course(input).await?;
        let prerequisites = self.prerequisite_groups(&course.id).await?;
        let required_for = self
            .fetch(Query::RequiredFor {
                course_id: course.id.clone(),
            })
            .await?
            .iter()
            .map(|row| row.str("milestone_id"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CourseContext {
            course,
            prerequisites,
            required_for,
        })
    }
}
