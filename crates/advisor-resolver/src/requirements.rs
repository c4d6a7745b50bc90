//! Major requirement aggregation
//!
//! Two traversals feed one tree: the direct query yields a flat pick-list per
//! requirement, the sequence query yields one alternative course path per row.
//! Divisions and requirements keep first-seen order.

use crate::error::ResolverError;
use crate::Resolver;
use advisor_store::{GraphStore, Query, Row};
use serde::{Serialize, Serializer};
use std::fmt;

/// Nested major → division → requirement structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementTree {
    #[serde(rename = "major ID")]
    pub major_id: String,
    pub title: String,
    pub description: Option<String>,
    pub curriculum: Vec<Division>,
}

impl RequirementTree {
    pub fn division(&self, division: &str) -> Option<&Division> {
        self.curriculum.iter().find(|d| d.division == division)
    }

    /// Look up a requirement by title across all divisions.
    pub fn requirement(&self, study: &str) -> Option<&Requirement> {
        self.curriculum.iter().flat_map(|d| d.requirements.iter()).find(|r| r.study == study)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Division {
    pub division: String,
    pub description: Option<String>,
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirement {
    pub study: String,
    pub description: Option<String>,
    #[serde(rename = "needed to satisfy")]
    pub needed: Needed,
    #[serde(rename = "select from")]
    pub select_from: RequirementSelection,
}

/// How much of `select from` a student must complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Needed {
    OneCourse,
    /// Whole or fractional, rendered as stored: `4 units`, `2.5 units`.
    Units(f64),
    OneSequencePath,
}

impl Needed {
    /// Zero or missing units mean a single course.
    pub fn from_units(units: Option<f64>) -> Self {
        match units {
            Some(n) if n != 0.0 => Needed::Units(n),
            _ => Needed::OneCourse,
        }
    }
}

impl fmt::Display for Needed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Needed::OneCourse => f.write_str("one course"),
            Needed::Units(n) => write!(f, "{} units", n),
            Needed::OneSequencePath => f.write_str("one sequence path"),
        }
    }
}

impl Serialize for Needed {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_str(self)
    }
}

/// Either a flat pick-list or a list of interchangeable course sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequirementSelection {
    DirectCourses(Vec<String>),
    AlternativeSequences(Vec<Vec<String>>),
}

impl RequirementSelection {
    fn extend_courses(&mut self, courses: Vec<String>) {
        match self {
            RequirementSelection::DirectCourses(existing) => {
                for course in courses {
                    if !existing.contains(&course) {
                        existing.push(course);
                    }
                }
            }
            RequirementSelection::AlternativeSequences(paths) => {
                paths.extend(courses.into_iter().map(|c| vec![c]));
            }
        }
    }

    fn push_sequence(&mut self, path: Vec<String>) {
        if let RequirementSelection::DirectCourses(courses) = self {
            let singles = std::mem::take(courses).into_iter().map(|c| vec![c]).collect();
            *self = RequirementSelection::AlternativeSequences(singles);
        }
        if let RequirementSelection::AlternativeSequences(paths) = self {
            paths.push(path);
        }
    }
}

/// One parsed row from either requirement query.
struct LevelRow {
    major_title: String,
    major_description: Option<String>,
    division: String,
    division_description: Option<String>,
    requirement: String,
    requirement_description: Option<String>,
    units_required: Option<f64>,
    courses: Vec<String>,
}

impl LevelRow {
    fn parse(row: &Row) -> Result<Self, ResolverError> {
        Ok(LevelRow {
            major_title: row.str("major_title")?,
            major_description: row.opt_str("major_description")?,
            division: row.str("division")?,
            division_description: row.opt_str("division_description")?,
            requirement: row.str("requirement")?,
            requirement_description: row.opt_str("requirement_description")?,
            units_required: row.units("units_required")?,
            courses: row.strings("courses")?,
        })
    }
}

/// Merge the direct and sequence query rows for `major_id` into one tree.
///
/// Every row is parsed before anything is merged, so a malformed row fails
/// the whole call.
pub fn build_requirement_tree(major_id: &str, direct_rows: &[Row], sequence_rows: &[Row]) -> Result<RequirementTree, ResolverError> {
    let direct = direct_rows.iter().map(LevelRow::parse).collect::<Result<Vec<_>, _>>()?;
    let sequences = sequence_rows.iter().map(LevelRow::parse).collect::<Result<Vec<_>, _>>()?;

    let Some(first) = direct.first() else {
        return Err(ResolverError::MajorNotFound {
            major_id: major_id.to_string(),
        });
    };

    let mut tree = RequirementTree {
        major_id: major_id.to_string(),
        title: first.major_title.clone(),
        description: first.major_description.clone(),
        curriculum: Vec::new(),
    };

    for row in direct {
        let division = division_entry(&mut tree.curriculum, &row);
        match division.requirements.iter_mut().find(|r| r.study == row.requirement) {
            Some(existing) => existing.select_from.extend_courses(row.courses),
            None => division.requirements.push(Requirement {
                study: row.requirement,
                description: row.requirement_description,
                needed: Needed::from_units(row.units_required),
                select_from: RequirementSelection::DirectCourses(row.courses),
            }),
        }
    }

    for row in sequences {
        let division = division_entry(&mut tree.curriculum, &row);
        let index = match division.requirements.iter().position(|r| r.study == row.requirement) {
            Some(index) => index,
            None => {
                division.requirements.push(Requirement {
                    study: row.requirement.clone(),
                    description: row.requirement_description.clone(),
                    needed: Needed::OneSequencePath,
                    select_from: RequirementSelection::AlternativeSequences(Vec::new()),
                });
                division.requirements.len() - 1
            }
        };
        let requirement = &mut division.requirements[index];
        if matches!(requirement.select_from, RequirementSelection::DirectCourses(_)) {
            tracing::warn!(
                "Requirement '{}' of {} has both direct courses and sequence paths; treating courses as one-course paths",
                requirement.study,
                major_id
            );
        }
        requirement.select_from.push_sequence(row.courses);
    }

    Ok(tree)
}

fn division_entry<'a>(curriculum: &'a mut Vec<Division>, row: &LevelRow) -> &'a mut Division {
    let index = match curriculum.iter().position(|d| d.division == row.division) {
        Some(index) => index,
        None => {
            curriculum.push(Division {
                division: row.division.clone(),
                description: row.division_description.clone(),
                requirements: Vec::new(),
            });
            curriculum.len() - 1
        }
    };
    &mut curriculum[index]
}

impl<S: GraphStore> Resolver<S> {
    /// Requirement tree for an allow-listed major.
    pub async fn major_requirements(&self, input: &str) -> Result<RequirementTree, ResolverError> {
        let major_id = self.majors.validate(input)?;
        let direct = self
            .fetch(Query::MajorDirectRequirements {
                major_id: major_id.clone(),
            })
            .await?;
        let sequences = self
            .fetch(Query::MajorSequenceRequirements {
                major_id: major_id.clone(),
            })
            .await?;
        tracing::debug!("{}: {} direct rows, {} sequence rows", major_id, direct.len(), sequences.len());
        build_requirement_tree(&major_id, &direct, &sequences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn level(division: &str, requirement: &str, units: Option<u32>, courses: &[&str]) -> Row {
        Row::new()
            .with("major_title", "Mathematics-Computer Science")
            .with("major_description", json!(null))
            .with("division", division)
            .with("division_description", json!(null))
            .with("requirement", requirement)
            .with("requirement_description", json!(null))
            .with("units_required", units)
            .with("courses", courses.iter().map(|c| c.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_needed_rendering() {
        assert_eq!(Needed::from_units(Some(0.0)).to_string(), "one course");
        assert_eq!(Needed::from_units(None).to_string(), "one course");
        assert_eq!(Needed::from_units(Some(8.0)).to_string(), "8 units");
        assert_eq!(Needed::from_units(Some(2.5)).to_string(), "2.5 units");
        assert_eq!(serde_json::to_value(Needed::OneSequencePath).unwrap(), json!("one sequence path"));
    }

    #[test]
    fn test_fractional_units_render_as_stored() {
        let direct = vec![
            Row::new()
                .with("major_title", "Mathematics-Computer Science")
                .with("division", "Upper Division")
                .with("requirement", "Seminar")
                .with("units_required", 2.5)
                .with("courses", json!(["MATH 196"])),
        ];
        let tree = build_requirement_tree("MA30", &direct, &[]).unwrap();
        let seminar = tree.requirement("Seminar").unwrap();
        assert_eq!(seminar.needed, Needed::Units(2.5));

        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value["curriculum"][0]["requirements"][0]["needed to satisfy"], "2.5 units");
    }

    #[test]
    fn test_no_direct_rows_is_major_not_found() {
        let sequences = vec![level("Lower Division", "Programming", Some(0), &["CSE 11", "CSE 12"])];
        let err = build_requirement_tree("MA30", &[], &sequences).unwrap_err();
        assert!(matches!(err, ResolverError::MajorNotFound { ref major_id } if major_id == "MA30"));
    }

    #[test]
    fn test_divisions_and_requirements_keep_first_seen_order() {
        let direct = vec![
            level("Upper Division", "Core", Some(0), &["CSE 100"]),
            level("Lower Division", "Calculus", Some(4), &["MATH 20A"]),
            level("Upper Division", "Electives", Some(8), &["MATH 109"]),
        ];
        let tree = build_requirement_tree("MA30", &direct, &[]).unwrap();
        let divisions: Vec<&str> = tree.curriculum.iter().map(|d| d.division.as_str()).collect();
        assert_eq!(divisions, vec!["Upper Division", "Lower Division"]);
        let upper: Vec<&str> = tree.curriculum[0].requirements.iter().map(|r| r.study.as_str()).collect();
        assert_eq!(upper, vec!["Core", "Electives"]);
    }

    #[test]
    fn test_repeated_direct_rows_extend_the_pick_list() {
        let direct = vec![
            level("Lower Division", "Calculus", Some(4), &["MATH 20A", "MATH 20B"]),
            level("Lower Division", "Calculus", Some(4), &["MATH 20B", "MATH 20C"]),
        ];
        let tree = build_requirement_tree("MA30", &direct, &[]).unwrap();
        assert_eq!(
            tree.requirement("Calculus").unwrap().select_from,
            RequirementSelection::DirectCourses(vec!["MATH 20A".into(), "MATH 20B".into(), "MATH 20C".into()])
        );
    }

    #[test]
    fn test_sequence_rows_accumulate_paths() {
        let direct = vec![level("Lower Division", "Calculus", Some(4), &["MATH 20A"])];
        let sequences = vec![
            level("Lower Division", "Programming", Some(0), &["CSE 8A", "CSE 8B", "CSE 12"]),
            level("Lower Division", "Programming", Some(0), &["CSE 11", "CSE 12"]),
        ];
        let tree = build_requirement_tree("MA30", &direct, &sequences).unwrap();
        let programming = tree.requirement("Programming").unwrap();
        assert_eq!(programming.needed, Needed::OneSequencePath);
        assert_eq!(
            serde_json::to_value(&programming.select_from).unwrap(),
            json!([["CSE 8A", "CSE 8B", "CSE 12"], ["CSE 11", "CSE 12"]])
        );
    }

    #[test]
    fn test_sequence_on_direct_requirement_converts_courses() {
        let direct = vec![level("Lower Division", "Programming", Some(4), &["CSE 11"])];
        let sequences = vec![level("Lower Division", "Programming", Some(0), &["CSE 8A", "CSE 8B"])];
        let tree = build_requirement_tree("MA30", &direct, &sequences).unwrap();
        let programming = tree.requirement("Programming").unwrap();
        assert_eq!(programming.needed, Needed::Units(4.0));
        assert_eq!(
            programming.select_from,
            RequirementSelection::AlternativeSequences(vec![vec!["CSE 11".into()], vec!["CSE 8A".into(), "CSE 8B".into()]])
        );
    }

    #[test]
    fn test_malformed_row_fails_whole_call() {
        let direct = vec![
            level("Lower Division", "Calculus", Some(4), &["MATH 20A"]),
            Row::new().with("division", "Upper Division"),
        ];
        let err = build_requirement_tree("MA30", &direct, &[]).unwrap_err();
        assert!(matches!(err, ResolverError::Store(_)));
    }

    #[test]
    fn test_serialized_keys() {
        let direct = vec![level("Lower Division", "Calculus", Some(4), &["MATH 20A", "MATH 20B"])];
        let tree = build_requirement_tree("MA30", &direct, &[]).unwrap();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value["major ID"], "MA30");
        assert_eq!(value["curriculum"][0]["requirements"][0]["needed to satisfy"], "4 units");
        assert_eq!(value["curriculum"][0]["requirements"][0]["select from"], json!(["MATH 20A", "MATH 20B"]));
    }
}
