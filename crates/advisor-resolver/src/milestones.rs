//! Milestone title → course grouping

use crate::error::ResolverError;
use crate::Resolver;
use advisor_store::{GraphStore, Query};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A course counted directly toward a milestone, or a set of alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MilestoneEntry {
    Course(String),
    Group(Vec<String>),
}

/// Entries per milestone title, in first-seen order.
///
/// Serializes as a JSON object keyed by title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestoneGroups {
    groups: Vec<(String, Vec<MilestoneEntry>)>,
}

impl MilestoneGroups {
    pub fn get(&self, title: &str) -> Option<&[MilestoneEntry]> {
        self.groups
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(t, _)| t.as_str())
    }

    fn entries_mut(&mut self, title: String) -> &mut Vec<MilestoneEntry> {
        let index = match self.groups.iter().position(|(t, _)| *t == title) {
            Some(index) => index,
            None => {
                self.groups.push((title, Vec::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].1
    }
}

impl Serialize for MilestoneGroups {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (title, entries) in &self.groups {
            map.serialize_entry(title, entries)?;
        }
        map.end()
    }
}

impl<S: GraphStore> Resolver<S> {
    /// Every milestone's direct courses followed by its OrGroup alternatives.
    pub async fn milestone_groups(&self) -> Result<MilestoneGroups, ResolverError> {
        let direct = self.fetch(Query::MilestoneCourses).await?;
        let grouped = self.fetch(Query::MilestoneOrGroups).await?;

        let mut groups = MilestoneGroups::default();
        for row in &direct {
            let title = row.str("title")?;
            let courses = row.strings("course_ids")?;
            groups
                .entries_mut(title)
                .extend(courses.into_iter().map(MilestoneEntry::Course));
        }
        for row in &grouped {
            let title = row.str("title")?;
            let sets = row.string_lists("grouped_courses")?;
            groups
                .entries_mut(title)
                .extend(sets.into_iter().map(MilestoneEntry::Group));
        }
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_serialize_as_ordered_object() {
        let mut groups = MilestoneGroups::default();
        groups.entries_mut("Zeta".to_string()).push(MilestoneEntry::Course("CSE 12".to_string()));
        groups
            .entries_mut("Alpha".to_string())
            .push(MilestoneEntry::Group(vec!["CSE 11".to_string(), "CSE 8B".to_string()]));
        groups.entries_mut("Zeta".to_string()).push(MilestoneEntry::Course("CSE 21".to_string()));

        assert_eq!(groups.titles().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
        insta::assert_snapshot!(
            serde_json::to_string(&groups).unwrap(),
            @r#"{"Zeta":["CSE 12","CSE 21"],"Alpha":[["CSE 11","CSE 8B"]]}"#
        );
    }
}
