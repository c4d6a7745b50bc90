//! Named tools for an agent loop: one string in, one text observation out

use crate::error::ResolverError;
use crate::prerequisites::{format_prerequisites, NO_PREREQUISITES};
use crate::Resolver;
use advisor_store::GraphStore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    CourseInformation,
    ImmediatePrerequisites,
    TransitivePrerequisites,
    MajorRequirements,
    MilestoneGroups,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::CourseInformation,
        Tool::ImmediatePrerequisites,
        Tool::TransitivePrerequisites,
        Tool::MajorRequirements,
        Tool::MilestoneGroups,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::CourseInformation => "course_information",
            Tool::ImmediatePrerequisites => "immediate_prerequisites",
            Tool::TransitivePrerequisites => "transitive_prerequisites",
            Tool::MajorRequirements => "major_requirements",
            Tool::MilestoneGroups => "milestone_groups",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::CourseInformation => "Title, units and description of a course, e.g. \"MATH 20C\"",
            Tool::ImmediatePrerequisites => "Direct prerequisite courses of a course, grouped into alternatives",
            Tool::TransitivePrerequisites => "Every prerequisite reachable from a course, one line per course",
            Tool::MajorRequirements => "Division and requirement tree of a major, e.g. \"MA30\"",
            Tool::MilestoneGroups => "Courses grouped by degree milestone; input is ignored",
        }
    }

    pub fn from_name(name: &str) -> Result<Tool, ResolverError> {
        let name = name.trim();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ResolverError::UnknownTool(name.to_string()))
    }

    /// Run the tool and render its observation.
    pub async fn invoke<S: GraphStore>(self, resolver: &Resolver<S>, input: &str) -> Result<String, ResolverError> {
        tracing::debug!("Invoking tool {}", self.name());
        match self {
            Tool::CourseInformation => pretty(&resolver.lookup_course(input).await?),
            Tool::ImmediatePrerequisites => {
                let groups = resolver.immediate_prerequisites(input).await?;
                Ok(format_prerequisites(&groups))
            }
            Tool::TransitivePrerequisites => {
                let trace = resolver.transitive_prerequisites_text(input).await?;
                if trace.is_empty() {
                    Ok(NO_PREREQUISITES.to_string())
                } else {
                    Ok(trace)
                }
            }
            Tool::MajorRequirements => pretty(&resolver.major_requirements(input).await?),
            Tool::MilestoneGroups => pretty(&resolver.milestone_groups().await?),
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn pretty<T: Serialize>(value: &T) -> Result<String, ResolverError> {
    Ok(serde_json::to_string_pretty(value)?)
}
