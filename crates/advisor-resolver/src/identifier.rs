//! Course identifier validation and the major allow-list

use crate::error::ResolverError;
use advisor_core::AdvisorConfig;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Department letters, one whitespace, number, optional suffix letters.
pub const COURSE_ID_PATTERN: &str = r"^[A-Z]+\s\d+[A-Z]*$";

static COURSE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COURSE_ID_PATTERN).expect("course id pattern compiles"));

/// Trim, drop backticks, keep only the first line.
///
/// Agent tool inputs routinely arrive wrapped in markdown or followed by
/// extra commentary; none of that may reach the store.
pub fn normalize_course_id(input: &str) -> String {
    let cleaned = input.trim().replace('`', "");
    cleaned.split('\n').next().unwrap_or_default().to_string()
}

/// Normalize `input` and require it to look like `"MATH 20C"`.
pub fn validate_course_id(input: &str) -> Result<String, ResolverError> {
    let course_id = normalize_course_id(input);
    if COURSE_ID.is_match(&course_id) {
        Ok(course_id)
    } else {
        Err(ResolverError::InvalidIdentifier {
            input: input.to_string(),
        })
    }
}

/// Majors the resolver is allowed to query, by human-readable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MajorRegistry {
    majors: BTreeMap<String, String>,
}

impl MajorRegistry {
    pub fn new(majors: BTreeMap<String, String>) -> Self {
        Self { majors }
    }

    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self::new(config.majors.clone())
    }

    /// Accept `input` only if it is a configured major identifier.
    pub fn validate(&self, input: &str) -> Result<String, ResolverError> {
        let major_id = input.trim();
        if self.majors.values().any(|id| id == major_id) {
            Ok(major_id.to_string())
        } else {
            Err(ResolverError::InvalidMajorIdentifier {
                input: input.to_string(),
                allowed: self.majors.values().cloned().collect::<Vec<_>>().join(", "),
            })
        }
    }

    /// `(name, identifier)` pairs, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.majors.iter().map(|(name, id)| (name.as_str(), id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.majors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.majors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_ids_pass() {
        for id in ["MATH 18", "MATH 20C", "CSE 8A", "CSE 100", "DSC 10", "ECE 35", "COGS 118AB", "A 1"] {
            assert_eq!(validate_course_id(id).unwrap(), id, "{id} should validate");
        }
    }

    #[test]
    fn test_normalization() {
        assert_eq!(validate_course_id("  MATH 20C \n").unwrap(), "MATH 20C");
        assert_eq!(validate_course_id("`MATH 20C`").unwrap(), "MATH 20C");
        assert_eq!(validate_course_id("MATH 20C\nplease and thanks").unwrap(), "MATH 20C");
        assert_eq!(validate_course_id("```\nMATH 20C").unwrap_err().to_string(), "Course ID must be in format like \"MATH 18\" or \"MATH 20C\"");
    }

    #[test]
    fn test_malformed_ids_fail() {
        for id in [
            "",
            "math 20c",
            "MATH20C",
            "MATH  20C",
            "MATH 20c",
            "20C",
            "MATH",
            "MATH 20C!",
            "MATH-20C",
            "MATH 20C; MATCH (n) DETACH DELETE n",
            "MATH 20C extra",
        ] {
            let err = validate_course_id(id).unwrap_err();
            assert!(
                matches!(err, ResolverError::InvalidIdentifier { .. }),
                "{id:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_major_registry() {
        let registry = MajorRegistry::from_config(&AdvisorConfig::default());
        assert_eq!(registry.validate("MA30").unwrap(), "MA30");
        assert_eq!(registry.validate(" MA30 ").unwrap(), "MA30");
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec![("Math-CS", "MA30")]);

        match registry.validate("Math-CS").unwrap_err() {
            ResolverError::InvalidMajorIdentifier { allowed, .. } => assert_eq!(allowed, "MA30"),
            other => panic!("unexpected: {other}"),
        }
        assert!(registry.validate("CS26").is_err());
    }
}
