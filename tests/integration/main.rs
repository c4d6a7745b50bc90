//! Integration tests for the advisor
//!
//! These drive config loading, store creation and the resolver together
//! over the sample catalog.

use advisor_core::AdvisorConfig;
use advisor_resolver::{Resolver, ResolverError, Tool};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_CATALOG: &str = include_str!("../../fixtures/catalog.json");

/// Write a config plus catalog into `dir` and open a resolver through it.
fn open(dir: &Path, config_toml: &str) -> Resolver {
    fs::write(dir.join("catalog.json"), SAMPLE_CATALOG).unwrap();
    let config_path = dir.join("advisor.toml");
    fs::write(&config_path, config_toml).unwrap();

    let config = AdvisorConfig::from_file(&config_path).unwrap();
    let store = advisor_store::create_store(&config.store).unwrap();
    Resolver::from_config(store, &config)
}

const MEMORY_CONFIG: &str = r#"
[store]
backend = "memory"
catalog = "catalog.json"
"#;

#[tokio::test]
async fn test_end_to_end_prerequisites() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = open(temp_dir.path(), MEMORY_CONFIG);

    assert_eq!(
        resolver.immediate_prerequisites_text("MATH 20C").await.unwrap(),
        "Prerequisites: MATH 20B AND (MATH 10B OR MATH 20B)"
    );

    let trace = resolver.transitive_prerequisites_text("CSE 30").await.unwrap();
    insta::assert_snapshot!(trace, @r"
    CSE 30: (CSE 12)
    CSE 12: (CSE 8B or CSE 11)
    CSE 8B: (CSE 8A)
    ");
}

#[tokio::test]
async fn test_end_to_end_major_requirements() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = open(temp_dir.path(), MEMORY_CONFIG);

    let tree = resolver.major_requirements("MA30").await.unwrap();
    let value = serde_json::to_value(&tree).unwrap();

    assert_eq!(value["major ID"], "MA30");
    assert_eq!(value["description"], "B.S. in Mathematics-Computer Science");
    assert_eq!(value["curriculum"][0]["division"], "Lower Division");
    assert_eq!(value["curriculum"][0]["description"], "Lower-division preparation");

    let lower = &value["curriculum"][0]["requirements"];
    assert_eq!(lower[0]["study"], "Calculus");
    assert_eq!(lower[0]["needed to satisfy"], "4 units");
    assert_eq!(lower[0]["select from"], serde_json::json!(["MATH 20A", "MATH 20B"]));
    assert_eq!(lower[1]["needed to satisfy"], "one sequence path");
    assert_eq!(
        lower[1]["select from"],
        serde_json::json!([["CSE 8A", "CSE 8B", "CSE 12"], ["CSE 11", "CSE 12"]])
    );

    let upper = &value["curriculum"][1]["requirements"];
    assert_eq!(upper[0]["needed to satisfy"], "one course");
    assert_eq!(upper[1]["needed to satisfy"], "8 units");
}

#[tokio::test]
async fn test_configured_allow_list() {
    let temp_dir = TempDir::new().unwrap();
    let config = format!("{MEMORY_CONFIG}\n[majors]\n\"Math-CS\" = \"MA30\"\n\"Data Science\" = \"DS25\"\n");
    let resolver = open(temp_dir.path(), &config);

    assert_eq!(resolver.majors().len(), 2);
    // Allowed, but the catalog models no hierarchy for it
    let err = resolver.major_requirements("DS25").await.unwrap_err();
    assert!(matches!(err, ResolverError::MajorNotFound { .. }));

    let err = resolver.major_requirements("Data Science").await.unwrap_err();
    assert!(matches!(err, ResolverError::InvalidMajorIdentifier { .. }));
}

#[tokio::test]
async fn test_configured_expansion_limit() {
    let temp_dir = TempDir::new().unwrap();
    let config = format!("{MEMORY_CONFIG}\n[resolver]\nmax_expansions = 3\n");
    let resolver = open(temp_dir.path(), &config);

    assert_eq!(resolver.max_expansions(), 3);
    assert!(resolver.transitive_prerequisites("MATH 10B").await.is_ok());
    let err = resolver.transitive_prerequisites("MATH 109").await.unwrap_err();
    assert!(matches!(err, ResolverError::ExpansionLimit { limit: 3, .. }));
}

#[tokio::test]
async fn test_tools_over_store() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = open(temp_dir.path(), MEMORY_CONFIG);

    let output = Tool::from_name("transitive_prerequisites")
        .unwrap()
        .invoke(&resolver, "`MATH 20B`")
        .await
        .unwrap();
    assert_eq!(output, "MATH 20B: (MATH 20A)");

    let output = Tool::MilestoneGroups.invoke(&resolver, "").await.unwrap();
    let groups: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(groups["Mathematics Electives"], serde_json::json!(["MATH 109", "MATH 20C"]));
    assert_eq!(groups["Programming Sequence"][1], serde_json::json!(["CSE 11", "CSE 12"]));
}

#[test]
fn test_missing_catalog_fails_store_creation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("advisor.toml");
    fs::write(&config_path, "[store]\ncatalog = \"missing.json\"\n").unwrap();

    let config = AdvisorConfig::from_file(&config_path).unwrap();
    let err = advisor_store::create_store(&config.store).err().unwrap();
    assert!(err.to_string().contains("missing.json"));
}
