//! Test utilities for advisor-core

use crate::catalog::Catalog;
use crate::graph::Graph;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The sample catalog shipped in `fixtures/`.
pub const SAMPLE_CATALOG: &str = include_str!("../../../fixtures/catalog.json");

pub fn sample_catalog() -> Catalog {
    Catalog::from_json(SAMPLE_CATALOG).unwrap()
}

pub fn sample_graph() -> Graph {
    sample_catalog().build_graph().unwrap()
}

/// Write `contents` to `name` inside a fresh temp dir.
pub fn write_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}
