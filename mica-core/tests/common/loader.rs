//! Fixture loading from YAML files.

use serde::Deserialize;
use std::path::Path;

/// A single test case from a fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub markdown: String,
    pub events: Vec<ExpectedEvent>,
}

/// Expected event - either a bare name or [name, content].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExpectedEvent {
    /// Boundary with no content assertion ("Enter AtxHeading").
    Bare(String),
    /// Boundary plus sliced text ["Exit Data", "foo"].
    WithContent(String, String),
}

impl ExpectedEvent {
    /// Render in the same shape as `common::format_events`.
    pub fn render(&self) -> String {
        match self {
            ExpectedEvent::Bare(name) => name.clone(),
            ExpectedEvent::WithContent(name, content) => format!("{name} {content:?}"),
        }
    }
}

/// Load all test cases from a YAML fixture file.
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {path:?}: {e}"));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {path:?}: {e}"))
}

/// Load fixtures from the standard fixtures directory.
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{name}.yaml"));
    load_fixtures(&path)
}
