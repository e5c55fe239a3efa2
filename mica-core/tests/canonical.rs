//! Canonical tests loaded from YAML fixtures
//!
//! Each fixture case is exact: the input tokenizes to exactly the listed
//! event boundaries, with text slices asserted for content-bearing tokens.

mod common;

use common::{format_events, load_fixtures_by_name};
use mica_core::parse;

/// Run every case in a fixture file, collecting failures so one bad case
/// does not hide the rest.
fn run_fixture(name: &str) {
    let cases = load_fixtures_by_name(name);
    let mut failures = Vec::new();

    for case in &cases {
        let actual = format_events(&parse(&case.markdown));
        let expected: Vec<String> = case.events.iter().map(|e| e.render()).collect();

        if actual != expected {
            eprintln!("--- {}::{} ({})", name, case.id, case.desc);
            eprintln!("input:    {:?}", case.markdown);
            eprintln!("expected: {expected:#?}");
            eprintln!("actual:   {actual:#?}");
            failures.push(format!("{}::{}", name, case.id));
        }
    }

    if !failures.is_empty() {
        panic!("\n{} cases failed:\n  {}", failures.len(), failures.join("\n  "));
    }
}

#[test]
fn test_heading_atx() {
    run_fixture("heading_atx");
}

#[test]
fn test_code_indented() {
    run_fixture("code_indented");
}

#[test]
fn test_flow() {
    run_fixture("flow");
}

// Quick smoke test
#[test]
fn smoke_test() {
    let strings = common::tokenize_to_strings("# Hello");
    assert!(!strings.is_empty(), "should produce events");
    assert!(
        strings.iter().any(|s| s.contains("AtxHeading")),
        "should recognize the heading: {strings:?}"
    );
}
