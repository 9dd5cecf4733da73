//! Integration tests for the index model and selection cascade
//!
//! These tests use the fixture index in `tests/fixtures/` to verify the
//! end-to-end parse, query, and derivation flow.

use std::path::PathBuf;

use reportscope_core::{ContentOrigin, OriginMode, ReportIndex, Selection};

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture_index() -> ReportIndex {
    reportscope_core::logging::init_test();
    let text = std::fs::read_to_string(fixture_path("reports.json")).unwrap();
    ReportIndex::from_json(&text).expect("fixture should parse")
}

fn remote_origin() -> ContentOrigin {
    ContentOrigin {
        mode: OriginMode::Remote,
        base_url: "https://reports.example.com".to_string(),
        local_path: "demo-reports".to_string(),
    }
}

#[test]
fn test_fixture_index_shape() {
    let index = load_fixture_index();

    let mut projects = index.projects();
    projects.sort_unstable();
    assert_eq!(
        projects,
        vec!["billing-service", "checkout-service", "search"]
    );

    assert_eq!(
        index.dates("checkout-service"),
        vec!["2024-01-01", "2024-01-02", "2024-02-15"]
    );
    assert_eq!(
        index.reports("checkout-service", "2024-02-15"),
        ["coverage.html", "load-test.html", "lint.html"]
    );
}

#[test]
fn test_select_end_to_end() {
    let mut sel = Selection::new(load_fixture_index(), remote_origin());

    sel.set_project("checkout-service");
    assert_eq!(
        sel.date_bounds(),
        Some(("2024-01-01", "2024-02-15"))
    );

    sel.set_date("2024-01-01");
    assert!(sel.is_current_date_valid());

    sel.set_report("load-test.html").unwrap();
    assert_eq!(
        sel.derived_location(),
        "https://reports.example.com/checkout-service/2024-01-01/load-test.html"
    );
}

#[test]
fn test_switching_project_invalidates_cascade() {
    let mut sel = Selection::new(load_fixture_index(), remote_origin());

    sel.set_project("checkout-service");
    sel.set_date("2024-01-02");
    sel.set_report("coverage.html").unwrap();
    assert!(!sel.derived_location().is_empty());

    // The old date exists only under checkout-service; after switching,
    // nothing below the project survives.
    sel.set_project("search");
    assert_eq!(sel.date(), None);
    assert_eq!(sel.report(), None);
    assert_eq!(sel.derived_location(), "");
    assert_eq!(sel.available_dates(), vec!["2024-01-10"]);
}

#[test]
fn test_absent_date_disables_report_level() {
    let mut sel = Selection::new(load_fixture_index(), remote_origin());

    sel.set_project("billing-service");
    sel.set_date("2024-01-01"); // only valid under checkout-service

    assert!(!sel.is_current_date_valid());
    assert!(sel.available_reports().is_empty());
    assert!(sel.set_report("coverage.html").is_err());
    assert_eq!(sel.derived_location(), "");
}

#[test]
fn test_empty_index_document() {
    let index = ReportIndex::from_json("{}").unwrap();
    let sel = Selection::new(index, remote_origin());
    assert!(sel.available_projects().is_empty());
    assert_eq!(sel.derived_location(), "");
}
