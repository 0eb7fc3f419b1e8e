// Case discovery over real directories.
#![cfg(unix)]

use std::fs;

use casecheck::{CaseDiscoverer, CaseError, TestCase};

mod common;
use common::Fixture;

fn names(cases: &[TestCase]) -> Vec<&str> {
    cases.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn empty_directory_yields_no_cases() {
    let fixture = Fixture::new();
    let cases = CaseDiscoverer::discover_cases(fixture.cases_dir()).unwrap();
    assert!(cases.is_empty());
}

#[test]
fn cases_are_sorted_by_file_name() {
    let fixture = Fixture::new();
    fixture
        .add_case("c.in", 0)
        .add_case("a.in", 0)
        .add_case("b.txt", 0)
        .add_case("B.in", 0);

    let cases = CaseDiscoverer::discover_cases(fixture.cases_dir()).unwrap();
    assert_eq!(names(&cases), ["B.in", "a.in", "b.txt", "c.in"]);
}

#[test]
fn listing_is_flat_and_skips_hidden_entries() {
    let fixture = Fixture::new();
    fixture.add_case("a.in", 0).add_case(".gitkeep", 0);
    let nested = fixture.cases_dir().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("deep.in"), "0\n").unwrap();

    let cases = CaseDiscoverer::discover_cases(fixture.cases_dir()).unwrap();
    assert_eq!(names(&cases), ["a.in", "nested"]);
}

#[test]
fn missing_directory_is_a_discovery_error() {
    let fixture = Fixture::new();
    let err = CaseDiscoverer::discover_cases(fixture.root().join("absent")).unwrap_err();
    assert!(matches!(err, CaseError::Discovery { .. }));
}

#[test]
fn a_file_is_not_a_case_directory() {
    let fixture = Fixture::new();
    fixture.add_case("a.in", 0);
    let err = CaseDiscoverer::discover_cases(fixture.cases_dir().join("a.in")).unwrap_err();
    assert!(matches!(err, CaseError::Discovery { .. }));
}
