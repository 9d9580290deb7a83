//! Integration tests for canvas structural diagnostics (C001–C008).

#[allow(dead_code)]
mod helpers;

use helpers::*;
use onboarding_core::error::Phase;
use onboarding_core::parse;
use onboarding_core::validate::validate_canvas;

#[test]
fn linear_canvas_passes() {
    let c = parse::parse_canvas(include_str!("fixtures/linear_canvas.json")).unwrap();
    let errors = validate_canvas(&c);
    assert!(errors.is_empty(), "Expected no canvas errors, got: {:?}", errors);
    assert!(validate_canvas(&linear_canvas(10)).is_empty());
}

#[test]
fn unconnected_canvas_is_not_an_error() {
    assert!(validate_canvas(&canvas(&[], &[])).is_empty());
    assert!(validate_canvas(&canvas(&[("n1", "w1"), ("n2", "w2")], &[])).is_empty());
}

#[test]
fn c001_and_c005_pure_cycle() {
    let c = parse::parse_canvas(include_str!("fixtures/cycle_canvas.json")).unwrap();
    let errors = validate_canvas(&c);
    assert_has_error(&errors, "C001");
    assert_has_error(&errors, "C005");
    assert!(errors.iter().all(|e| e.phase == Phase::Canvas));
}

#[test]
fn branching_fixture() {
    let c = parse::parse_canvas(include_str!("fixtures/branching_canvas.json")).unwrap();
    let errors = validate_canvas(&c);
    let codes: Vec<(&str, Option<&str>)> = errors
        .iter()
        .map(|e| (e.code.as_str(), e.subject.as_deref()))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("C002", Some("d")),
            ("C003", Some("a")),
            ("C004", Some("c")),
        ]
    );
    assert_no_error(&errors, "C005");
}

#[test]
fn c005_self_loop() {
    let errors = validate_canvas(&canvas(&[("n1", "w1"), ("n2", "w2")], &[("n1", "n2"), ("n2", "n2")]));
    assert_has_error(&errors, "C005");
    assert_no_error(&errors, "C001");
}

#[test]
fn c006_dangling_edges() {
    let errors = validate_canvas(&canvas(&[("n1", "w1")], &[("n1", "ghost"), ("phantom", "n1")]));
    let dangling: Vec<&str> = errors
        .iter()
        .filter(|e| e.code == "C006")
        .filter_map(|e| e.subject.as_deref())
        .collect();
    assert_eq!(dangling, vec!["ghost", "phantom"]);
}

#[test]
fn c007_loose_node() {
    let errors = validate_canvas(&canvas(
        &[("loose", "w0"), ("n1", "w1"), ("n2", "w2")],
        &[("n1", "n2")],
    ));
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].code, "C007");
    assert_eq!(
        errors[0].to_string(),
        "[Canvas:C007] Node 'loose' is not connected to the chain ('loose')"
    );
}

#[test]
fn c008_duplicate_ids() {
    let errors = validate_canvas(&canvas(&[("n1", "w1"), ("n1", "w2")], &[]));
    assert_has_error(&errors, "C008");
}

#[test]
fn edgeless_canvas_only_reports_duplicate_ids() {
    let errors = validate_canvas(&canvas(&[("n1", "w1"), ("n1", "w2"), ("n2", "w3")], &[]));
    let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["C008"]);
}
