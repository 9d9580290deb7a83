//! Integration tests for field/step/workflow definition lint (D001–D007).

#[allow(dead_code)]
mod helpers;

use helpers::*;
use onboarding_core::parse::{self, StepDefinition, ValidationRules};
use onboarding_core::validate::{validate_step_definition, validate_workflow_definition};

#[test]
fn onboarding_fixture_passes() {
    let workflow = parse::parse_workflow(include_str!("fixtures/onboarding_workflow.json"))
        .expect("Should parse");
    assert_eq!(workflow.steps.len(), 2);
    let errors = validate_workflow_definition(&workflow);
    assert!(errors.is_empty(), "Expected no definition errors, got: {:?}", errors);
}

#[test]
fn broken_fixture_reports_everything() {
    let workflow = parse::parse_workflow(include_str!("fixtures/broken_workflow.json"))
        .expect("Should parse");
    let errors = validate_workflow_definition(&workflow);
    let mut codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec!["D001", "D002", "D003", "D004", "D005", "D006"]);
}

#[test]
fn d007_workflow_without_steps() {
    let workflow = parse::parse_workflow(r#"{"id": "w", "name": "Empty", "steps": []}"#).unwrap();
    let errors = validate_workflow_definition(&workflow);
    assert_has_error(&errors, "D007");
}

#[test]
fn select_with_field_level_options_passes() {
    let mut f = field("dept", "select");
    f.options = Some(vec!["Engineering".into()]);
    let step = StepDefinition {
        id: "s".into(),
        title: "S".into(),
        fields: vec![f],
    };
    assert!(validate_step_definition(&step).is_empty());
}

#[test]
fn select_with_only_rule_options_is_flagged() {
    // Field-level options always replace rule options, so these never apply.
    let step = StepDefinition {
        id: "s".into(),
        title: "S".into(),
        fields: vec![field_with_rules(
            "dept",
            "select",
            ValidationRules::default().with_options(["Engineering"]),
        )],
    };
    assert_has_error(&validate_step_definition(&step), "D005");
}

#[test]
fn d002_message_names_pattern() {
    let step = StepDefinition {
        id: "s".into(),
        title: "S".into(),
        fields: vec![field_with_rules("code", "text", ValidationRules::default().with_pattern("[a-"))],
    };
    let errors = validate_step_definition(&step);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("Invalid validation pattern '[a-'"));
    assert_eq!(errors[0].subject.as_deref(), Some("code"));
}

#[test]
fn lookaround_pattern_is_not_flagged() {
    let step = StepDefinition {
        id: "s".into(),
        title: "S".into(),
        fields: vec![field_with_rules(
            "password",
            "text",
            ValidationRules::default().with_pattern(r"^(?=.*\d)(?<!x).+$"),
        )],
    };
    let errors = validate_step_definition(&step);
    assert!(errors.is_empty(), "Expected no definition errors, got: {:?}", errors);
}
