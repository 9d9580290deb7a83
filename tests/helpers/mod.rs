use onboarding_core::error::DefinitionError;
use onboarding_core::parse::*;
use serde_json::{Map, Value};

// =============================================================================
// Field builders
// =============================================================================

pub fn field(id: &str, field_type: &str) -> FieldDefinition {
    FieldDefinition::new(id, field_type)
}

pub fn required_field(id: &str, field_type: &str) -> FieldDefinition {
    let mut f = field(id, field_type);
    f.required = true;
    f
}

pub fn field_with_rules(id: &str, field_type: &str, rules: ValidationRules) -> FieldDefinition {
    let mut f = field(id, field_type);
    f.validation = rules;
    f
}

/// Turn a `json!({...})` object into form data.
pub fn form(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("form data must be a JSON object, got {other}"),
    }
}

// =============================================================================
// Canvas builders
// =============================================================================

pub fn canvas(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> Canvas {
    Canvas {
        nodes: nodes
            .iter()
            .map(|(id, workflow_id)| GraphNode::new(*id, *workflow_id))
            .collect(),
        edges: edges
            .iter()
            .map(|(source, target)| GraphEdge::new(*source, *target))
            .collect(),
    }
}

/// `n1 → n2 → … → nN`, each node running workflow `wK`.
pub fn linear_canvas(len: usize) -> Canvas {
    let ids: Vec<(String, String)> = (1..=len)
        .map(|i| (format!("n{i}"), format!("w{i}")))
        .collect();
    Canvas {
        nodes: ids
            .iter()
            .map(|(id, wf)| GraphNode::new(id.as_str(), wf.as_str()))
            .collect(),
        edges: ids
            .windows(2)
            .map(|pair| GraphEdge::new(pair[0].0.as_str(), pair[1].0.as_str()))
            .collect(),
    }
}

// =============================================================================
// Assertions
// =============================================================================

pub fn assert_has_error(errors: &[DefinitionError], code: &str) {
    assert!(
        errors.iter().any(|e| e.code == code),
        "Expected error {}, got: {:?}",
        code,
        errors
    );
}

pub fn assert_no_error(errors: &[DefinitionError], code: &str) {
    assert!(
        !errors.iter().any(|e| e.code == code),
        "Did not expect error {}, but got: {:?}",
        code,
        errors
    );
}
